use crate::core::types::{Number, Point3, Vector3};
use crate::scene::graph::ShapeId;
use crate::shape::Primitive;
use crate::shared::bounds::Bounds;
use crate::shared::intersect::{Intersection, IntersectionList};
use crate::shared::ray::Ray;

/// The axis-aligned cube spanning `-1..=1` on every axis
#[derive(Copy, Clone, Debug, Default)]
pub struct Cube;

/// Which face of the cube a surface point lies on
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Face {
    Left,
    Front,
    Right,
    Back,
    Up,
    Down,
}

impl Face {
    /// The face whose axis dominates the point's coordinates.
    ///
    /// Assumes the point is on (or near) the cube surface.
    pub fn from_point(p: Point3) -> Self {
        let coord = Number::max(p.x.abs(), Number::max(p.y.abs(), p.z.abs()));

        if coord == p.x {
            Face::Right
        } else if coord == -p.x {
            Face::Left
        } else if coord == p.y {
            Face::Up
        } else if coord == -p.y {
            Face::Down
        } else if coord == p.z {
            Face::Front
        } else {
            Face::Back
        }
    }
}

impl Primitive for Cube {
    fn intersect_local(&self, ray: &Ray, shape: ShapeId, xs: &mut IntersectionList) {
        let o = ray.origin();
        let inv_d = ray.direction().recip();

        let t1 = (-1. - o.x) * inv_d.x;
        let t2 = (1. - o.x) * inv_d.x;
        let mut tmin = Number::min(t1, t2);
        let mut tmax = Number::max(t1, t2);

        let t1 = (-1. - o.y) * inv_d.y;
        let t2 = (1. - o.y) * inv_d.y;
        tmin = Number::max(tmin, Number::min(t1, t2));
        tmax = Number::min(tmax, Number::max(t1, t2));

        let t1 = (-1. - o.z) * inv_d.z;
        let t2 = (1. - o.z) * inv_d.z;
        tmin = Number::max(tmin, Number::min(t1, t2));
        tmax = Number::min(tmax, Number::max(t1, t2));

        if tmax > Number::max(tmin, 0.) {
            xs.push(Intersection::new(tmin, shape));
            xs.push(Intersection::new(tmax, shape));
        }
    }

    fn normal_local(&self, point: Point3, _hit: &Intersection) -> Vector3 {
        let maxc = Number::max(point.x.abs(), Number::max(point.y.abs(), point.z.abs()));
        if maxc == point.x.abs() {
            Vector3::new(point.x, 0., 0.)
        } else if maxc == point.y.abs() {
            Vector3::new(0., point.y, 0.)
        } else {
            Vector3::new(0., 0., point.z)
        }
    }

    fn local_bounds(&self) -> Bounds { Bounds::new(Point3::splat(-1.), Point3::splat(1.)) }

    /// Cross-pattern cube map: each face maps to its own unit square
    fn uv_at(&self, point: Point3) -> (Number, Number) {
        let wrap = |val: Number| (val % 2.) / 2.;
        match Face::from_point(point) {
            Face::Right => (wrap(1. - point.z), wrap(point.y + 1.)),
            Face::Left => (wrap(point.z + 1.), wrap(point.y + 1.)),
            Face::Up => (wrap(point.x + 1.), wrap(1. - point.z)),
            Face::Down => (wrap(point.x + 1.), wrap(point.z + 1.)),
            Face::Front => (wrap(point.x + 1.), wrap(point.y + 1.)),
            Face::Back => (wrap(1. - point.x), wrap(point.y + 1.)),
        }
    }
}
