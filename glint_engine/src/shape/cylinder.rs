use crate::core::types::{Matrix4, Number, Point3, Vector3, EPSILON, INF};
use crate::scene::graph::ShapeId;
use crate::shape::Primitive;
use crate::shared::bounds::Bounds;
use crate::shared::intersect::{Intersection, IntersectionList};
use crate::shared::math::solve_quadratic;
use crate::shared::ray::Ray;
use crate::shared::transform::{rotation_between, scaling, translation};
use getset::CopyGetters;
use std::f64::consts::PI;

/// A cylinder of radius 1 around the `y` axis, spanning `min..max` in `y`.
///
/// The default cylinder is infinite and open; a capped cylinder closes both
/// ends with disks.
#[derive(CopyGetters, Copy, Clone, Debug, PartialEq)]
#[getset(get_copy = "pub")]
pub struct Cylinder {
    min: Number,
    max: Number,
    capped: bool,
}

impl Default for Cylinder {
    fn default() -> Self { Self::new(-INF, INF, false) }
}

impl Cylinder {
    pub const fn new(min: Number, max: Number, capped: bool) -> Self { Self { min, max, capped } }

    /// A capped unit cylinder plus the transform that stretches it into the
    /// segment from `p1` to `p2` with radius 1
    pub fn between(p1: Point3, p2: Point3) -> (Self, Matrix4) {
        let v = p2 - p1;
        let m = rotation_between(Vector3::Y, v.normalize());
        let transform = translation(p1.x, p1.y, p1.z) * m * scaling(1., v.length(), 1.);
        (Self::new(0., 1., true), transform)
    }

    /// Whether the hit at `t` lands within the cap disk of radius `radius`
    fn check_cap(ray: &Ray, t: Number, radius: Number) -> bool {
        let x = ray.origin().x + t * ray.direction().x;
        let z = ray.origin().z + t * ray.direction().z;
        (x * x) + (z * z) <= (radius * radius) + EPSILON
    }

    fn intersect_caps(&self, ray: &Ray, shape: ShapeId, xs: &mut IntersectionList) {
        // Caps only matter on a closed cylinder, and only for rays that
        // aren't parallel to them
        if !self.capped || Number::abs(ray.direction().y) < EPSILON {
            return;
        }

        let t = (self.min - ray.origin().y) / ray.direction().y;
        if Self::check_cap(ray, t, 1.) {
            xs.push(Intersection::new(t, shape));
        }

        let t = (self.max - ray.origin().y) / ray.direction().y;
        if Self::check_cap(ray, t, 1.) {
            xs.push(Intersection::new(t, shape));
        }
    }
}

impl Primitive for Cylinder {
    fn intersect_local(&self, ray: &Ray, shape: ShapeId, xs: &mut IntersectionList) {
        let o = ray.origin();
        let d = ray.direction();

        let a = (d.x * d.x) + (d.z * d.z);

        // Parallel to the y axis: only the caps can be hit
        if Number::abs(a) < EPSILON {
            self.intersect_caps(ray, shape, xs);
            return;
        }

        let b = 2. * o.x * d.x + 2. * o.z * d.z;
        let c = (o.x * o.x) + (o.z * o.z) - 1.;

        if let Some((t0, t1)) = solve_quadratic(a, b, c) {
            let y0 = o.y + t0 * d.y;
            if self.min < y0 && y0 < self.max {
                xs.push(Intersection::new(t0, shape));
            }

            let y1 = o.y + t1 * d.y;
            if self.min < y1 && y1 < self.max {
                xs.push(Intersection::new(t1, shape));
            }
        }

        self.intersect_caps(ray, shape, xs);
    }

    fn normal_local(&self, point: Point3, _hit: &Intersection) -> Vector3 {
        let dist = (point.x * point.x) + (point.z * point.z);
        if dist < 1. && point.y >= self.max - EPSILON {
            Vector3::Y
        } else if dist < 1. && point.y <= self.min + EPSILON {
            -Vector3::Y
        } else {
            Vector3::new(point.x, 0., point.z)
        }
    }

    fn local_bounds(&self) -> Bounds {
        Bounds::new(Point3::new(-1., self.min, -1.), Point3::new(1., self.max, 1.))
    }

    /// Cylindrical mapping on the body, planar maps on the caps
    fn uv_at(&self, point: Point3) -> (Number, Number) {
        if point.y >= self.max - EPSILON {
            // Top cap
            (((point.x + 1.) % 2.) / 2., ((1. - point.z) % 2.) / 2.)
        } else if point.y <= self.min + EPSILON {
            // Bottom cap
            (((point.x + 1.) % 2.) / 2., ((point.z + 1.) % 2.) / 2.)
        } else {
            let theta = Number::atan2(point.x, point.z);
            let raw_u = theta / (2. * PI);
            (1. - (raw_u + 0.5), point.y % 1.)
        }
    }
}
