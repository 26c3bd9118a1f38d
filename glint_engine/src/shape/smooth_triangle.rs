use crate::core::types::{Point3, Vector3};
use crate::scene::graph::ShapeId;
use crate::shape::triangle::IsectPlanes;
use crate::shape::Primitive;
use crate::shared::bounds::Bounds;
use crate::shared::intersect::{Intersection, IntersectionList};
use crate::shared::ray::Ray;
use getset::CopyGetters;

/// A triangle with per-vertex normals, interpolated across the face by the
/// barycentric coordinates of each hit
#[derive(CopyGetters, Copy, Clone, Debug, PartialEq)]
#[getset(get_copy = "pub")]
pub struct SmoothTriangle {
    p1: Point3,
    p2: Point3,
    p3: Point3,
    n1: Vector3,
    n2: Vector3,
    n3: Vector3,
    e1: Vector3,
    e2: Vector3,
    #[getset(skip)]
    planes: IsectPlanes,
}

impl SmoothTriangle {
    pub fn new(p1: Point3, p2: Point3, p3: Point3, n1: Vector3, n2: Vector3, n3: Vector3) -> Self {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        Self {
            p1,
            p2,
            p3,
            n1,
            n2,
            n3,
            e1,
            e2,
            planes: IsectPlanes::new(p1, e1, e2),
        }
    }
}

impl Primitive for SmoothTriangle {
    fn intersect_local(&self, ray: &Ray, shape: ShapeId, xs: &mut IntersectionList) {
        if let Some((t, u, v)) = self.planes.hit(ray) {
            xs.push(Intersection::new_uv(t, shape, u, v));
        }
    }

    fn normal_local(&self, _point: Point3, hit: &Intersection) -> Vector3 {
        self.n2 * hit.u + self.n3 * hit.v + self.n1 * (1. - hit.u - hit.v)
    }

    fn local_bounds(&self) -> Bounds { Bounds::from_points([self.p1, self.p2, self.p3]) }
}
