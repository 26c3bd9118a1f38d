use crate::core::types::{Number, Point3, Vector3, ISECT_FAR, ISECT_NEAR};
use crate::scene::graph::ShapeId;
use crate::shape::Primitive;
use crate::shared::bounds::Bounds;
use crate::shared::intersect::{Intersection, IntersectionList};
use crate::shared::ray::Ray;
use getset::CopyGetters;

/// Precomputed plane data for the Havel-Herout ray/triangle test.
///
/// `n0`/`d0` is the triangle's supporting plane; `n1`/`d1` and `n2`/`d2` are
/// the two barycentric projection planes, pre-divided by the denominator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct IsectPlanes {
    pub n0: Vector3,
    pub d0: Number,
    pub n1: Vector3,
    pub d1: Number,
    pub n2: Vector3,
    pub d2: Number,
}

impl IsectPlanes {
    pub fn new(p1: Point3, e1: Vector3, e2: Vector3) -> Self {
        let n0 = e1.cross(e2);
        let d0 = n0.dot(p1);

        let inv_denom = 1. / n0.dot(n0);

        let n1 = e2.cross(n0) * inv_denom;
        let d1 = -n1.dot(p1);

        let n2 = n0.cross(e1) * inv_denom;
        let d2 = -n2.dot(p1);

        Self { n0, d0, n1, d1, n2, d2 }
    }

    /// Runs the Havel-Herout test, returning `(t, u, v)` for a hit inside the
    /// triangle and the `ISECT_NEAR..=ISECT_FAR` window.
    ///
    /// The inside test rejects via the sign bits of the three barycentric
    /// determinants, which also throws out NaNs from degenerate rays.
    pub fn hit(&self, ray: &Ray) -> Option<(Number, Number, Number)> {
        const SIGN_BIT: u64 = 0x8000_0000_0000_0000;

        let o = ray.origin();
        let d = ray.direction();

        let det = self.n0.dot(d);
        let dett = self.d0 - o.dot(self.n0);
        let wr = o * det + d * dett;
        let u = wr.dot(self.n1) + det * self.d1;
        let v = wr.dot(self.n2) + det * self.d2;

        let tmpdet0 = det - u - v;
        let mut pdet0 = tmpdet0.to_bits();
        let pdetu = u.to_bits();
        let pdetv = v.to_bits();
        pdet0 ^= pdetu;
        pdet0 |= pdetu ^ pdetv;
        if pdet0 & SIGN_BIT != 0 {
            return None;
        }

        let rdet = 1. / det;
        let t = dett * rdet;
        if (ISECT_NEAR..=ISECT_FAR).contains(&t) {
            Some((t, u * rdet, v * rdet))
        } else {
            None
        }
    }
}

/// A flat triangle with one normal shared across the whole face
#[derive(CopyGetters, Copy, Clone, Debug, PartialEq)]
#[getset(get_copy = "pub")]
pub struct Triangle {
    p1: Point3,
    p2: Point3,
    p3: Point3,
    e1: Vector3,
    e2: Vector3,
    normal: Vector3,
    #[getset(skip)]
    planes: IsectPlanes,
}

impl Triangle {
    pub fn new(p1: Point3, p2: Point3, p3: Point3) -> Self {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        Self {
            p1,
            p2,
            p3,
            e1,
            e2,
            normal: e2.cross(e1).normalize(),
            planes: IsectPlanes::new(p1, e1, e2),
        }
    }
}

impl Primitive for Triangle {
    fn intersect_local(&self, ray: &Ray, shape: ShapeId, xs: &mut IntersectionList) {
        if let Some((t, _, _)) = self.planes.hit(ray) {
            xs.push(Intersection::new(t, shape));
        }
    }

    fn normal_local(&self, _point: Point3, _hit: &Intersection) -> Vector3 { self.normal }

    fn local_bounds(&self) -> Bounds { Bounds::from_points([self.p1, self.p2, self.p3]) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::test_shape_id;
    use approx::assert_relative_eq;

    fn default_triangle() -> Triangle {
        Triangle::new(Point3::new(0., 1., 0.), Point3::new(-1., 0., 0.), Point3::new(1., 0., 0.))
    }

    fn intersect(tri: &Triangle, origin: Point3, direction: Vector3) -> IntersectionList {
        let mut xs = IntersectionList::new();
        tri.intersect_local(&Ray::new(origin, direction), test_shape_id(), &mut xs);
        xs
    }

    #[test]
    fn construction_precomputes_edges_and_normal() {
        let t = default_triangle();
        assert_eq!(t.e1(), Vector3::new(-1., -1., 0.));
        assert_eq!(t.e2(), Vector3::new(1., -1., 0.));
        assert_relative_eq!(t.normal(), Vector3::new(0., 0., -1.));
    }

    #[test]
    fn parallel_ray_misses() {
        let xs = intersect(&default_triangle(), Point3::new(0., -1., -2.), Vector3::new(0., 1., 0.));
        assert!(xs.is_empty());
    }

    #[test]
    fn ray_misses_each_edge() {
        let t = default_triangle();
        assert!(intersect(&t, Point3::new(1., 1., -2.), Vector3::Z).is_empty());
        assert!(intersect(&t, Point3::new(-1., 1., -2.), Vector3::Z).is_empty());
        assert!(intersect(&t, Point3::new(0., -1., -2.), Vector3::Z).is_empty());
    }

    #[test]
    fn ray_strikes_interior() {
        let xs = intersect(&default_triangle(), Point3::new(0., 0.5, -2.), Vector3::Z);
        assert_eq!(xs.len(), 1);
        assert_relative_eq!(xs[0].t, 2.);
    }

    #[test]
    fn hits_outside_the_distance_window_are_dropped() {
        let t = default_triangle();
        assert!(intersect(&t, Point3::new(0., 0.5, -2e4), Vector3::Z).is_empty());
    }

    #[test]
    fn bounds_wrap_the_vertices() {
        let b = default_triangle().local_bounds();
        assert_eq!(b.min(), Point3::new(-1., 0., 0.));
        assert_eq!(b.max(), Point3::new(1., 1., 0.));
    }
}
