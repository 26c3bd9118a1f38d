use crate::core::types::{Number, Point3, Vector3, EPSILON, INF};
use crate::scene::graph::ShapeId;
use crate::shape::Primitive;
use crate::shared::bounds::Bounds;
use crate::shared::intersect::{Intersection, IntersectionList};
use crate::shared::ray::Ray;

/// The infinite plane `y == 0`, facing `+y`
#[derive(Copy, Clone, Debug, Default)]
pub struct Plane;

impl Primitive for Plane {
    fn intersect_local(&self, ray: &Ray, shape: ShapeId, xs: &mut IntersectionList) {
        // A ray parallel to (or inside) the plane never hits it
        if Number::abs(ray.direction().y) < EPSILON {
            return;
        }

        let t = -ray.origin().y / ray.direction().y;
        xs.push(Intersection::new(t, shape));
    }

    fn normal_local(&self, _point: Point3, _hit: &Intersection) -> Vector3 { Vector3::Y }

    fn local_bounds(&self) -> Bounds {
        Bounds::new(Point3::new(-INF, 0., -INF), Point3::new(INF, 0., INF))
    }

    /// Tiles the plane with the unit square
    fn uv_at(&self, point: Point3) -> (Number, Number) {
        (point.x.rem_euclid(1.), point.z.rem_euclid(1.))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::test_shape_id;
    use approx::assert_relative_eq;

    #[test]
    fn parallel_ray_misses() {
        let mut xs = IntersectionList::new();
        let r = Ray::new(Point3::new(0., 10., 0.), Vector3::Z);
        Plane.intersect_local(&r, test_shape_id(), &mut xs);
        assert!(xs.is_empty());
    }

    #[test]
    fn ray_from_above_and_below() {
        let shape = test_shape_id();
        let mut xs = IntersectionList::new();
        Plane.intersect_local(&Ray::new(Point3::new(0., 1., 0.), -Vector3::Y), shape, &mut xs);
        assert_relative_eq!(xs[0].t, 1.);

        xs.clear();
        Plane.intersect_local(&Ray::new(Point3::new(0., -1., 0.), Vector3::Y), shape, &mut xs);
        assert_relative_eq!(xs[0].t, 1.);
    }

    #[test]
    fn uv_wraps_negative_coordinates() {
        let (u, v) = Plane.uv_at(Point3::new(-0.25, 0., 1.5));
        assert_relative_eq!(u, 0.75);
        assert_relative_eq!(v, 0.5);
    }
}
