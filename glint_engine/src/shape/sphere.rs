use crate::core::types::{Number, Point3, Vector3};
use crate::scene::graph::ShapeId;
use crate::shape::Primitive;
use crate::shared::bounds::Bounds;
use crate::shared::intersect::{Intersection, IntersectionList};
use crate::shared::math::solve_quadratic;
use crate::shared::ray::Ray;
use std::f64::consts::PI;

/// The unit sphere, centred at the origin
#[derive(Copy, Clone, Debug, Default)]
pub struct Sphere;

impl Primitive for Sphere {
    fn intersect_local(&self, ray: &Ray, shape: ShapeId, xs: &mut IntersectionList) {
        let origin = ray.origin();
        let dir = ray.direction();

        let a = dir.dot(dir);
        let b = 2. * dir.dot(origin);
        let c = origin.dot(origin) - 1.;

        if let Some((t0, t1)) = solve_quadratic(a, b, c) {
            xs.push(Intersection::new(t0, shape));
            xs.push(Intersection::new(t1, shape));
        }
    }

    fn normal_local(&self, point: Point3, _hit: &Intersection) -> Vector3 { point }

    fn local_bounds(&self) -> Bounds { Bounds::new(Point3::splat(-1.), Point3::splat(1.)) }

    /// Spherical mapping: `u` from the azimuth, `v` from the polar angle
    fn uv_at(&self, point: Point3) -> (Number, Number) {
        let theta = Number::atan2(point.x, point.z);
        let radius = point.length();
        let phi = Number::acos(point.y / radius);

        let raw_u = theta / (2. * PI);
        let u = 1. - (raw_u + 0.5);
        let v = 1. - (phi / PI);
        (u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::test_shape_id;
    use approx::assert_relative_eq;

    fn intersect(ray: &Ray) -> IntersectionList {
        let mut xs = IntersectionList::new();
        Sphere.intersect_local(ray, test_shape_id(), &mut xs);
        xs
    }

    #[test]
    fn ray_through_centre() {
        let xs = intersect(&Ray::new(Point3::new(0., 0., -5.), Vector3::Z));
        assert_eq!(xs.len(), 2);
        assert_relative_eq!(xs[0].t, 4.);
        assert_relative_eq!(xs[1].t, 6.);
    }

    #[test]
    fn ray_tangent() {
        let xs = intersect(&Ray::new(Point3::new(0., 1., -5.), Vector3::Z));
        assert_eq!(xs.len(), 2);
        assert_relative_eq!(xs[0].t, 5.);
        assert_relative_eq!(xs[1].t, 5.);
    }

    #[test]
    fn ray_misses() {
        let xs = intersect(&Ray::new(Point3::new(0., 2., -5.), Vector3::Z));
        assert!(xs.is_empty());
    }

    #[test]
    fn ray_starts_inside() {
        let xs = intersect(&Ray::new(Point3::ZERO, Vector3::Z));
        assert_relative_eq!(xs[0].t, -1.);
        assert_relative_eq!(xs[1].t, 1.);
    }

    #[test]
    fn normal_is_radial() {
        let k = Number::sqrt(3.) / 3.;
        let p = Point3::new(k, k, k);
        let n = Sphere.normal_local(p, &Intersection::new(0., test_shape_id()));
        assert_relative_eq!(n, p);
    }

    #[test]
    fn uv_equator_and_poles() {
        let (u, v) = Sphere.uv_at(Point3::new(0., 0., -1.));
        assert_relative_eq!(u, 0.);
        assert_relative_eq!(v, 0.5);
        let (_, v) = Sphere.uv_at(Point3::new(0., 1., 0.));
        assert_relative_eq!(v, 1.);
    }
}
