use crate::core::types::{Number, Point3, Vector3, EPSILON};
use crate::scene::graph::ShapeId;
use crate::shape::Primitive;
use crate::shared::bounds::Bounds;
use crate::shared::intersect::{Intersection, IntersectionList};
use crate::shared::ray::Ray;
use getset::CopyGetters;
use std::f64::consts::PI;

/// A flat annulus in the plane `y == height`, optionally cut down to a
/// partial sweep of `phi_max` degrees around the `y` axis
#[derive(CopyGetters, Copy, Clone, Debug, PartialEq)]
#[getset(get_copy = "pub")]
pub struct Disk {
    radius: Number,
    inner_radius: Number,
    /// Sweep limit, stored in radians
    phi_max: Number,
    height: Number,
}

impl Default for Disk {
    fn default() -> Self { Self::new(1., 0., 360., 0.) }
}

impl Disk {
    pub fn new(radius: Number, inner_radius: Number, phi_max_degrees: Number, height: Number) -> Self {
        Self {
            radius,
            inner_radius,
            phi_max: phi_max_degrees.clamp(0., 360.).to_radians(),
            height,
        }
    }
}

impl Primitive for Disk {
    fn intersect_local(&self, ray: &Ray, shape: ShapeId, xs: &mut IntersectionList) {
        // Rays parallel to the disk's plane never hit
        if Number::abs(ray.direction().y) < EPSILON {
            return;
        }

        let t = (self.height - ray.origin().y) / ray.direction().y;
        if t < EPSILON {
            return;
        }

        let x = ray.origin().x + (t * ray.direction().x);
        let z = ray.origin().z + (t * ray.direction().z);
        let dist2 = (x * x) + (z * z);
        if dist2 > (self.radius * self.radius + EPSILON) || dist2 < self.inner_radius * self.inner_radius {
            return;
        }

        let mut phi = Number::atan2(z, x);
        if phi < 0. {
            phi += 2. * PI;
        }
        if phi > self.phi_max {
            return;
        }

        xs.push(Intersection::new(t, shape));
    }

    fn normal_local(&self, _point: Point3, _hit: &Intersection) -> Vector3 { Vector3::Y }

    fn local_bounds(&self) -> Bounds {
        Bounds::new(
            Point3::new(-self.radius, self.height, -self.radius),
            Point3::new(self.radius, self.height, self.radius),
        )
    }
}
