use crate::core::types::{Matrix4, Number, Point3, Vector3};
use getset::CopyGetters;

#[derive(CopyGetters, Copy, Clone, PartialEq, Debug)]
#[getset(get_copy = "pub")]
pub struct Ray {
    /// World-space (or parent-space) origin of the ray
    origin: Point3,
    /// Direction vector of the ray.
    ///
    /// # Note
    /// Not necessarily normalised: an object transform scales the direction
    /// along with the origin, so `t` values stay comparable across spaces.
    direction: Vector3,
}

impl Ray {
    pub const fn new(origin: Point3, direction: Vector3) -> Self { Self { origin, direction } }

    /// Gets the position at a given distance along the ray
    ///
    /// `origin + (t * direction)`
    pub fn position(&self, t: Number) -> Point3 { self.origin + (self.direction * t) }

    /// Applies `matrix` to both origin and direction, giving the ray in
    /// another coordinate space
    pub fn transformed(&self, matrix: &Matrix4) -> Self {
        Self {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }
}
