/// Numeric type used for colour channels in the engine
pub type Channel = f32;

/// Numeric type used for most calculations in the engine
pub type Number = f64;
pub type Point3 = glam::DVec3;
pub type Vector3 = glam::DVec3;
pub type Matrix4 = glam::DMat4;

pub const INF: Number = Number::INFINITY;

/// Tolerance for floating-point comparisons, and for the cracks around
/// primitive edges (cylinder caps, triangle borders, etc.)
pub const EPSILON: Number = 3e-5;

/// Offset applied along the surface normal when spawning shadow/reflection
/// rays, so they don't re-intersect the surface they left
pub const SHADOW_BIAS: Number = 6e-4;

/// Recursion limit for reflected and refracted rays
pub const N_BOUNCE: u8 = 4;

/// Closest distance along a ray at which a triangle hit counts
pub const ISECT_NEAR: Number = 1e-4;
/// Furthest distance along a ray at which a triangle hit counts
pub const ISECT_FAR: Number = 1e4;
