pub mod bounds;
pub mod intersect;
pub mod math;
pub mod ray;
pub mod transform;
