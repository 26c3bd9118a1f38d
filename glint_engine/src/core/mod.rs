pub mod colour;
pub mod types;
