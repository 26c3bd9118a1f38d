pub mod canvas;
pub mod core;
pub mod light;
pub mod material;
pub mod obj;
pub mod pattern;
pub mod scene;
pub mod shape;
pub mod shared;
