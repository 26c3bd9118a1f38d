pub mod camera;
pub mod graph;
pub mod world;

pub use camera::Camera;
pub use graph::{CsgOp, NodeKind, SceneGraph, ShapeId, ShapeNode};
pub use world::World;
