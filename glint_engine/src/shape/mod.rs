use crate::core::types::{Number, Point3, Vector3};
use crate::scene::graph::ShapeId;
use crate::shared::bounds::Bounds;
use crate::shared::intersect::{Intersection, IntersectionList};
use crate::shared::ray::Ray;
use enum_dispatch::enum_dispatch;

pub mod capsule;
pub mod cone;
pub mod cube;
pub mod cylinder;
pub mod disk;
pub mod plane;
pub mod smooth_triangle;
pub mod sphere;
pub mod triangle;

pub use self::capsule::Capsule;
pub use self::cone::Cone;
pub use self::cube::Cube;
pub use self::cylinder::Cylinder;
pub use self::disk::Disk;
pub use self::plane::Plane;
pub use self::smooth_triangle::SmoothTriangle;
pub use self::sphere::Sphere;
pub use self::triangle::Triangle;

/// The geometry of a leaf shape, in its own object space.
///
/// Transforms and materials live on the scene graph node, not here; a
/// primitive only answers local-space queries. A ray handed to
/// [Self::intersect_local] has already been pulled into object space.
#[enum_dispatch]
pub trait Primitive {
    /// Appends all intersections between `ray` (in object space) and this
    /// primitive onto `xs`, tagged with `shape` so shading can find its way
    /// back to the scene graph node.
    ///
    /// # Note
    /// Entries are appended in near-to-far order for this primitive, but `xs`
    /// as a whole is not re-sorted here.
    fn intersect_local(&self, ray: &Ray, shape: ShapeId, xs: &mut IntersectionList);

    /// The surface normal at `point` (in object space).
    ///
    /// `hit` carries the barycentric coordinates needed by smooth triangles;
    /// other primitives ignore it.
    fn normal_local(&self, point: Point3, hit: &Intersection) -> Vector3;

    /// The object-space bounding box. May extend to infinity (planes do)
    fn local_bounds(&self) -> Bounds;

    /// Maps `point` (in object space, assumed on the surface) to texture
    /// coordinates. Primitives without a meaningful parameterisation return
    /// the origin.
    fn uv_at(&self, point: Point3) -> (Number, Number) {
        let _ = point;
        (0., 0.)
    }
}

/// A detached [ShapeId] for unit tests that exercise a primitive's local
/// geometry without a scene graph. Never dereference it.
#[cfg(test)]
pub(crate) fn test_shape_id() -> ShapeId {
    let mut graph = crate::scene::graph::SceneGraph::new();
    graph.insert(Sphere)
}

/// All the primitives, [enum_dispatch]ed so the scene graph can store them
/// without boxing
#[enum_dispatch(Primitive)]
#[derive(Copy, Clone, Debug)]
pub enum PrimitiveInstance {
    Sphere,
    Plane,
    Cube,
    Cylinder,
    Cone,
    Disk,
    Capsule,
    Triangle,
    SmoothTriangle,
}
