use crate::core::types::{Matrix4, Number, Point3, Vector3};
use crate::material::Material;
use crate::shape::{Primitive, PrimitiveInstance};
use crate::shared::bounds::Bounds;
use crate::shared::intersect::{self, Intersection, IntersectionList};
use crate::shared::ray::Ray;
use crate::shared::transform::Transform;
use indextree::{Arena, NodeId};
use tracing::debug;

/// Handle to a node in a [SceneGraph].
///
/// Plain index, cheap to copy; only meaningful for the graph that issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShapeId(NodeId);

/// The boolean operation of a CSG node
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CsgOp {
    Union,
    Intersection,
    Difference,
}

impl CsgOp {
    /// Whether an intersection survives the boolean, given which child was
    /// hit (`lhit`) and whether the ray is currently inside each child
    pub fn intersection_allowed(self, lhit: bool, inl: bool, inr: bool) -> bool {
        match self {
            CsgOp::Union => (lhit && !inr) || (!lhit && !inl),
            CsgOp::Intersection => (lhit && inr) || (!lhit && inl),
            CsgOp::Difference => (lhit && !inr) || (!lhit && inl),
        }
    }
}

/// What a scene graph node actually is
#[derive(Copy, Clone, Debug)]
pub enum NodeKind {
    /// A leaf with geometry
    Primitive(PrimitiveInstance),
    /// An interior node that only aggregates children
    Group,
    /// A boolean combination of exactly two subtrees
    Csg(CsgOp),
}

/// One node of the scene graph: geometry (or grouping), plus the transform,
/// material and cached bounds every node carries.
#[derive(Clone, Debug)]
pub struct ShapeNode {
    kind: NodeKind,
    transform: Transform,
    material: Material,
    /// Bounding box in this node's own space (for groups, the merge of the
    /// children's parent-space boxes)
    bounds: Bounds,
    /// [Self::bounds] pushed through [Self::transform], i.e. in the parent's
    /// space
    bounds_transform: Bounds,
}

impl ShapeNode {
    pub fn kind(&self) -> &NodeKind { &self.kind }
    pub fn transform(&self) -> &Transform { &self.transform }
    pub fn material(&self) -> &Material { &self.material }
    pub fn bounds(&self) -> Bounds { self.bounds }
    pub fn bounds_transform(&self) -> Bounds { self.bounds_transform }
}

/// The shape hierarchy of a scene, stored as a flat arena.
///
/// Parent links make the world/object space conversions walk the tree
/// upwards, so a shape deep inside nested groups still resolves its world
/// transform correctly.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    arena: Arena<ShapeNode>,
}

impl Default for SceneGraph {
    fn default() -> Self { Self { arena: Arena::new() } }
}

// region Construction

impl SceneGraph {
    pub fn new() -> Self { Self::default() }

    /// Adds a primitive as a new detached root, returning its handle
    pub fn insert(&mut self, primitive: impl Into<PrimitiveInstance>) -> ShapeId {
        let primitive = primitive.into();
        let bounds = primitive.local_bounds();
        ShapeId(self.arena.new_node(ShapeNode {
            kind: NodeKind::Primitive(primitive),
            transform: Transform::default(),
            material: Material::default(),
            bounds,
            bounds_transform: bounds,
        }))
    }

    /// Adds an empty group as a new detached root
    pub fn insert_group(&mut self) -> ShapeId {
        ShapeId(self.arena.new_node(ShapeNode {
            kind: NodeKind::Group,
            transform: Transform::default(),
            material: Material::default(),
            bounds: Bounds::default(),
            bounds_transform: Bounds::default(),
        }))
    }

    /// Combines two detached subtrees under a new CSG node.
    ///
    /// # Panics
    /// Both operands must be roots (not already part of another subtree).
    pub fn insert_csg(&mut self, op: CsgOp, left: ShapeId, right: ShapeId) -> ShapeId {
        assert!(
            self.parent(left).is_none() && self.parent(right).is_none(),
            "CSG operands must be detached subtrees"
        );
        let id = ShapeId(self.arena.new_node(ShapeNode {
            kind: NodeKind::Csg(op),
            transform: Transform::default(),
            material: Material::default(),
            bounds: Bounds::default(),
            bounds_transform: Bounds::default(),
        }));
        id.0.append(left.0, &mut self.arena);
        id.0.append(right.0, &mut self.arena);
        self.update_bounds(id);
        id
    }

    /// Moves a detached subtree into a group, growing the group's bounds
    ///
    /// # Panics
    /// `group` must be a [NodeKind::Group], and `child` must be detached.
    pub fn add_child(&mut self, group: ShapeId, child: ShapeId) {
        assert!(
            matches!(self.node(group).kind, NodeKind::Group),
            "add_child target must be a group"
        );
        assert!(self.parent(child).is_none(), "child is already attached");
        group.0.append(child.0, &mut self.arena);
        self.update_bounds(group);
    }
}

// endregion Construction

// region Accessors

impl SceneGraph {
    pub fn node(&self, id: ShapeId) -> &ShapeNode { self.arena[id.0].get() }

    pub fn parent(&self, id: ShapeId) -> Option<ShapeId> { self.arena[id.0].parent().map(ShapeId) }

    pub fn children(&self, id: ShapeId) -> impl Iterator<Item = ShapeId> + '_ {
        id.0.children(&self.arena).map(ShapeId)
    }

    pub fn child_count(&self, id: ShapeId) -> usize { id.0.children(&self.arena).count() }

    pub fn material(&self, id: ShapeId) -> &Material { &self.arena[id.0].get().material }

    pub fn material_mut(&mut self, id: ShapeId) -> &mut Material {
        &mut self.arena[id.0].get_mut().material
    }

    pub fn set_material(&mut self, id: ShapeId, material: Material) {
        self.arena[id.0].get_mut().material = material;
    }

    /// Replaces the node's transform and refreshes its parent-space bounds
    pub fn set_transform(&mut self, id: ShapeId, matrix: Matrix4) {
        let node = self.arena[id.0].get_mut();
        node.transform = Transform::new(matrix);
        node.bounds_transform = node.bounds.transformed(&matrix);
    }

    /// True when `candidate` is `ancestor` itself or lies anywhere in its
    /// subtree
    pub fn includes(&self, ancestor: ShapeId, candidate: ShapeId) -> bool {
        candidate.0.ancestors(&self.arena).any(|n| n == ancestor.0)
    }

    /// Texture coordinates on shape `id` at an object-space point. Interior
    /// nodes have no surface, so they map everything to the origin.
    pub fn uv_at(&self, id: ShapeId, point: Point3) -> (Number, Number) {
        match &self.node(id).kind {
            NodeKind::Primitive(primitive) => primitive.uv_at(point),
            _ => (0., 0.),
        }
    }

    /// The two operands of a CSG node, in `(left, right)` order
    ///
    /// # Panics
    /// `csg` must have exactly two children.
    pub fn csg_children(&self, csg: ShapeId) -> (ShapeId, ShapeId) {
        let mut children = self.children(csg);
        let left = children.next().expect("CSG node is missing its left operand");
        let right = children.next().expect("CSG node is missing its right operand");
        (left, right)
    }
}

// endregion Accessors

// region Space conversions

impl SceneGraph {
    /// Pulls a world-space point down through every ancestor transform into
    /// `id`'s object space
    pub fn world_to_object(&self, id: ShapeId, world_point: Point3) -> Point3 {
        let point = match self.parent(id) {
            Some(parent) => self.world_to_object(parent, world_point),
            None => world_point,
        };
        self.node(id).transform.inverse().transform_point3(point)
    }

    /// Pushes an object-space normal up through every ancestor transform into
    /// world space, re-normalising at each level
    pub fn normal_to_world(&self, id: ShapeId, normal: Vector3) -> Vector3 {
        let normal = self
            .node(id)
            .transform
            .inverse()
            .transpose()
            .transform_vector3(normal)
            .normalize();
        match self.parent(id) {
            Some(parent) => self.normal_to_world(parent, normal),
            None => normal,
        }
    }

    /// The world-space surface normal at `world_point` on shape `id`
    ///
    /// # Panics
    /// `id` must be a primitive; groups and CSG nodes have no surface of
    /// their own.
    pub fn normal_at(&self, id: ShapeId, world_point: Point3, hit: &Intersection) -> Vector3 {
        let object_point = self.world_to_object(id, world_point);
        let local_normal = match &self.node(id).kind {
            NodeKind::Primitive(primitive) => primitive.normal_local(object_point, hit),
            NodeKind::Group => unreachable!("a group has no surface normal"),
            NodeKind::Csg(_) => unreachable!("a CSG node has no surface normal"),
        };
        self.normal_to_world(id, local_normal)
    }
}

// endregion Space conversions

// region Intersection

impl SceneGraph {
    /// Intersects `ray` (in the parent space of `id`) against the subtree
    /// rooted at `id`, appending onto `xs`.
    ///
    /// Groups and CSG nodes are gated on their local bounding box before any
    /// children are visited.
    pub fn intersect(&self, id: ShapeId, ray: &Ray, xs: &mut IntersectionList) {
        let node = self.node(id);
        let local = ray.transformed(&node.transform.inverse());

        match &node.kind {
            NodeKind::Primitive(primitive) => primitive.intersect_local(&local, id, xs),
            NodeKind::Group => {
                if node.bounds.intersects(&local) {
                    for child in self.children(id) {
                        self.intersect(child, &local, xs);
                    }
                }
            }
            NodeKind::Csg(_) => {
                if node.bounds.intersects(&local) {
                    let (left, right) = self.csg_children(id);
                    let mut inner = IntersectionList::new();
                    self.intersect(left, &local, &mut inner);
                    self.intersect(right, &local, &mut inner);
                    intersect::sort(&mut inner);
                    xs.extend(self.filter_intersections(id, &inner));
                }
            }
        }
    }

    /// Keeps only the intersections that lie on the CSG result's surface.
    ///
    /// Walks the sorted list, tracking containment in each operand, and asks
    /// the operation which boundary crossings survive.
    pub fn filter_intersections(&self, csg: ShapeId, xs: &[Intersection]) -> IntersectionList {
        let op = match self.node(csg).kind {
            NodeKind::Csg(op) => op,
            _ => unreachable!("filter_intersections called on a non-CSG node"),
        };
        let (left, _) = self.csg_children(csg);

        let mut inl = false;
        let mut inr = false;
        let mut result = IntersectionList::new();

        for i in xs {
            let lhit = self.includes(left, i.shape);

            if op.intersection_allowed(lhit, inl, inr) {
                result.push(*i);
            }

            if lhit {
                inl = !inl;
            } else {
                inr = !inr;
            }
        }

        result
    }
}

// endregion Intersection

// region Bounds maintenance and subdivision

impl SceneGraph {
    /// Recomputes an interior node's bounds from its children's parent-space
    /// boxes
    fn update_bounds(&mut self, id: ShapeId) {
        let mut merged = Bounds::default();
        for child in id.0.children(&self.arena) {
            merged.merge(&self.arena[child].get().bounds_transform);
        }
        let node = self.arena[id.0].get_mut();
        node.bounds = merged;
        node.bounds_transform = merged.transformed(&node.transform.matrix());
    }

    /// Splits a group's bounds in half and moves every child that fits
    /// entirely inside one half into a fresh group for that half.
    ///
    /// Children straddling the split plane stay where they are. The two new
    /// groups are returned detached; the caller decides where they go.
    pub fn partition_children(&mut self, group: ShapeId) -> (ShapeId, ShapeId) {
        let (left_bounds, right_bounds) = self.node(group).bounds.split();
        let left = self.insert_group();
        let right = self.insert_group();

        let children: Vec<NodeId> = group.0.children(&self.arena).collect();
        for child in children {
            let child_bounds = self.arena[child].get().bounds_transform;
            if left_bounds.contains_bounds(&child_bounds) {
                child.detach(&mut self.arena);
                self.add_child(left, ShapeId(child));
            } else if right_bounds.contains_bounds(&child_bounds) {
                child.detach(&mut self.arena);
                self.add_child(right, ShapeId(child));
            }
        }

        (left, right)
    }

    /// Recursively reorganises groups into a bounding volume hierarchy.
    ///
    /// Any group with at least `threshold` children gets partitioned; each
    /// non-empty half becomes a nested subgroup (even a half with a single
    /// member). Recursion then descends into every child, so freshly created
    /// subgroups may split again.
    pub fn divide(&mut self, id: ShapeId, threshold: usize) {
        match self.node(id).kind {
            NodeKind::Primitive(_) => {}
            NodeKind::Group => {
                if threshold <= self.child_count(id) {
                    let before = self.child_count(id);
                    let (left, right) = self.partition_children(id);

                    for half in [left, right] {
                        if self.child_count(half) > 0 {
                            self.add_child(id, half);
                        } else {
                            half.0.remove(&mut self.arena);
                        }
                    }
                    debug!(target: "scene", before, after = self.child_count(id), "divided group");
                }

                let children: Vec<ShapeId> = self.children(id).collect();
                for child in children {
                    self.divide(child, threshold);
                }
                self.update_bounds(id);
            }
            NodeKind::Csg(_) => {
                let (left, right) = self.csg_children(id);
                self.divide(left, threshold);
                self.divide(right, threshold);
                self.update_bounds(id);
            }
        }
    }
}

// endregion Bounds maintenance and subdivision
