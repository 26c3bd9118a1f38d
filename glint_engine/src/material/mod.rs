use crate::core::colour::Colour;
use crate::core::types::{Number, Point3};
use crate::pattern::Pattern;
use crate::scene::graph::{SceneGraph, ShapeId};
use crate::shared::math::equal;
use getset::{CopyGetters, Getters, Setters};

/// Phong surface parameters plus the reflection/refraction coefficients.
///
/// The base colour is always a [Pattern]; a plain colour is just a solid
/// pattern.
#[derive(Clone, Debug, Getters, CopyGetters, Setters)]
pub struct Material {
    #[getset(get = "pub", set = "pub")]
    pattern: Pattern,
    #[getset(get_copy = "pub", set = "pub")]
    ambient: Number,
    #[getset(get_copy = "pub", set = "pub")]
    diffuse: Number,
    #[getset(get_copy = "pub", set = "pub")]
    specular: Number,
    #[getset(get_copy = "pub", set = "pub")]
    shininess: Number,
    #[getset(get_copy = "pub", set = "pub")]
    reflective: Number,
    #[getset(get_copy = "pub", set = "pub")]
    transparency: Number,
    #[getset(get_copy = "pub", set = "pub")]
    refractive_index: Number,
    /// Whether this surface casts a shadow. Turning it off is handy for
    /// volumes like water surfaces that would otherwise black out everything
    /// beneath them.
    #[getset(get_copy = "pub", set = "pub")]
    shadow: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            pattern: Pattern::solid(Colour::WHITE),
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.,
            reflective: 0.,
            transparency: 0.,
            refractive_index: 1.,
            shadow: true,
        }
    }
}

impl Material {
    /// Replaces the pattern with a solid colour
    pub fn set_colour(&mut self, colour: Colour) -> &mut Self {
        self.pattern = Pattern::solid(colour);
        self
    }

    /// The pattern's colour at the origin; the base colour for solids
    pub fn colour(&self) -> Colour { self.pattern.colour_at(Point3::ZERO, None) }

    /// The surface colour at a world-space point, resolved through the
    /// shape's and the pattern's transforms
    pub fn colour_at(&self, graph: &SceneGraph, shape: ShapeId, world_point: Point3) -> Colour {
        self.pattern.shape_colour_at(graph, shape, world_point)
    }
}

impl PartialEq for Material {
    /// Scalar parameters only; patterns don't compare
    fn eq(&self, other: &Self) -> bool {
        equal(self.ambient, other.ambient)
            && equal(self.diffuse, other.diffuse)
            && equal(self.specular, other.specular)
            && equal(self.shininess, other.shininess)
            && equal(self.reflective, other.reflective)
            && equal(self.transparency, other.transparency)
            && equal(self.refractive_index, other.refractive_index)
            && self.shadow == other.shadow
    }
}
