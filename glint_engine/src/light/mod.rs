use crate::core::colour::Colour;
use crate::core::types::{Channel, Number, Point3, Vector3};
use crate::material::Material;
use crate::scene::graph::{SceneGraph, ShapeId};
use crate::scene::world::World;
use crate::shared::math::{equal, reflect};
use enum_dispatch::enum_dispatch;
use getset::CopyGetters;

pub mod sequence;

pub use self::sequence::Sequence;

/// A light source.
///
/// Every light exposes a set of sample points; shading averages the Phong
/// terms over them, which is what turns hard shadows soft for area lights.
#[enum_dispatch]
pub trait Light {
    /// Fraction of this light reaching `point`, shadow-tested through the
    /// world. `0.0` is fully shadowed, `1.0` fully lit.
    fn intensity_at(&self, point: Point3, world: &World) -> Number;

    /// Nominal position (for an area light, its centre)
    fn position(&self) -> Point3;

    fn intensity(&self) -> Colour;

    /// The cached sample points shading iterates over
    fn samples(&self) -> &[Point3];
}

#[enum_dispatch(Light)]
#[derive(Clone, Debug, PartialEq)]
pub enum LightInstance {
    PointLight,
    AreaLight,
}

// region Point light

#[derive(Clone, Debug)]
pub struct PointLight {
    position: Point3,
    intensity: Colour,
    samples: [Point3; 1],
}

impl PointLight {
    pub fn new(position: Point3, intensity: Colour) -> Self {
        Self {
            position,
            intensity,
            samples: [position],
        }
    }
}

impl Light for PointLight {
    fn intensity_at(&self, point: Point3, world: &World) -> Number {
        if world.is_shadowed(point, self.position) {
            0.
        } else {
            1.
        }
    }

    fn position(&self) -> Point3 { self.position }

    fn intensity(&self) -> Colour { self.intensity }

    fn samples(&self) -> &[Point3] { &self.samples }
}

impl PartialEq for PointLight {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.intensity == other.intensity
    }
}

// endregion Point light

// region Area light

/// A rectangular light panel, sampled on a `usteps * vsteps` grid.
///
/// The sample cache is built once at construction with the jitter source in
/// place at that time; [Light::intensity_at] re-derives its points on every
/// query, so replacing the jitter afterwards only affects shadow coverage.
#[derive(Clone, Debug, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct AreaLight {
    corner: Point3,
    /// One grid cell along the first edge
    uvec: Vector3,
    /// One grid cell along the second edge
    vvec: Vector3,
    usteps: u32,
    vsteps: u32,
    #[getset(skip)]
    position: Point3,
    #[getset(skip)]
    intensity: Colour,
    #[getset(skip)]
    samples: Vec<Point3>,
    #[getset(skip)]
    jitter: Sequence,
}

impl AreaLight {
    pub fn new(
        corner: Point3,
        intensity: Colour,
        v1: Vector3,
        v2: Vector3,
        usteps: u32,
        vsteps: u32,
    ) -> Self {
        let mut light = Self {
            corner,
            uvec: v1 / usteps as Number,
            vvec: v2 / vsteps as Number,
            usteps,
            vsteps,
            position: corner + (v1 + v2) / 2.,
            intensity,
            samples: Vec::with_capacity((usteps * vsteps) as usize),
            jitter: Sequence::default(),
        };

        for v in 0..vsteps {
            for u in 0..usteps {
                let sample = light.point_on_light(u, v);
                light.samples.push(sample);
            }
        }

        light
    }

    /// A jittered point within grid cell `(u, v)`
    pub fn point_on_light(&self, u: u32, v: u32) -> Point3 {
        self.corner
            + self.uvec * (u as Number + self.jitter.next())
            + self.vvec * (v as Number + self.jitter.next())
    }

    pub fn set_jitter(&mut self, jitter: Sequence) { self.jitter = jitter; }
}

impl Light for AreaLight {
    fn intensity_at(&self, point: Point3, world: &World) -> Number {
        let mut total = 0.;
        for v in 0..self.vsteps {
            for u in 0..self.usteps {
                let light_p = self.point_on_light(u, v);
                if !world.is_shadowed(point, light_p) {
                    total += 1.;
                }
            }
        }
        total / self.samples.len() as Number
    }

    fn position(&self) -> Point3 { self.position }

    fn intensity(&self) -> Colour { self.intensity }

    fn samples(&self) -> &[Point3] { &self.samples }
}

impl PartialEq for AreaLight {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.intensity == other.intensity
    }
}

// endregion Area light

// region Phong shading

/// The Phong lighting model, averaged over the light's sample points.
///
/// `light_intensity` is the shadow coverage from [Light::intensity_at]; at
/// zero only the ambient term survives.
#[allow(clippy::too_many_arguments)]
pub fn lighting(
    material: &Material,
    graph: &SceneGraph,
    shape: ShapeId,
    light: &LightInstance,
    point: Point3,
    eyev: Vector3,
    normalv: Vector3,
    light_intensity: Number,
) -> Colour {
    // Combine the surface colour with the light's colour
    let effective_colour = material.colour_at(graph, shape, point) * light.intensity();

    let ambient = effective_colour * material.ambient();

    if equal(light_intensity, 0.) {
        return ambient;
    }

    let mut sum = Colour::BLACK;
    for &sample in light.samples() {
        let lightv = (sample - point).normalize();

        // Cosine between the light vector and the normal; negative means the
        // light is behind the surface
        let light_dot_normal = lightv.dot(normalv);
        if light_dot_normal < 0. {
            continue;
        }

        sum += effective_colour * material.diffuse() * light_dot_normal;

        // Cosine between the reflection vector and the eye; negative means
        // the highlight reflects away from the viewer
        let reflectv = reflect(-lightv, normalv);
        let reflect_dot_eye = reflectv.dot(eyev);
        if reflect_dot_eye > 0. {
            let factor = Number::powf(reflect_dot_eye, material.shininess());
            sum += light.intensity() * material.specular() * factor;
        }
    }

    ambient + (sum / light.samples().len() as Channel) * light_intensity
}

// endregion Phong shading
