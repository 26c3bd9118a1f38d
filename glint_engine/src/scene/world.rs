use crate::core::colour::Colour;
use crate::core::types::{Number, Point3, N_BOUNCE};
use crate::light::{lighting, Light, LightInstance};
use crate::material::Material;
use crate::scene::graph::{SceneGraph, ShapeId};
use crate::shared::intersect::{self, Computations, IntersectionList};
use crate::shared::ray::Ray;
use getset::Getters;

/// The complete renderable scene: a shape hierarchy plus the lights that
/// illuminate it.
///
/// Only the root shapes are stored in [`World::objects`]; children of groups
/// and CSG nodes are reached through the [`SceneGraph`] during traversal.
#[derive(Clone, Debug, Default, Getters)]
pub struct World {
    graph: SceneGraph,
    #[getset(get = "pub")]
    objects: Vec<ShapeId>,
    #[getset(get = "pub")]
    lights: Vec<LightInstance>,
}

impl World {
    pub fn new() -> Self { Self::default() }

    pub fn graph(&self) -> &SceneGraph { &self.graph }

    pub fn graph_mut(&mut self) -> &mut SceneGraph { &mut self.graph }

    /// Registers `shape` as a root object.
    ///
    /// # Note
    /// The shape must not later be attached to a group, otherwise it would be
    /// traversed twice.
    pub fn insert_shape(&mut self, shape: ShapeId) { self.objects.push(shape); }

    pub fn insert_light(&mut self, light: impl Into<LightInstance>) { self.lights.push(light.into()); }

    pub fn lights_mut(&mut self) -> &mut Vec<LightInstance> { &mut self.lights }

    pub fn material(&self, shape: ShapeId) -> &Material { self.graph.material(shape) }

    /// Intersects `ray` against every root object, returning all hits sorted
    /// by distance.
    pub fn intersect(&self, ray: &Ray) -> IntersectionList {
        let mut xs = IntersectionList::new();
        for &shape in &self.objects {
            self.graph.intersect(shape, ray, &mut xs);
        }
        intersect::sort(&mut xs);
        xs
    }

    /// The colour seen along `ray`, following reflection and refraction up to
    /// [`N_BOUNCE`] bounces.
    pub fn colour_at(&self, ray: &Ray) -> Colour { self.colour_at_depth(ray, N_BOUNCE) }

    pub fn colour_at_depth(&self, ray: &Ray, remaining: u8) -> Colour {
        let xs = self.intersect(ray);
        let Some(hit) = intersect::hit(&xs) else {
            return Colour::BLACK;
        };
        let comps = ray.prepare_computations(hit, &xs, &self.graph);
        self.shade_hit(&comps, remaining)
    }

    /// Shades a prepared hit: the Phong surface term for every light, plus
    /// the reflected and refracted contributions.
    pub fn shade_hit(&self, comps: &Computations, remaining: u8) -> Colour {
        let material = self.graph.material(comps.shape);

        let mut surface = Colour::BLACK;
        for light in &self.lights {
            let light_intensity = light.intensity_at(comps.over_point, self);
            surface += lighting(
                material,
                &self.graph,
                comps.shape,
                light,
                comps.over_point,
                comps.eyev,
                comps.normalv,
                light_intensity,
            );
        }

        let reflected = self.reflected_colour(comps, remaining);
        let refracted = self.refracted_colour(comps, remaining);

        // Fresnel blend when the surface is both reflective and transparent
        if material.reflective() > 0. && material.transparency() > 0. {
            let reflectance = intersect::schlick(comps);
            return surface + reflected * reflectance + refracted * (1. - reflectance);
        }

        surface + reflected + refracted
    }

    pub fn reflected_colour(&self, comps: &Computations, remaining: u8) -> Colour {
        if remaining < 1 {
            return Colour::BLACK;
        }
        let reflective = self.graph.material(comps.shape).reflective();
        if reflective == 0. {
            return Colour::BLACK;
        }

        let reflect_ray = Ray::new(comps.over_point, comps.reflectv);
        self.colour_at_depth(&reflect_ray, remaining - 1) * reflective
    }

    pub fn refracted_colour(&self, comps: &Computations, remaining: u8) -> Colour {
        if remaining < 1 {
            return Colour::BLACK;
        }
        let transparency = self.graph.material(comps.shape).transparency();
        if transparency == 0. {
            return Colour::BLACK;
        }

        // Snell's law, with the ratio inverted since we go from n1 into n2
        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eyev.dot(comps.normalv);
        let sin2_t = n_ratio * n_ratio * (1. - cos_i * cos_i);
        if sin2_t > 1. {
            // Total internal reflection
            return Colour::BLACK;
        }

        let cos_t = Number::sqrt(1. - sin2_t);
        let direction = comps.normalv * (n_ratio * cos_i - cos_t) - comps.eyev * n_ratio;
        let refract_ray = Ray::new(comps.under_point, direction);

        self.colour_at_depth(&refract_ray, remaining - 1) * transparency
    }

    /// Whether anything shadow-casting sits between `point` and
    /// `light_position`.
    pub fn is_shadowed(&self, point: Point3, light_position: Point3) -> bool {
        let v = light_position - point;
        let distance = v.length();
        let shadow_ray = Ray::new(point, v.normalize());

        let xs = self.intersect(&shadow_ray);
        match intersect::hit(&xs) {
            Some(hit) => self.graph.material(hit.shape).shadow() && hit.t < distance,
            None => false,
        }
    }
}
