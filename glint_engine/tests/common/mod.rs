//! Shared scene fixtures for the integration tests.

use glint_engine::core::colour::Colour;
use glint_engine::core::types::Point3;
use glint_engine::light::PointLight;
use glint_engine::scene::{ShapeId, World};
use glint_engine::shape::Sphere;
use glint_engine::shared::transform::scaling;

/// The canonical two-sphere test world: an outer green-ish sphere with an
/// inner sphere at half scale, lit by a single white point light.
pub fn default_world() -> World {
    let mut world = World::new();

    let outer = world.graph_mut().insert(Sphere);
    world
        .graph_mut()
        .material_mut(outer)
        .set_colour(Colour::new(0.8, 1.0, 0.6))
        .set_diffuse(0.7)
        .set_specular(0.2);
    world.insert_shape(outer);

    let inner = world.graph_mut().insert(Sphere);
    world.graph_mut().set_transform(inner, scaling(0.5, 0.5, 0.5));
    world.insert_shape(inner);

    world.insert_light(PointLight::new(
        Point3::new(-10., 10., -10.),
        Colour::WHITE,
    ));

    world
}

/// Inserts a fully transparent sphere with the refractive index of glass.
#[allow(dead_code)]
pub fn glass_sphere(world: &mut World) -> ShapeId {
    let sphere = world.graph_mut().insert(Sphere);
    world
        .graph_mut()
        .material_mut(sphere)
        .set_transparency(1.0)
        .set_refractive_index(1.5);
    world.insert_shape(sphere);
    sphere
}
