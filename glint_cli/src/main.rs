//! Renders a small demo scene and writes it out as a PPM image.

use anyhow::Context;
use glam::DVec3;
use glint_engine::core::colour::Colour;
use glint_engine::light::{AreaLight, PointLight};
use glint_engine::scene::{Camera, World};
use glint_engine::shape::Sphere;
use glint_engine::shared::transform::{translation, view_transform};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Extra rays per pixel; `1` disables supersampling
const SAMPLES: u32 = 1;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let output = std::env::args().nth(1).unwrap_or_else(|| "render.ppm".into());

    let mut world = World::new();

    // Three mirrored spheres packed into a divided group
    let colours = [
        (translation(0., 0., 0.), Colour::new(1., 1., 0.)),
        (translation(1.65, 0., 0.), Colour::new(0., 1., 1.)),
        (translation(0.825, -1.65, 0.), Colour::new(1., 0., 1.)),
    ];
    let group = world.graph_mut().insert_group();
    for (transform, colour) in colours {
        let sphere = world.graph_mut().insert(Sphere);
        world.graph_mut().set_transform(sphere, transform);
        world
            .graph_mut()
            .material_mut(sphere)
            .set_colour(colour)
            .set_reflective(0.5)
            .set_specular(1.)
            .set_shininess(20.);
        world.graph_mut().add_child(group, sphere);
    }
    world.graph_mut().divide(group, 1);
    world.insert_shape(group);

    world.insert_light(PointLight::new(DVec3::new(-3., -0.8, -1.), Colour::WHITE));
    world.insert_light(PointLight::new(
        DVec3::new(640., 480., -10_000.),
        Colour::splat(0.5),
    ));
    world.insert_light(AreaLight::new(
        DVec3::new(0., 10., 10.),
        Colour::WHITE,
        DVec3::new(1., 0., 0.),
        DVec3::new(0., 1., 0.),
        16,
        16,
    ));

    let mut camera = Camera::new(640, 480, 1.);
    camera.set_transform(view_transform(DVec3::new(0., 0., -8.), DVec3::ZERO, DVec3::Y));

    let canvas = camera.render(&world, SAMPLES);
    canvas
        .write_ppm(&output)
        .with_context(|| format!("failed to write {output}"))?;
    info!(target: "cli", path = %output, "image written");

    Ok(())
}
