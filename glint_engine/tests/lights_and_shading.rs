//! Light source and Phong shading tests.

use approx::assert_abs_diff_eq;
use glint_engine::core::colour::Colour;
use glint_engine::core::types::Point3;
use glint_engine::light::{lighting, AreaLight, Light, LightInstance, PointLight, Sequence};
use glint_engine::material::Material;
use glint_engine::scene::{SceneGraph, ShapeId};
use glint_engine::shape::Sphere;
use glam::DVec3;
use std::f64::consts::SQRT_2;

mod common;

use common::default_world;

fn sphere_in_graph() -> (SceneGraph, ShapeId) {
    let mut graph = SceneGraph::new();
    let sphere = graph.insert(Sphere);
    (graph, sphere)
}

// region Sequence

#[test]
fn sequence_cycles_through_its_values() {
    let seq = Sequence::new(vec![0.1, 0.5, 1.0]);
    assert_abs_diff_eq!(seq.next(), 0.1);
    assert_abs_diff_eq!(seq.next(), 0.5);
    assert_abs_diff_eq!(seq.next(), 1.0);
    assert_abs_diff_eq!(seq.next(), 0.1);
}

#[test]
fn constant_sequence_never_changes() {
    let seq = Sequence::constant(0.5);
    assert_abs_diff_eq!(seq.next(), 0.5);
    assert_abs_diff_eq!(seq.next(), 0.5);
}

// endregion Sequence

// region Point light

#[test]
fn point_light_has_single_sample() {
    let light = PointLight::new(Point3::new(0., 1., 2.), Colour::WHITE);
    assert_eq!(light.samples(), &[Point3::new(0., 1., 2.)]);
    assert_eq!(light.position(), Point3::new(0., 1., 2.));
    assert_eq!(light.intensity(), Colour::WHITE);
}

#[test]
fn point_light_intensity_is_binary() {
    let w = default_world();
    let light = w.lights()[0].clone();

    let cases = [
        (Point3::new(0., 1.0001, 0.), 1.0),
        (Point3::new(-1.0001, 0., 0.), 1.0),
        (Point3::new(0., 0., -1.0001), 1.0),
        (Point3::new(0., 0., 1.0001), 0.0),
        (Point3::new(1.0001, 0., 0.), 0.0),
        (Point3::new(0., -1.0001, 0.), 0.0),
        (Point3::ZERO, 0.0),
    ];
    for (point, expected) in cases {
        assert_abs_diff_eq!(light.intensity_at(point, &w), expected);
    }
}

// endregion Point light

// region Area light

#[test]
fn area_light_grid_layout() {
    let light = AreaLight::new(
        Point3::ZERO,
        Colour::WHITE,
        DVec3::new(2., 0., 0.),
        DVec3::new(0., 0., 1.),
        4,
        2,
    );
    assert_eq!(light.corner(), Point3::ZERO);
    assert_abs_diff_eq!(light.uvec(), DVec3::new(0.5, 0., 0.));
    assert_abs_diff_eq!(light.vvec(), DVec3::new(0., 0., 0.5));
    assert_eq!(light.usteps(), 4);
    assert_eq!(light.vsteps(), 2);
    assert_eq!(light.samples().len(), 8);
    assert_abs_diff_eq!(light.position(), DVec3::new(1., 0., 0.5));
}

#[test]
fn area_light_samples_cell_centres_by_default() {
    let light = AreaLight::new(
        Point3::ZERO,
        Colour::WHITE,
        DVec3::new(2., 0., 0.),
        DVec3::new(0., 0., 1.),
        4,
        2,
    );
    let cases = [
        (0, 0, DVec3::new(0.25, 0., 0.25)),
        (1, 0, DVec3::new(0.75, 0., 0.25)),
        (0, 1, DVec3::new(0.25, 0., 0.75)),
        (2, 0, DVec3::new(1.25, 0., 0.25)),
        (3, 1, DVec3::new(1.75, 0., 0.75)),
    ];
    for (u, v, expected) in cases {
        assert_abs_diff_eq!(light.point_on_light(u, v), expected);
    }
}

#[test]
fn jittered_area_light_samples() {
    let mut light = AreaLight::new(
        Point3::ZERO,
        Colour::WHITE,
        DVec3::new(2., 0., 0.),
        DVec3::new(0., 0., 1.),
        4,
        2,
    );
    light.set_jitter(Sequence::new(vec![0.3, 0.7]));

    let cases = [
        (0, 0, DVec3::new(0.15, 0., 0.35)),
        (1, 0, DVec3::new(0.65, 0., 0.35)),
        (0, 1, DVec3::new(0.15, 0., 0.85)),
        (2, 0, DVec3::new(1.15, 0., 0.35)),
        (3, 1, DVec3::new(1.65, 0., 0.85)),
    ];
    for (u, v, expected) in cases {
        assert_abs_diff_eq!(light.point_on_light(u, v), expected, epsilon = 1e-9);
    }
}

#[test]
fn area_light_intensity_is_fractional() {
    let w = default_world();
    let light = AreaLight::new(
        Point3::new(-0.5, -0.5, -5.),
        Colour::WHITE,
        DVec3::new(1., 0., 0.),
        DVec3::new(0., 1., 0.),
        2,
        2,
    );

    let cases = [
        (Point3::new(0., 0., 2.), 0.0),
        (Point3::new(1., -1., 2.), 0.25),
        (Point3::new(1.5, 0., 2.), 0.5),
        (Point3::new(1.25, 1.25, 3.), 0.75),
        (Point3::new(0., 0., -2.), 1.0),
    ];
    for (point, expected) in cases {
        assert_abs_diff_eq!(light.intensity_at(point, &w), expected);
    }
}

// endregion Area light

// region Phong shading

#[test]
fn lighting_with_eye_between_light_and_surface() {
    let (graph, sphere) = sphere_in_graph();
    let m = Material::default();
    let light = LightInstance::from(PointLight::new(Point3::new(0., 0., -10.), Colour::WHITE));

    let c = lighting(&m, &graph, sphere, &light, Point3::ZERO, DVec3::NEG_Z, DVec3::NEG_Z, 1.);
    assert_abs_diff_eq!(c, Colour::splat(1.9));
}

#[test]
fn lighting_with_eye_offset_45_degrees() {
    let (graph, sphere) = sphere_in_graph();
    let m = Material::default();
    let light = LightInstance::from(PointLight::new(Point3::new(0., 0., -10.), Colour::WHITE));

    let eyev = DVec3::new(0., SQRT_2 / 2., -SQRT_2 / 2.);
    let c = lighting(&m, &graph, sphere, &light, Point3::ZERO, eyev, DVec3::NEG_Z, 1.);
    assert_abs_diff_eq!(c, Colour::splat(1.0));
}

#[test]
fn lighting_with_light_offset_45_degrees() {
    let (graph, sphere) = sphere_in_graph();
    let m = Material::default();
    let light = LightInstance::from(PointLight::new(Point3::new(0., 10., -10.), Colour::WHITE));

    let c = lighting(&m, &graph, sphere, &light, Point3::ZERO, DVec3::NEG_Z, DVec3::NEG_Z, 1.);
    assert_abs_diff_eq!(c, Colour::splat(0.7364));
}

#[test]
fn lighting_with_eye_in_reflection_path() {
    let (graph, sphere) = sphere_in_graph();
    let m = Material::default();
    let light = LightInstance::from(PointLight::new(Point3::new(0., 10., -10.), Colour::WHITE));

    let eyev = DVec3::new(0., -SQRT_2 / 2., -SQRT_2 / 2.);
    let c = lighting(&m, &graph, sphere, &light, Point3::ZERO, eyev, DVec3::NEG_Z, 1.);
    assert_abs_diff_eq!(c, Colour::splat(1.6364));
}

#[test]
fn lighting_with_light_behind_surface() {
    let (graph, sphere) = sphere_in_graph();
    let m = Material::default();
    let light = LightInstance::from(PointLight::new(Point3::new(0., 0., 10.), Colour::WHITE));

    let c = lighting(&m, &graph, sphere, &light, Point3::ZERO, DVec3::NEG_Z, DVec3::NEG_Z, 1.);
    assert_abs_diff_eq!(c, Colour::splat(0.1));
}

#[test]
fn lighting_attenuated_by_light_intensity() {
    let (mut graph, sphere) = sphere_in_graph();
    graph
        .material_mut(sphere)
        .set_ambient(0.1)
        .set_diffuse(0.9)
        .set_specular(0.);
    let light = LightInstance::from(PointLight::new(Point3::new(0., 0., -10.), Colour::WHITE));

    let cases = [(1.0, 1.0), (0.5, 0.55), (0.0, 0.1)];
    for (intensity, expected) in cases {
        let c = lighting(
            graph.material(sphere),
            &graph,
            sphere,
            &light,
            Point3::new(0., 0., -1.),
            DVec3::NEG_Z,
            DVec3::NEG_Z,
            intensity,
        );
        assert_abs_diff_eq!(c, Colour::splat(expected));
    }
}

#[test]
fn lighting_averages_over_area_light_samples() {
    let (mut graph, sphere) = sphere_in_graph();
    graph
        .material_mut(sphere)
        .set_ambient(0.1)
        .set_diffuse(0.9)
        .set_specular(0.);
    let light = LightInstance::from(AreaLight::new(
        Point3::new(-0.5, -0.5, -5.),
        Colour::WHITE,
        DVec3::new(1., 0., 0.),
        DVec3::new(0., 1., 0.),
        2,
        2,
    ));
    let eye = Point3::new(0., 0., -5.);

    let cases = [
        (Point3::new(0., 0., -1.), 0.9965),
        (Point3::new(0., SQRT_2 / 2., -SQRT_2 / 2.), 0.6232),
    ];
    for (point, expected) in cases {
        let eyev = (eye - point).normalize();
        let c = lighting(
            graph.material(sphere),
            &graph,
            sphere,
            &light,
            point,
            eyev,
            point.normalize(),
            1.,
        );
        assert_abs_diff_eq!(c, Colour::splat(expected), epsilon = 1e-4);
    }
}

// endregion Phong shading
