//! End-to-end shading tests: whole-world intersection, shadows, reflection,
//! refraction and the Fresnel blend.

use approx::assert_abs_diff_eq;
use glint_engine::core::colour::Colour;
use glint_engine::core::types::Point3;
use glint_engine::light::PointLight;
use glint_engine::pattern::Pattern;
use glint_engine::scene::World;
use glint_engine::shape::{Plane, Sphere};
use glint_engine::shared::intersect::{self, Intersection, IntersectionList};
use glint_engine::shared::ray::Ray;
use glint_engine::shared::transform::translation;
use glam::DVec3;
use std::f64::consts::SQRT_2;

mod common;

use common::{default_world, glass_sphere};

#[test]
fn intersect_world_with_ray() {
    let w = default_world();
    let r = Ray::new(Point3::new(0., 0., -5.), DVec3::Z);
    let xs = w.intersect(&r);
    assert_eq!(xs.len(), 4);
    assert_abs_diff_eq!(xs[0].t, 4.);
    assert_abs_diff_eq!(xs[1].t, 4.5);
    assert_abs_diff_eq!(xs[2].t, 5.5);
    assert_abs_diff_eq!(xs[3].t, 6.);
}

#[test]
fn shading_an_intersection() {
    let w = default_world();
    let r = Ray::new(Point3::new(0., 0., -5.), DVec3::Z);
    let c = w.colour_at(&r);
    assert_abs_diff_eq!(c, Colour::new(0.38066, 0.47583, 0.2855));
}

#[test]
fn shading_an_intersection_from_the_inside() {
    let mut w = default_world();
    w.lights_mut().clear();
    w.insert_light(PointLight::new(Point3::new(0., 0.25, 0.), Colour::WHITE));

    let r = Ray::new(Point3::ZERO, DVec3::Z);
    let c = w.colour_at(&r);
    assert_abs_diff_eq!(c, Colour::splat(0.90498));
}

#[test]
fn colour_when_ray_misses() {
    let w = default_world();
    let r = Ray::new(Point3::new(0., 0., -5.), DVec3::Y);
    assert_eq!(w.colour_at(&r), Colour::BLACK);
}

#[test]
fn colour_with_intersection_behind_ray() {
    let mut w = default_world();
    let objects = w.objects().clone();
    for &shape in &objects {
        w.graph_mut().material_mut(shape).set_ambient(1.);
    }
    let inner = objects[1];

    // Inside the outer sphere, just in front of the inner one
    let r = Ray::new(Point3::new(0., 0., 0.75), DVec3::NEG_Z);
    let c = w.colour_at(&r);
    assert_abs_diff_eq!(c, w.graph().material(inner).colour());
}

// region Shadows

#[test]
fn no_shadow_when_nothing_blocks_the_light() {
    let w = default_world();
    let light_pos = Point3::new(-10., 10., -10.);
    assert!(!w.is_shadowed(Point3::new(0., 10., 0.), light_pos));
    assert!(!w.is_shadowed(Point3::new(-20., 20., -20.), light_pos));
    assert!(!w.is_shadowed(Point3::new(-2., 2., -2.), light_pos));
}

#[test]
fn shadow_when_object_between_point_and_light() {
    let w = default_world();
    assert!(w.is_shadowed(Point3::new(10., -10., 10.), Point3::new(-10., 10., -10.)));
}

#[test]
fn shade_hit_in_shadow() {
    let mut w = World::new();
    w.insert_light(PointLight::new(Point3::new(0., 0., -10.), Colour::WHITE));

    let s1 = w.graph_mut().insert(Sphere);
    w.insert_shape(s1);
    let s2 = w.graph_mut().insert(Sphere);
    w.graph_mut().set_transform(s2, translation(0., 0., 10.));
    w.insert_shape(s2);

    let r = Ray::new(Point3::new(0., 0., 5.), DVec3::Z);
    let c = w.colour_at(&r);
    assert_abs_diff_eq!(c, Colour::splat(0.1));
}

#[test]
fn shadowless_material_casts_no_shadow() {
    let mut w = default_world();
    let outer = w.objects()[0];
    w.graph_mut().material_mut(outer).set_shadow(false);
    assert!(!w.is_shadowed(Point3::new(10., -10., 10.), Point3::new(-10., 10., -10.)));
}

// endregion Shadows

// region Reflection

#[test]
fn reflected_colour_of_nonreflective_material() {
    let mut w = default_world();
    let inner = w.objects()[1];
    w.graph_mut().material_mut(inner).set_ambient(1.);

    let r = Ray::new(Point3::ZERO, DVec3::Z);
    let i = Intersection::new(1., inner);
    let mut xs = IntersectionList::new();
    xs.push(i);
    let comps = r.prepare_computations(&xs[0], &xs, w.graph());
    assert_eq!(w.reflected_colour(&comps, 4), Colour::BLACK);
}

fn world_with_reflective_floor() -> World {
    let mut w = default_world();
    let floor = w.graph_mut().insert(Plane);
    w.graph_mut().set_transform(floor, translation(0., -1., 0.));
    w.graph_mut().material_mut(floor).set_reflective(0.5);
    w.insert_shape(floor);
    w
}

#[test]
fn reflected_colour_of_reflective_material() {
    let w = world_with_reflective_floor();
    let floor = *w.objects().last().unwrap();

    let r = Ray::new(
        Point3::new(0., 0., -3.),
        DVec3::new(0., -SQRT_2 / 2., SQRT_2 / 2.),
    );
    let i = Intersection::new(SQRT_2, floor);
    let mut xs = IntersectionList::new();
    xs.push(i);
    let comps = r.prepare_computations(&xs[0], &xs, w.graph());
    let c = w.reflected_colour(&comps, 4);
    assert_abs_diff_eq!(c, Colour::new(0.19032, 0.2379, 0.14274), epsilon = 1e-3);
}

#[test]
fn shade_hit_with_reflective_material() {
    let w = world_with_reflective_floor();
    let r = Ray::new(
        Point3::new(0., 0., -3.),
        DVec3::new(0., -SQRT_2 / 2., SQRT_2 / 2.),
    );
    let c = w.colour_at(&r);
    assert_abs_diff_eq!(c, Colour::new(0.87677, 0.92436, 0.82918), epsilon = 1e-3);
}

#[test]
fn mutually_reflective_surfaces_terminate() {
    let mut w = World::new();
    w.insert_light(PointLight::new(Point3::ZERO, Colour::WHITE));

    let lower = w.graph_mut().insert(Plane);
    w.graph_mut().set_transform(lower, translation(0., -1., 0.));
    w.graph_mut().material_mut(lower).set_reflective(1.);
    w.insert_shape(lower);

    let upper = w.graph_mut().insert(Plane);
    w.graph_mut().set_transform(upper, translation(0., 1., 0.));
    w.graph_mut().material_mut(upper).set_reflective(1.);
    w.insert_shape(upper);

    // Must not recurse forever
    let _ = w.colour_at(&Ray::new(Point3::ZERO, DVec3::Y));
}

#[test]
fn reflected_colour_at_maximum_depth() {
    let w = world_with_reflective_floor();
    let floor = *w.objects().last().unwrap();

    let r = Ray::new(
        Point3::new(0., 0., -3.),
        DVec3::new(0., -SQRT_2 / 2., SQRT_2 / 2.),
    );
    let i = Intersection::new(SQRT_2, floor);
    let mut xs = IntersectionList::new();
    xs.push(i);
    let comps = r.prepare_computations(&xs[0], &xs, w.graph());
    assert_eq!(w.reflected_colour(&comps, 0), Colour::BLACK);
}

// endregion Reflection

// region Refraction

#[test]
fn refracted_colour_of_opaque_surface() {
    let w = default_world();
    let outer = w.objects()[0];
    let r = Ray::new(Point3::new(0., 0., -5.), DVec3::Z);
    let mut xs = IntersectionList::new();
    xs.push(Intersection::new(4., outer));
    xs.push(Intersection::new(6., outer));
    let comps = r.prepare_computations(&xs[0], &xs, w.graph());
    assert_eq!(w.refracted_colour(&comps, 5), Colour::BLACK);
}

#[test]
fn refracted_colour_at_maximum_depth() {
    let mut w = default_world();
    let outer = w.objects()[0];
    w.graph_mut()
        .material_mut(outer)
        .set_transparency(1.)
        .set_refractive_index(1.5);

    let r = Ray::new(Point3::new(0., 0., -5.), DVec3::Z);
    let mut xs = IntersectionList::new();
    xs.push(Intersection::new(4., outer));
    xs.push(Intersection::new(6., outer));
    let comps = r.prepare_computations(&xs[0], &xs, w.graph());
    assert_eq!(w.refracted_colour(&comps, 0), Colour::BLACK);
}

#[test]
fn refracted_colour_under_total_internal_reflection() {
    let mut w = default_world();
    let outer = w.objects()[0];
    w.graph_mut()
        .material_mut(outer)
        .set_transparency(1.)
        .set_refractive_index(1.5);

    let r = Ray::new(Point3::new(0., 0., SQRT_2 / 2.), DVec3::Y);
    let mut xs = IntersectionList::new();
    xs.push(Intersection::new(-SQRT_2 / 2., outer));
    xs.push(Intersection::new(SQRT_2 / 2., outer));
    // The ray starts inside the sphere, so look at the second intersection
    let comps = r.prepare_computations(&xs[1], &xs, w.graph());
    assert_eq!(w.refracted_colour(&comps, 5), Colour::BLACK);
}

#[test]
fn shade_hit_with_transparent_floor() {
    let mut w = default_world();

    let floor = w.graph_mut().insert(Plane);
    w.graph_mut().set_transform(floor, translation(0., -1., 0.));
    w.graph_mut()
        .material_mut(floor)
        .set_transparency(0.5)
        .set_refractive_index(1.5);
    w.insert_shape(floor);

    let ball = w.graph_mut().insert(Sphere);
    w.graph_mut().set_transform(ball, translation(0., -3.5, -0.5));
    w.graph_mut()
        .material_mut(ball)
        .set_colour(Colour::new(1., 0., 0.))
        .set_ambient(0.5);
    w.insert_shape(ball);

    let r = Ray::new(
        Point3::new(0., 0., -3.),
        DVec3::new(0., -SQRT_2 / 2., SQRT_2 / 2.),
    );
    let c = w.colour_at(&r);
    assert_abs_diff_eq!(c, Colour::new(0.93642, 0.68642, 0.08642), epsilon = 1e-3);
}

#[test]
fn shade_hit_with_reflective_transparent_floor() {
    let mut w = default_world();

    let floor = w.graph_mut().insert(Plane);
    w.graph_mut().set_transform(floor, translation(0., -1., 0.));
    w.graph_mut()
        .material_mut(floor)
        .set_reflective(0.5)
        .set_transparency(0.5)
        .set_refractive_index(1.5);
    w.insert_shape(floor);

    let ball = w.graph_mut().insert(Sphere);
    w.graph_mut().set_transform(ball, translation(0., -3.5, -0.5));
    w.graph_mut()
        .material_mut(ball)
        .set_colour(Colour::new(1., 0., 0.))
        .set_ambient(0.5);
    w.insert_shape(ball);

    let r = Ray::new(
        Point3::new(0., 0., -3.),
        DVec3::new(0., -SQRT_2 / 2., SQRT_2 / 2.),
    );
    let c = w.colour_at(&r);
    assert_abs_diff_eq!(c, Colour::new(0.93391, 0.69643, 0.69243), epsilon = 1e-3);
}

// endregion Refraction

// region Fresnel

#[test]
fn schlick_under_total_internal_reflection() {
    let mut w = World::new();
    let sphere = glass_sphere(&mut w);

    let r = Ray::new(Point3::new(0., 0., SQRT_2 / 2.), DVec3::Y);
    let mut xs = IntersectionList::new();
    xs.push(Intersection::new(-SQRT_2 / 2., sphere));
    xs.push(Intersection::new(SQRT_2 / 2., sphere));
    let comps = r.prepare_computations(&xs[1], &xs, w.graph());
    assert_abs_diff_eq!(intersect::schlick(&comps), 1.);
}

#[test]
fn schlick_with_perpendicular_ray() {
    let mut w = World::new();
    let sphere = glass_sphere(&mut w);

    let r = Ray::new(Point3::ZERO, DVec3::Y);
    let mut xs = IntersectionList::new();
    xs.push(Intersection::new(-1., sphere));
    xs.push(Intersection::new(1., sphere));
    let comps = r.prepare_computations(&xs[1], &xs, w.graph());
    assert_abs_diff_eq!(intersect::schlick(&comps), 0.04, epsilon = 1e-5);
}

#[test]
fn schlick_with_small_angle_and_n2_above_n1() {
    let mut w = World::new();
    let sphere = glass_sphere(&mut w);

    let r = Ray::new(Point3::new(0., 0.99, -2.), DVec3::Z);
    let mut xs = IntersectionList::new();
    xs.push(Intersection::new(1.8589, sphere));
    let comps = r.prepare_computations(&xs[0], &xs, w.graph());
    assert_abs_diff_eq!(intersect::schlick(&comps), 0.48873, epsilon = 1e-5);
}

// endregion Fresnel

#[test]
fn pattern_on_transformed_shape() {
    let mut w = World::new();
    let sphere = w.graph_mut().insert(Sphere);
    w.graph_mut()
        .set_transform(sphere, glint_engine::shared::transform::scaling(2., 2., 2.));
    w.graph_mut()
        .material_mut(sphere)
        .set_pattern(Pattern::stripe(Colour::WHITE, Colour::BLACK));
    w.insert_shape(sphere);

    let c = w
        .graph()
        .material(sphere)
        .colour_at(w.graph(), sphere, Point3::new(1.5, 0., 0.));
    assert_eq!(c, Colour::WHITE);
}
