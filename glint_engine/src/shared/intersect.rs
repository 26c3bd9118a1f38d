use crate::core::types::{Number, Point3, Vector3, SHADOW_BIAS};
use crate::scene::graph::{SceneGraph, ShapeId};
use crate::shared::math::{equal, reflect};
use crate::shared::ray::Ray;
use smallvec::SmallVec;
use std::cmp::Ordering;

/// A single ray-shape intersection.
///
/// `u`/`v` are barycentric coordinates of the hit and only carry meaning for
/// smooth triangles; everywhere else they stay zero.
#[derive(Copy, Clone, Debug)]
pub struct Intersection {
    /// Distance along the ray that the intersection occurred
    pub t: Number,
    pub shape: ShapeId,
    pub u: Number,
    pub v: Number,
}

impl Intersection {
    pub const fn new(t: Number, shape: ShapeId) -> Self { Self { t, shape, u: 0., v: 0. } }

    pub const fn new_uv(t: Number, shape: ShapeId, u: Number, v: Number) -> Self {
        Self { t, shape, u, v }
    }
}

impl PartialEq for Intersection {
    /// Same shape at (almost) the same distance; `u`/`v` don't participate
    fn eq(&self, other: &Self) -> bool { self.shape == other.shape && equal(self.t, other.t) }
}

impl PartialOrd for Intersection {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Number::partial_cmp(&self.t, &other.t) }
}

/// Scratch list for intersections along one ray.
///
/// Inlined up to 32 entries so the common case never touches the heap.
pub type IntersectionList = SmallVec<[Intersection; 32]>;

/// Sorts intersections by distance along the ray
pub fn sort(xs: &mut IntersectionList) {
    xs.sort_by(|a, b| {
        Number::partial_cmp(&a.t, &b.t).expect("intersection distance was NaN")
    });
}

/// The visible hit: the first intersection with `t >= 0` in a sorted list
pub fn hit(xs: &[Intersection]) -> Option<&Intersection> { xs.iter().find(|i| i.t >= 0.) }

/// Everything the shading code needs about a hit, precomputed once.
#[derive(Copy, Clone, Debug)]
pub struct Computations {
    pub t: Number,
    pub shape: ShapeId,
    pub point: Point3,
    pub eyev: Vector3,
    pub normalv: Vector3,
    pub reflectv: Vector3,
    /// True when the ray originated inside the shape
    pub inside: bool,
    /// Hit point nudged along the normal, for spawning shadow/reflection rays
    pub over_point: Point3,
    /// Hit point nudged against the normal, for spawning refraction rays
    pub under_point: Point3,
    /// Refractive index of the material being exited
    pub n1: Number,
    /// Refractive index of the material being entered
    pub n2: Number,
}

impl Ray {
    /// Precomputes the shading state for `hit`.
    ///
    /// `xs` must be the full sorted intersection list for this ray; it is
    /// walked to work out which materials the ray is passing between at the
    /// hit (`n1`/`n2`).
    pub fn prepare_computations(
        &self,
        hit: &Intersection,
        xs: &[Intersection],
        graph: &SceneGraph,
    ) -> Computations {
        let point = self.position(hit.t);
        let eyev = -self.direction();
        let mut normalv = graph.normal_at(hit.shape, point, hit);

        let inside = normalv.dot(eyev) < 0.;
        if inside {
            normalv = -normalv;
        }

        let reflectv = reflect(self.direction(), normalv);
        let over_point = point + normalv * SHADOW_BIAS;
        let under_point = point - normalv * SHADOW_BIAS;

        // Walk the full list, tracking which shapes contain the ray, to find
        // the refractive indices either side of the hit
        let mut containers: Vec<ShapeId> = Vec::new();
        let mut n1 = 1.0;
        let mut n2 = 1.0;
        for i in xs {
            let is_hit = i == hit;
            if is_hit {
                n1 = match containers.last() {
                    Some(inner) => graph.material(*inner).refractive_index(),
                    None => 1.0,
                };
            }

            match containers.iter().position(|s| *s == i.shape) {
                Some(idx) => {
                    containers.remove(idx);
                }
                None => containers.push(i.shape),
            }

            if is_hit {
                match containers.last() {
                    Some(inner) => {
                        n2 = graph.material(*inner).refractive_index();
                        break;
                    }
                    None => n2 = 1.0,
                }
            }
        }

        Computations {
            t: hit.t,
            shape: hit.shape,
            point,
            eyev,
            normalv,
            reflectv,
            inside,
            over_point,
            under_point,
            n1,
            n2,
        }
    }
}

/// Schlick's approximation to the Fresnel reflectance at the hit
pub fn schlick(comps: &Computations) -> Number {
    let mut cos = comps.eyev.dot(comps.normalv);

    if comps.n1 > comps.n2 {
        let n = comps.n1 / comps.n2;
        let sin2_t = n * n * (1. - cos * cos);
        if sin2_t > 1. {
            // Total internal reflection
            return 1.;
        }
        cos = Number::sqrt(1. - sin2_t);
    }

    let r0 = Number::powi((comps.n1 - comps.n2) / (comps.n1 + comps.n2), 2);
    r0 + (1. - r0) * Number::powi(1. - cos, 5)
}
