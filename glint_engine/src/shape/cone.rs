use crate::core::types::{Number, Point3, Vector3, EPSILON, INF};
use crate::scene::graph::ShapeId;
use crate::shape::Primitive;
use crate::shared::bounds::Bounds;
use crate::shared::intersect::{Intersection, IntersectionList};
use crate::shared::math::solve_quadratic;
use crate::shared::ray::Ray;
use getset::CopyGetters;

/// A double-napped cone around the `y` axis, apex at the origin, truncated to
/// `min..max` in `y`. The surface satisfies `x^2 + z^2 = y^2`, so the cap at
/// height `y` is a disk of radius `|y|`.
#[derive(CopyGetters, Copy, Clone, Debug, PartialEq)]
#[getset(get_copy = "pub")]
pub struct Cone {
    min: Number,
    max: Number,
    capped: bool,
}

impl Default for Cone {
    fn default() -> Self { Self::new(-INF, INF, false) }
}

impl Cone {
    pub const fn new(min: Number, max: Number, capped: bool) -> Self { Self { min, max, capped } }

    fn check_cap(ray: &Ray, t: Number, radius: Number) -> bool {
        let x = ray.origin().x + t * ray.direction().x;
        let z = ray.origin().z + t * ray.direction().z;
        (x * x) + (z * z) <= (radius * radius) + EPSILON
    }

    fn intersect_caps(&self, ray: &Ray, shape: ShapeId, xs: &mut IntersectionList) {
        if !self.capped || Number::abs(ray.direction().y) < EPSILON {
            return;
        }

        let t = (self.min - ray.origin().y) / ray.direction().y;
        if Self::check_cap(ray, t, self.min.abs()) {
            xs.push(Intersection::new(t, shape));
        }

        let t = (self.max - ray.origin().y) / ray.direction().y;
        if Self::check_cap(ray, t, self.max.abs()) {
            xs.push(Intersection::new(t, shape));
        }
    }
}

impl Primitive for Cone {
    fn intersect_local(&self, ray: &Ray, shape: ShapeId, xs: &mut IntersectionList) {
        let o = ray.origin();
        let d = ray.direction();

        let a = (d.x * d.x) - (d.y * d.y) + (d.z * d.z);
        let b = 2. * ((o.x * d.x) - (o.y * d.y) + (o.z * d.z));
        let c = (o.x * o.x) - (o.y * o.y) + (o.z * o.z);

        // A ray parallel to one half of the cone degenerates to a linear
        // equation with a single hit on the other half
        if Number::abs(a) < EPSILON {
            if Number::abs(b) >= EPSILON {
                let t = -c / (2. * b);
                xs.push(Intersection::new(t, shape));
                self.intersect_caps(ray, shape, xs);
            }
            return;
        }

        if let Some((t0, t1)) = solve_quadratic(a, b, c) {
            let y0 = o.y + t0 * d.y;
            if self.min < y0 && y0 < self.max {
                xs.push(Intersection::new(t0, shape));
            }

            let y1 = o.y + t1 * d.y;
            if self.min < y1 && y1 < self.max {
                xs.push(Intersection::new(t1, shape));
            }
        }

        self.intersect_caps(ray, shape, xs);
    }

    fn normal_local(&self, point: Point3, _hit: &Intersection) -> Vector3 {
        let mut y = Number::sqrt((point.x * point.x) + (point.z * point.z));
        if point.y > 0. {
            y = -y;
        }

        if y <= (self.max * self.max) && point.y >= (self.max - EPSILON) {
            Vector3::Y
        } else if y <= (self.min * self.min) && point.y <= (self.min + EPSILON) {
            -Vector3::Y
        } else {
            Vector3::new(point.x, y, point.z)
        }
    }

    fn local_bounds(&self) -> Bounds {
        let limit = Number::max(self.min.abs(), self.max.abs());
        Bounds::new(Point3::new(-limit, self.min, -limit), Point3::new(limit, self.max, limit))
    }
}
