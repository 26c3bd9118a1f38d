use crate::core::types::{Number, Point3, Vector3};
use crate::scene::graph::ShapeId;
use crate::shape::Primitive;
use crate::shared::bounds::Bounds;
use crate::shared::intersect::{Intersection, IntersectionList};
use crate::shared::ray::Ray;
use getset::CopyGetters;

/// A capsule (sphere-swept segment) from `pa` to `pb` with radius `ra`.
///
/// Unlike the quadric shapes this one reports only the nearest hit, which is
/// all the shading path ever consumes for an opaque surface.
#[derive(CopyGetters, Copy, Clone, Debug, PartialEq)]
#[getset(get_copy = "pub")]
pub struct Capsule {
    pa: Point3,
    pb: Point3,
    ra: Number,
}

impl Capsule {
    pub const fn new(pa: Point3, pb: Point3, ra: Number) -> Self { Self { pa, pb, ra } }
}

impl Primitive for Capsule {
    fn intersect_local(&self, ray: &Ray, shape: ShapeId, xs: &mut IntersectionList) {
        let ro = ray.origin();
        let rd = ray.direction();
        let ba = self.pb - self.pa;
        let oa = ro - self.pa;

        let baba = ba.dot(ba);
        let bard = ba.dot(rd);
        let baoa = ba.dot(oa);
        let rdoa = rd.dot(oa);
        let oaoa = oa.dot(oa);

        let a = baba - bard * bard;
        let b = baba * rdoa - baoa * bard;
        let c = baba * oaoa - baoa * baoa - self.ra * self.ra * baba;
        let h = b * b - a * c;
        if h < 0. {
            return;
        }

        let t = (-b - Number::sqrt(h)) / a;
        let y = baoa + t * bard;
        if y > 0. && y < baba {
            // Body of the capsule
            xs.push(Intersection::new(t, shape));
        } else {
            // Spherical end caps
            let oc = if y <= 0. { oa } else { ro - self.pb };
            let b = rd.dot(oc);
            let c = oc.dot(oc) - self.ra * self.ra;
            let h = b * b - c;
            if h > 0. {
                xs.push(Intersection::new(-b - Number::sqrt(h), shape));
            }
        }
    }

    fn normal_local(&self, point: Point3, _hit: &Intersection) -> Vector3 {
        let ba = self.pb - self.pa;
        let pa = point - self.pa;
        let h = Number::clamp(pa.dot(ba) / ba.dot(ba), 0., 1.);
        (pa - ba * h) / self.ra
    }

    fn local_bounds(&self) -> Bounds {
        let r = Vector3::splat(self.ra);
        Bounds::new(
            Point3::min(self.pa - r, self.pb - r),
            Point3::max(self.pa + r, self.pb + r),
        )
    }

    /// Cylindrical mapping around the capsule's own axis
    fn uv_at(&self, point: Point3) -> (Number, Number) {
        let w_vec = (self.pb - self.pa).normalize();
        let u_vec = w_vec.cross(Vector3::Z);
        let v_vec = u_vec.cross(w_vec).normalize();

        let rel = point - self.pa;
        let q = Vector3::new(u_vec.dot(rel), v_vec.dot(rel), w_vec.dot(rel));
        (Number::atan2(q.y, q.x), q.z)
    }
}
