use crate::core::types::{Matrix4, Number, Point3, INF};
use crate::shared::ray::Ray;
use getset::CopyGetters;

/// An axis-aligned bounding box, spanning the two corners `min` and `max`.
///
/// The default box is *empty*: `min` at positive infinity and `max` at
/// negative infinity, so that the first [Self::update] makes the box cover
/// exactly that point.
#[derive(CopyGetters, Copy, Clone, Debug, PartialEq)]
#[getset(get_copy = "pub")]
pub struct Bounds {
    /// The lower corner; the corner with the smallest coordinates
    min: Point3,
    /// The upper corner; the corner with the largest coordinates
    max: Point3,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Point3::splat(INF),
            max: Point3::splat(-INF),
        }
    }
}

// region Constructors

impl Bounds {
    pub const fn new(min: Point3, max: Point3) -> Self { Self { min, max } }

    /// The box that surrounds all of the given points
    pub fn from_points(points: impl IntoIterator<Item = Point3>) -> Self {
        let mut bounds = Self::default();
        for p in points {
            bounds.update(p);
        }
        bounds
    }
}

// endregion Constructors

// region Queries

impl Bounds {
    /// Grows the box (in place) to cover the given point
    pub fn update(&mut self, p: Point3) {
        self.min = Point3::min(self.min, p);
        self.max = Point3::max(self.max, p);
    }

    /// Grows the box (in place) to cover another box
    pub fn merge(&mut self, other: &Bounds) {
        self.update(other.min);
        self.update(other.max);
    }

    pub fn contains_point(&self, p: Point3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Checks whether the given ray passes through the box at some `t > 0`.
    ///
    /// This is correct even for rays parallel to an axis: dividing by a zero
    /// direction component yields infinities that still compare the right way.
    pub fn intersects(&self, ray: &Ray) -> bool {
        let origin = ray.origin();
        let inv_dir = ray.direction().recip();

        let tx1 = (self.min.x - origin.x) * inv_dir.x;
        let tx2 = (self.max.x - origin.x) * inv_dir.x;

        let mut tmin = Number::min(tx1, tx2);
        let mut tmax = Number::max(tx1, tx2);

        let ty1 = (self.min.y - origin.y) * inv_dir.y;
        let ty2 = (self.max.y - origin.y) * inv_dir.y;

        tmin = Number::max(tmin, Number::min(ty1, ty2));
        tmax = Number::min(tmax, Number::max(ty1, ty2));

        let tz1 = (self.min.z - origin.z) * inv_dir.z;
        let tz2 = (self.max.z - origin.z) * inv_dir.z;

        tmin = Number::max(tmin, Number::min(tz1, tz2));
        tmax = Number::min(tmax, Number::max(tz1, tz2));

        // Boxes behind the ray don't count
        tmax > Number::max(tmin, 0.)
    }

    /// Splits the box in half perpendicular to its longest axis.
    ///
    /// Ties go to `x` over `y` over `z`.
    pub fn split(&self) -> (Bounds, Bounds) {
        let size = self.max - self.min;
        let greatest = Number::max(size.x, Number::max(size.y, size.z));

        let (mut x0, mut y0, mut z0) = (self.min.x, self.min.y, self.min.z);
        let (mut x1, mut y1, mut z1) = (self.max.x, self.max.y, self.max.z);

        if greatest == size.x {
            x0 += size.x / 2.;
            x1 = x0;
        } else if greatest == size.y {
            y0 += size.y / 2.;
            y1 = y0;
        } else {
            z0 += size.z / 2.;
            z1 = z0;
        }

        let mid_min = Point3::new(x0, y0, z0);
        let mid_max = Point3::new(x1, y1, z1);

        let left = Bounds::new(self.min, mid_max);
        let right = Bounds::new(mid_min, self.max);
        (left, right)
    }

    /// The corners of the box
    pub fn corners(&self) -> [Point3; 8] {
        let (l, h) = (self.min, self.max);
        [
            Point3::new(l.x, l.y, l.z),
            Point3::new(l.x, l.y, h.z),
            Point3::new(l.x, h.y, l.z),
            Point3::new(l.x, h.y, h.z),
            Point3::new(h.x, l.y, l.z),
            Point3::new(h.x, l.y, h.z),
            Point3::new(h.x, h.y, l.z),
            Point3::new(h.x, h.y, h.z),
        ]
    }

    /// The axis-aligned box covering this box after transformation by `matrix`.
    ///
    /// Transforms all eight corners and re-wraps them, since the transformed
    /// box need not stay axis-aligned.
    pub fn transformed(&self, matrix: &Matrix4) -> Bounds {
        Self::from_points(self.corners().map(|c| matrix.transform_point3(c)))
    }
}

// endregion Queries
