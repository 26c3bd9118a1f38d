use crate::canvas::Canvas;
use crate::core::colour::Colour;
use crate::core::types::{Matrix4, Number, Point3};
use crate::scene::graph::{SceneGraph, ShapeId};
use crate::shared::transform::Transform;
use getset::Getters;

/// Context handed down to patterns that need the shape's surface
/// parameterisation (the UV-mapped kinds)
pub type PatternContext<'a> = Option<(&'a SceneGraph, ShapeId)>;

/// A surface pattern: a colouring rule plus its own transform on top of the
/// shape's.
///
/// The binary kinds (stripes, rings, ...) nest full patterns rather than bare
/// colours, so a stripe of gradients or a blend of checkers composes for
/// free.
#[derive(Clone, Debug, Getters)]
pub struct Pattern {
    #[getset(get = "pub")]
    transform: Transform,
    kind: PatternKind,
}

/// The two sub-patterns of a binary pattern
#[derive(Clone, Debug)]
pub struct BinaryPattern {
    a: Box<Pattern>,
    b: Box<Pattern>,
}

impl BinaryPattern {
    fn new(a: Pattern, b: Pattern) -> Self {
        Self {
            a: Box::new(a),
            b: Box::new(b),
        }
    }

    /// First sub-pattern's colour, in that pattern's own space
    fn colour_a(&self, p: Point3, ctx: PatternContext) -> Colour {
        self.a.colour_at(self.a.transform.inverse().transform_point3(p), ctx)
    }

    /// Second sub-pattern's colour, in that pattern's own space
    fn colour_b(&self, p: Point3, ctx: PatternContext) -> Colour {
        self.b.colour_at(self.b.transform.inverse().transform_point3(p), ctx)
    }
}

#[derive(Clone, Debug)]
pub enum PatternKind {
    Solid(Colour),
    /// Alternating bands along `x`
    Stripe(BinaryPattern),
    /// Linear blend along `x`, clamped outside `0..1`
    Gradient(BinaryPattern),
    /// Concentric bands in the `xz` plane
    Ring(BinaryPattern),
    /// Unit cubes alternating in all three dimensions
    Checkers(BinaryPattern),
    /// Blend by distance from the origin
    RadialGradient(BinaryPattern),
    /// Plain average of both sub-patterns
    Blend(BinaryPattern),
    UvCheckers {
        width: u32,
        height: u32,
        a: Colour,
        b: Colour,
    },
    /// Test card for UV mappings: a distinct colour in each corner
    UvAlignCheck {
        main: Colour,
        ul: Colour,
        ur: Colour,
        bl: Colour,
        br: Colour,
    },
    /// Image-mapped texture
    UvImage(Canvas),
}

// region Constructors

impl Pattern {
    pub fn new(kind: PatternKind) -> Self {
        Self {
            transform: Transform::default(),
            kind,
        }
    }

    pub fn solid(colour: Colour) -> Self { Self::new(PatternKind::Solid(colour)) }

    pub fn stripe(a: Colour, b: Colour) -> Self { Self::stripe_of(Self::solid(a), Self::solid(b)) }

    pub fn stripe_of(a: Pattern, b: Pattern) -> Self {
        Self::new(PatternKind::Stripe(BinaryPattern::new(a, b)))
    }

    pub fn gradient(a: Colour, b: Colour) -> Self {
        Self::gradient_of(Self::solid(a), Self::solid(b))
    }

    pub fn gradient_of(a: Pattern, b: Pattern) -> Self {
        Self::new(PatternKind::Gradient(BinaryPattern::new(a, b)))
    }

    pub fn ring(a: Colour, b: Colour) -> Self { Self::ring_of(Self::solid(a), Self::solid(b)) }

    pub fn ring_of(a: Pattern, b: Pattern) -> Self {
        Self::new(PatternKind::Ring(BinaryPattern::new(a, b)))
    }

    pub fn checkers(a: Colour, b: Colour) -> Self {
        Self::checkers_of(Self::solid(a), Self::solid(b))
    }

    pub fn checkers_of(a: Pattern, b: Pattern) -> Self {
        Self::new(PatternKind::Checkers(BinaryPattern::new(a, b)))
    }

    pub fn radial_gradient(a: Colour, b: Colour) -> Self {
        Self::radial_gradient_of(Self::solid(a), Self::solid(b))
    }

    pub fn radial_gradient_of(a: Pattern, b: Pattern) -> Self {
        Self::new(PatternKind::RadialGradient(BinaryPattern::new(a, b)))
    }

    pub fn blend_of(a: Pattern, b: Pattern) -> Self {
        Self::new(PatternKind::Blend(BinaryPattern::new(a, b)))
    }

    pub fn uv_checkers(width: u32, height: u32, a: Colour, b: Colour) -> Self {
        Self::new(PatternKind::UvCheckers { width, height, a, b })
    }

    pub fn uv_align_check(main: Colour, ul: Colour, ur: Colour, bl: Colour, br: Colour) -> Self {
        Self::new(PatternKind::UvAlignCheck { main, ul, ur, bl, br })
    }

    pub fn uv_image(canvas: Canvas) -> Self { Self::new(PatternKind::UvImage(canvas)) }

    pub fn with_transform(mut self, matrix: Matrix4) -> Self {
        self.set_transform(matrix);
        self
    }

    pub fn set_transform(&mut self, matrix: Matrix4) { self.transform = Transform::new(matrix); }
}

// endregion Constructors

// region Evaluation

impl Pattern {
    /// The colour of the surface at a world-space point: the point drops
    /// through the shape's transforms, then this pattern's own
    pub fn shape_colour_at(&self, graph: &SceneGraph, shape: ShapeId, world_point: Point3) -> Colour {
        let object_point = graph.world_to_object(shape, world_point);
        let pattern_point = self.transform.inverse().transform_point3(object_point);
        self.colour_at(pattern_point, Some((graph, shape)))
    }

    /// The colouring rule itself, on a point already in pattern space.
    ///
    /// The UV-mapped kinds need the shape context to parameterise the
    /// surface; without it they fall back to black.
    pub fn colour_at(&self, p: Point3, ctx: PatternContext) -> Colour {
        match &self.kind {
            PatternKind::Solid(colour) => *colour,

            PatternKind::Stripe(sub) => {
                if (p.x.floor() as i64) % 2 != 0 {
                    sub.colour_b(p, ctx)
                } else {
                    sub.colour_a(p, ctx)
                }
            }

            PatternKind::Gradient(sub) => {
                let a = sub.colour_a(p, ctx);
                let distance = sub.colour_b(p, ctx) - a;
                let fraction = p.x.clamp(0., 1.);
                a + distance * fraction
            }

            PatternKind::Ring(sub) => {
                let magnitude = Number::sqrt((p.x * p.x) + (p.z * p.z));
                if (magnitude.floor() as i64) % 2 == 0 {
                    sub.colour_a(p, ctx)
                } else {
                    sub.colour_b(p, ctx)
                }
            }

            PatternKind::Checkers(sub) => {
                let x = p.x.floor() as i64;
                let y = p.y.floor() as i64;
                let z = p.z.floor() as i64;
                if (x + y + z) % 2 == 0 {
                    sub.colour_a(p, ctx)
                } else {
                    sub.colour_b(p, ctx)
                }
            }

            PatternKind::RadialGradient(sub) => {
                let magnitude = p.length();
                let a = sub.colour_a(p, ctx);
                let distance = sub.colour_b(p, ctx) - a;
                a + distance * magnitude
            }

            PatternKind::Blend(sub) => (sub.colour_a(p, ctx) + sub.colour_b(p, ctx)) * 0.5,

            PatternKind::UvCheckers { .. } | PatternKind::UvAlignCheck { .. } | PatternKind::UvImage(_) => {
                let Some((graph, shape)) = ctx else {
                    return Colour::BLACK;
                };
                let (u, v) = graph.uv_at(shape, self.transform.inverse().transform_point3(p));
                self.uv_colour_at(u, v)
            }
        }
    }

    /// The colouring rule in texture space, for the UV-mapped kinds.
    /// Everything else is black here.
    pub fn uv_colour_at(&self, u: Number, v: Number) -> Colour {
        match &self.kind {
            PatternKind::UvCheckers { width, height, a, b } => {
                let u2 = (u * *width as Number).floor() as i64;
                let v2 = (v * *height as Number).floor() as i64;
                if (u2 + v2) % 2 == 0 {
                    *a
                } else {
                    *b
                }
            }

            PatternKind::UvAlignCheck { main, ul, ur, bl, br } => {
                if v > 0.8 {
                    if u < 0.2 {
                        return *ul;
                    }
                    if u > 0.8 {
                        return *ur;
                    }
                } else if v < 0.2 {
                    if u < 0.2 {
                        return *bl;
                    }
                    if u > 0.8 {
                        return *br;
                    }
                }
                *main
            }

            PatternKind::UvImage(canvas) => {
                let v = 1. - v;
                let x = Number::round(u * (canvas.width() - 1) as Number) as u32;
                let y = Number::round(v * (canvas.height() - 1) as Number) as u32;
                canvas.pixel(x, y)
            }

            _ => Colour::BLACK,
        }
    }
}

// endregion Evaluation
