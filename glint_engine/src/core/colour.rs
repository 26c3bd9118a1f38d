use crate::core::types::{Channel, Number};
use approx::AbsDiffEq;
use std::array;
use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// An RGB colour with [Channel] components.
///
/// Channels are not clamped; values outside `0..=1` are legal and only get
/// clipped when the colour is written out to an image format.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[repr(transparent)]
pub struct Colour(pub [Channel; 3]);

// region Constructors

impl Colour {
    pub const fn new(r: Channel, g: Channel, b: Channel) -> Self { Self([r, g, b]) }

    pub const fn splat(val: Channel) -> Self { Self([val; 3]) }
}

impl From<[Channel; 3]> for Colour {
    fn from(val: [Channel; 3]) -> Self { Self(val) }
}

// endregion Constructors

// region Known Colours

impl Colour {
    pub const BLACK: Self = Self::splat(0.);
    pub const WHITE: Self = Self::splat(1.);
}

// endregion Known Colours

// region Accessors

impl Colour {
    pub const fn red(&self) -> Channel { self.0[0] }
    pub const fn green(&self) -> Channel { self.0[1] }
    pub const fn blue(&self) -> Channel { self.0[2] }
}

// endregion Accessors

// region Operators

impl Colour {
    /// Maps each channel of the colour with the given closure, and returns the new colour
    #[inline]
    pub fn map(&self, op: impl Fn(Channel) -> Channel) -> Self { self.0.map(op).into() }
    /// Maps each channel of the colour with the channel of another, and returns the new colour
    #[inline]
    pub fn map2(&self, other: &Self, mut op: impl FnMut(Channel, Channel) -> Channel) -> Self {
        array::from_fn(|i| op(self.0[i], other.0[i])).into()
    }
}

impl Add for Colour {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { self.map2(&rhs, Channel::add) }
}
impl AddAssign for Colour {
    fn add_assign(&mut self, rhs: Self) { *self = *self + rhs; }
}
impl Sub for Colour {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { self.map2(&rhs, Channel::sub) }
}
/// Hadamard (channel-wise) product
impl Mul for Colour {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self { self.map2(&rhs, Channel::mul) }
}
impl Mul<Channel> for Colour {
    type Output = Self;
    fn mul(self, rhs: Channel) -> Self { self.map(|c| c * rhs) }
}
impl Mul<Number> for Colour {
    type Output = Self;
    fn mul(self, rhs: Number) -> Self { self * (rhs as Channel) }
}
impl Div<Channel> for Colour {
    type Output = Self;
    fn div(self, rhs: Channel) -> Self { self.map(|c| c / rhs) }
}

// endregion Operators

// region Approx

impl AbsDiffEq for Colour {
    type Epsilon = Channel;

    fn default_epsilon() -> Self::Epsilon { 1e-4 }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| Channel::abs_diff_eq(a, b, epsilon))
    }
}

// endregion Approx
