use crate::core::types::{Number, Vector3, EPSILON};

/// Floating-point comparison with the engine-wide [EPSILON] tolerance
#[inline]
pub fn equal(a: Number, b: Number) -> bool { Number::abs(a - b) < EPSILON }

/// Calculates the vector reflection of vector `d` across the surface normal `n`
pub fn reflect(d: Vector3, n: Vector3) -> Vector3 { d - n * (2. * d.dot(n)) }

/// Solves `a*x^2 + b*x + c = 0`, returning the roots as `(t0, t1)` with `t0 <= t1`.
///
/// Uses the numerically stable variant that avoids catastrophic cancellation
/// when `b` is large compared to `4*a*c`.
///
/// # Note
/// A negative discriminant gives [None]. Callers must handle the degenerate
/// linear case (`a == 0`) themselves.
pub fn solve_quadratic(a: Number, b: Number, c: Number) -> Option<(Number, Number)> {
    let discriminant = (b * b) - (4. * a * c);
    if discriminant < 0. {
        return None;
    }

    let root = Number::sqrt(discriminant);
    let q = if b < 0. { -0.5 * (b - root) } else { -0.5 * (b + root) };
    let t0 = c / q;
    let t1 = q / a;

    if t0 <= t1 {
        Some((t0, t1))
    } else {
        Some((t1, t0))
    }
}
