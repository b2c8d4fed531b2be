//! Helpers for methods that keep a sign-change interval.

/// `true` if `x` and `y` have opposite signs.
#[inline]
pub(crate) fn opposite_sign(x: f64, y: f64) -> bool {
    x.is_sign_positive() != y.is_sign_positive()
}

/// `true` if `x` and `y` share a sign.
#[inline]
pub(crate) fn same_sign(x: f64, y: f64) -> bool {
    !opposite_sign(x, y)
}

#[inline]
pub(crate) fn midpoint(a: f64, b: f64) -> f64 {
    a + (b - a) * 0.5
}

/// Bounds are usable: both finite and `a < b`.
#[inline]
pub(crate) fn valid_bounds(a: f64, b: f64) -> bool {
    a.is_finite() && b.is_finite() && a < b
}

/// x-intercept of the line through `(a, fa)` and `(b, fb)`.
///
/// `None` when `fb - fa` is too small relative to the values for the
/// intercept to mean anything; callers fall back to [`midpoint`].
#[inline]
pub(crate) fn secant_intercept((a, fa): (f64, f64), (b, fb): (f64, f64)) -> Option<f64> {
    let denom  = fb - fa;
    let scale  = fa.abs().max(fb.abs()).max(1.0);
    let thresh = f64::EPSILON * scale + f64::MIN_POSITIVE;
    if denom.abs() <= thresh {
        return None;
    }

    let x = (a * fb - b * fa) / denom;
    x.is_finite().then_some(x)
}
