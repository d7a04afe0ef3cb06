//! Angle utilities used across the detector pipeline.
//!
//! Level-line orientations live in `(-π, π]` as returned by `atan2`. Pixels
//! without a usable gradient carry the [`NOT_DEFINED`] sentinel, which is never
//! aligned with anything.

use std::f64::consts::PI;

/// Orientation stored for pixels whose gradient is at or below the noise threshold.
pub const NOT_DEFINED: f64 = -1024.0;

const TWO_PI: f64 = 2.0 * PI;
const THREE_HALVES_PI: f64 = 1.5 * PI;
const RELATIVE_ERROR_FACTOR: f64 = 100.0;

/// Relative floating point comparison with a tolerance of
/// `100 * f64::EPSILON`, floored at `f64::MIN_POSITIVE` for tiny magnitudes.
#[inline]
pub fn double_equal(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let abs_diff = (a - b).abs();
    let abs_max = a.abs().max(b.abs()).max(f64::MIN_POSITIVE);
    abs_diff / abs_max <= RELATIVE_ERROR_FACTOR * f64::EPSILON
}

/// Signed difference `a - b` wrapped into `(-π, π]`.
#[inline]
pub fn signed_angle_difference(a: f64, b: f64) -> f64 {
    let mut diff = a - b;
    while diff <= -PI {
        diff += TWO_PI;
    }
    while diff > PI {
        diff -= TWO_PI;
    }
    diff
}

/// Unsigned angular distance between `a` and `b`, in `[0, π]`.
#[inline]
pub fn absolute_angle_difference(a: f64, b: f64) -> f64 {
    signed_angle_difference(a, b).abs()
}

/// Whether `angle` lies within `precision` radians of `reference`.
///
/// Both angles are expected in `[-π, π]`. An undefined `angle` is never aligned.
#[inline]
pub fn is_aligned(angle: f64, reference: f64, precision: f64) -> bool {
    if angle == NOT_DEFINED {
        return false;
    }
    let mut diff = (reference - angle).abs();
    if diff > THREE_HALVES_PI {
        diff = (diff - TWO_PI).abs();
    }
    diff <= precision
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn double_equal_tolerates_rounding_only() {
        assert!(double_equal(0.1 + 0.2, 0.3));
        assert!(double_equal(0.0, 0.0));
        assert!(!double_equal(1.0, 1.0 + 1e-9));
        assert!(double_equal(0.0, 1e-322));
        assert!(!double_equal(0.0, 1e-300));
    }

    #[test]
    fn signed_difference_wraps() {
        assert_abs_diff_eq!(signed_angle_difference(PI - 0.1, -PI + 0.1), -0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(signed_angle_difference(-PI + 0.1, PI - 0.1), 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(signed_angle_difference(-PI, 0.0), PI, epsilon = 1e-12);
    }

    #[test]
    fn absolute_difference_is_symmetric() {
        let a = 0.25;
        let b = 2.7;
        assert_abs_diff_eq!(
            absolute_angle_difference(a, b),
            absolute_angle_difference(b, a),
            epsilon = 1e-12
        );
    }

    #[test]
    fn alignment_wraps_across_pi() {
        assert!(is_aligned(PI - 0.05, -PI + 0.05, 0.2));
        assert!(is_aligned(FRAC_PI_4, FRAC_PI_4 + 0.1, 0.1 + 1e-12));
        assert!(!is_aligned(0.0, FRAC_PI_2, FRAC_PI_4));
        assert!(!is_aligned(NOT_DEFINED, NOT_DEFINED, PI));
    }
}
