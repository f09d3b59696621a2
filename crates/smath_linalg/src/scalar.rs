//! Scalar helpers shared by the vector, matrix and rotation types

use std::f32::consts::PI;

/// Default tolerance for approximate comparisons
pub const EPSILON: f32 = 1e-5;

/// Magnitude at which an Euler extraction is treated as gimbal-locked
pub const GIMBAL_THRESHOLD: f32 = 0.99999;

/// Clamp `value` to the inclusive range `[min, max]`
///
/// NaN inputs pass through unchanged; callers feeding inverse trig functions
/// should only pass finite values.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Clamp to [-1, 1] so `asin`/`acos` never see a value pushed out of range by round-off
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    clamp(value, -1.0, 1.0)
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * (180.0 / PI)
}

/// Linear interpolation from `a` to `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Absolute-tolerance comparison
#[inline]
pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
    }

    #[test]
    fn test_clamp_unit_catches_round_off() {
        assert_eq!(clamp_unit(1.000_000_1), 1.0);
        assert_eq!(clamp_unit(-1.000_000_1), -1.0);
        assert!(!clamp_unit(1.000_000_1).acos().is_nan());
    }

    #[test]
    fn test_degree_conversion() {
        assert!(approx_eq(deg_to_rad(180.0), PI, EPSILON));
        assert!(approx_eq(rad_to_deg(PI / 2.0), 90.0, 1e-4));
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
    }
}
