// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

/// Zero-comparison tolerance used by the evaluator and the sampler
pub const EPSILON: f64 = 1e-6;

/// Whether `value` is within [`EPSILON`] of zero
#[inline]
pub fn near_zero(value: f64) -> bool {
    value.abs() <= EPSILON
}

/// Snap float noise around zero to exactly zero
#[inline]
pub fn snap_to_zero(value: f64) -> f64 {
    if near_zero(value) {
        0.0
    } else {
        value
    }
}

/// Parameter at which the segment `a -> b` crosses `target`
#[inline]
pub fn inverse_lerp(a: f32, b: f32, target: f32) -> f32 {
    (target - a) / (b - a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_zero() {
        assert_eq!(snap_to_zero(1e-7), 0.0);
        assert_eq!(snap_to_zero(-1e-6), 0.0);
        assert_eq!(snap_to_zero(1e-5), 1e-5);
        assert!(snap_to_zero(f64::NAN).is_nan());
    }

    #[test]
    fn test_inverse_lerp() {
        assert_eq!(inverse_lerp(0.0, 10.0, 5.0), 0.5);
        assert_eq!(inverse_lerp(4.0, 2.0, 3.0), 0.5);
    }
}
