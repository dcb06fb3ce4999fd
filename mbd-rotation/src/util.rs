//! Scalar comparison and angle-wrapping helpers.

use std::f64::consts::PI;

/// Absolute tolerance used by [`close_to`] and the unit-quaternion test.
pub const TOLERANCE: f64 = 1e-6;

/// Absolute closeness: |a - b| < [`TOLERANCE`].
#[must_use]
pub fn close_to(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE
}

/// Wrap an angle into (-pi, pi].
///
/// The boundary values +pi and -pi are both returned unchanged.
#[must_use]
pub fn wrap_angle_to_pi(angle: f64) -> f64 {
    let mut wrapped = angle;
    while wrapped > PI {
        wrapped -= 2.0 * PI;
    }
    while wrapped < -PI {
        wrapped += 2.0 * PI;
    }
    wrapped
}
