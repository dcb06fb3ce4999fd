//! Maps between rotation vectors, quaternions, and rotation matrices.
//!
//! The exponential map [`quaternion_from_rotation_vector`] and its
//! logarithm [`rotation_vector_from_quaternion`] are the pair the
//! integrator uses to keep orientation updates on the rotation
//! manifold; the remaining conversions serve problem assembly and
//! diagnostics.

use nalgebra::{Matrix3, Vector3};

use crate::error::RotationError;
use crate::quaternion::Quaternion;
use crate::util::{close_to, wrap_angle_to_pi};

/// A 3x3 rotation matrix.
pub type RotationMatrix = Matrix3<f64>;

/// Exponential map: rotation vector -> unit quaternion.
///
/// With `theta = |v|`, returns the identity quaternion when `theta` is
/// close to zero and `(cos(theta/2), sin(theta/2)/theta * v)` otherwise.
/// The result is a unit quaternion by construction.
#[must_use]
pub fn quaternion_from_rotation_vector(vector: Vector3<f64>) -> Quaternion {
    let angle = vector.norm();
    if close_to(angle, 0.0) {
        return Quaternion::identity();
    }

    let (sin_half, cos_half) = (angle / 2.0).sin_cos();
    let factor = sin_half / angle;
    Quaternion::from_scalar_vector(cos_half, vector * factor)
}

/// Logarithmic map: quaternion -> rotation vector.
///
/// With `s = |(q1, q2, q3)|`, returns the zero vector when `s` is close
/// to zero and `2 * atan2(s, q0) / s * (q1, q2, q3)` otherwise.
#[must_use]
pub fn rotation_vector_from_quaternion(quaternion: &Quaternion) -> Vector3<f64> {
    let sin_half = quaternion.vector().norm();
    if close_to(sin_half, 0.0) {
        return Vector3::zeros();
    }

    let k = 2.0 * sin_half.atan2(quaternion.scalar()) / sin_half;
    quaternion.vector() * k
}

/// Build a quaternion from an angle and a unit axis.
#[must_use]
pub fn quaternion_from_angle_axis(angle: f64, axis: Vector3<f64>) -> Quaternion {
    let (sin_half, cos_half) = (angle / 2.0).sin_cos();
    Quaternion::from_scalar_vector(cos_half, axis * sin_half)
}

/// Recover the angle (wrapped into (-pi, pi]) and unit axis of a
/// quaternion.
///
/// A quaternion close to the identity yields `(0, (1, 0, 0))`.
#[must_use]
pub fn angle_axis_from_quaternion(quaternion: &Quaternion) -> (f64, Vector3<f64>) {
    let sin_half = quaternion.vector().norm();
    let angle = 2.0 * sin_half.atan2(quaternion.scalar());

    if close_to(angle, 0.0) {
        return (0.0, Vector3::new(1.0, 0.0, 0.0));
    }

    let axis = (quaternion.vector() / sin_half).normalize();
    (wrap_angle_to_pi(angle), axis)
}

/// Rotate a vector by a unit quaternion using the closed-form expansion
/// of `q * (0, v) * q^-1`.
///
/// # Errors
///
/// Returns [`RotationError::NotUnit`] unless the quaternion has unit
/// length within tolerance.
pub fn rotate_vector(
    quaternion: &Quaternion,
    vector: Vector3<f64>,
) -> Result<Vector3<f64>, RotationError> {
    if !quaternion.is_unit() {
        return Err(RotationError::NotUnit);
    }

    let [q0, q1, q2, q3] = quaternion.components();
    let [v0, v1, v2] = [vector.x, vector.y, vector.z];

    Ok(Vector3::new(
        (q0 * q0 + q1 * q1 - q2 * q2 - q3 * q3) * v0
            + 2.0 * (q1 * q2 - q0 * q3) * v1
            + 2.0 * (q1 * q3 + q0 * q2) * v2,
        2.0 * (q1 * q2 + q0 * q3) * v0
            + (q0 * q0 - q1 * q1 + q2 * q2 - q3 * q3) * v1
            + 2.0 * (q2 * q3 - q0 * q1) * v2,
        2.0 * (q1 * q3 - q0 * q2) * v0
            + 2.0 * (q2 * q3 + q0 * q1) * v1
            + (q0 * q0 - q1 * q1 - q2 * q2 + q3 * q3) * v2,
    ))
}

/// Convert a unit quaternion to the standard 3x3 rotation matrix.
///
/// # Errors
///
/// Returns [`RotationError::NotUnit`] unless the quaternion has unit
/// length within tolerance.
pub fn quaternion_to_rotation_matrix(
    quaternion: &Quaternion,
) -> Result<RotationMatrix, RotationError> {
    if !quaternion.is_unit() {
        return Err(RotationError::NotUnit);
    }

    let [q0, q1, q2, q3] = quaternion.components();

    Ok(RotationMatrix::new(
        q0 * q0 + q1 * q1 - q2 * q2 - q3 * q3,
        2.0 * (q1 * q2 - q0 * q3),
        2.0 * (q1 * q3 + q0 * q2),
        2.0 * (q1 * q2 + q0 * q3),
        q0 * q0 - q1 * q1 + q2 * q2 - q3 * q3,
        2.0 * (q2 * q3 - q0 * q1),
        2.0 * (q1 * q3 - q0 * q2),
        2.0 * (q2 * q3 + q0 * q1),
        q0 * q0 - q1 * q1 - q2 * q2 + q3 * q3,
    ))
}

/// Convert a rotation matrix to a quaternion.
///
/// Shepperd-style branch selection: the trace branch when the trace is
/// positive (returning a quaternion with non-negative scalar part),
/// otherwise the branch keyed by the largest diagonal entry, so the
/// division never runs through a small number. The sign of the result
/// is arbitrary in the diagonal branches; `q` and `-q` denote the same
/// rotation.
#[must_use]
pub fn rotation_matrix_to_quaternion(matrix: &RotationMatrix) -> Quaternion {
    let (m00, m01, m02) = (matrix[(0, 0)], matrix[(0, 1)], matrix[(0, 2)]);
    let (m10, m11, m12) = (matrix[(1, 0)], matrix[(1, 1)], matrix[(1, 2)]);
    let (m20, m21, m22) = (matrix[(2, 0)], matrix[(2, 1)], matrix[(2, 2)]);

    let trace = m00 + m11 + m22;

    if trace > 0.0 {
        let s = 0.5 / (trace + 1.0).sqrt();
        Quaternion::new(0.25 / s, (m21 - m12) * s, (m02 - m20) * s, (m10 - m01) * s)
    } else if m00 > m11 && m00 > m22 {
        let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
        Quaternion::new((m21 - m12) / s, 0.25 * s, (m01 + m10) / s, (m02 + m20) / s)
    } else if m11 > m22 {
        let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
        Quaternion::new((m02 - m20) / s, (m01 + m10) / s, 0.25 * s, (m12 + m21) / s)
    } else {
        let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
        Quaternion::new((m10 - m01) / s, (m02 + m20) / s, (m12 + m21) / s, 0.25 * s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_vec_eq(a: Vector3<f64>, b: Vector3<f64>, eps: f64) {
        assert_relative_eq!(a.x, b.x, epsilon = eps);
        assert_relative_eq!(a.y, b.y, epsilon = eps);
        assert_relative_eq!(a.z, b.z, epsilon = eps);
    }

    #[test]
    fn null_rotation_vector_gives_identity() {
        let q = quaternion_from_rotation_vector(Vector3::zeros());
        assert_eq!(q, Quaternion::identity());
    }

    #[test]
    fn identity_gives_null_rotation_vector() {
        let v = rotation_vector_from_quaternion(&Quaternion::identity());
        assert_eq!(v, Vector3::zeros());
    }

    #[test]
    fn exponential_map_is_unit() {
        for v in [
            Vector3::new(0.1, 0.2, 0.3),
            Vector3::new(-1.0, 2.0, 0.5),
            Vector3::new(3.0, 0.0, 0.0),
        ] {
            assert!(quaternion_from_rotation_vector(v).is_unit());
        }
    }

    #[test]
    fn rotation_vector_round_trip() {
        for v in [
            Vector3::new(0.1, 0.2, 0.3),
            Vector3::new(-0.5, 0.25, 1.0),
            Vector3::new(0.0, 0.0, 3.0),
            Vector3::new(1.0, 0.0, 0.0) * (PI - 1e-3),
        ] {
            let q = quaternion_from_rotation_vector(v);
            let back = rotation_vector_from_quaternion(&q);
            assert_vec_eq(back, v, 1e-6);
        }
    }

    #[test]
    fn angle_axis_round_trip() {
        let axis = Vector3::new(1.0, 2.0, 2.0).normalize();
        let q = quaternion_from_angle_axis(0.7, axis);
        let (angle, recovered) = angle_axis_from_quaternion(&q);
        assert_relative_eq!(angle, 0.7, epsilon = 1e-12);
        assert_vec_eq(recovered, axis, 1e-12);
    }

    #[test]
    fn angle_axis_of_identity() {
        let (angle, axis) = angle_axis_from_quaternion(&Quaternion::identity());
        assert_eq!(angle, 0.0);
        assert_eq!(axis, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn rotate_vector_requires_unit_quaternion() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            rotate_vector(&q, Vector3::x()),
            Err(RotationError::NotUnit)
        );
        assert!(quaternion_to_rotation_matrix(&q).is_err());
    }

    #[test]
    fn rotate_vector_quarter_turn_about_z() {
        let q = quaternion_from_angle_axis(FRAC_PI_2, Vector3::z());
        let rotated = rotate_vector(&q, Vector3::x()).unwrap();
        assert_vec_eq(rotated, Vector3::y(), 1e-12);
    }

    #[test]
    fn rotation_preserves_length() {
        let q = quaternion_from_rotation_vector(Vector3::new(0.4, -1.2, 0.7));
        for v in [
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-0.3, 0.0, 10.0),
            Vector3::zeros(),
        ] {
            let rotated = rotate_vector(&q, v).unwrap();
            assert_relative_eq!(rotated.norm(), v.norm(), epsilon = 1e-6);
        }
    }

    #[test]
    fn matrix_action_matches_quaternion_action() {
        let q = quaternion_from_rotation_vector(Vector3::new(1.1, -0.4, 0.9));
        let r = quaternion_to_rotation_matrix(&q).unwrap();
        let v = Vector3::new(0.3, -2.0, 1.5);
        assert_vec_eq(r * v, rotate_vector(&q, v).unwrap(), 1e-6);
    }

    #[test]
    fn matrix_round_trip_up_to_sign() {
        // One quaternion per recovery branch: near-identity (trace
        // branch) and half-turns about each axis (diagonal branches).
        let candidates = [
            quaternion_from_rotation_vector(Vector3::new(0.2, 0.1, -0.3)),
            quaternion_from_angle_axis(PI, Vector3::x()),
            quaternion_from_angle_axis(PI, Vector3::y()),
            quaternion_from_angle_axis(PI, Vector3::z()),
            quaternion_from_angle_axis(2.8, Vector3::new(1.0, 1.0, 1.0).normalize()),
        ];
        for q in candidates {
            let r = quaternion_to_rotation_matrix(&q).unwrap();
            let back = rotation_matrix_to_quaternion(&r);
            let same: bool = (0..4).all(|i| (back[i] - q[i]).abs() < 1e-6);
            let negated: bool = (0..4).all(|i| (back[i] + q[i]).abs() < 1e-6);
            assert!(same || negated, "round trip differs beyond sign: {back:?} vs {q:?}");
        }
    }

    #[test]
    fn trace_branch_returns_non_negative_scalar() {
        let q = quaternion_from_rotation_vector(Vector3::new(-0.3, 0.2, 0.1));
        let r = quaternion_to_rotation_matrix(&q).unwrap();
        assert!(rotation_matrix_to_quaternion(&r).scalar() >= 0.0);
    }
}
