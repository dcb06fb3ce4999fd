//! Quaternion value type and its algebra.

use std::ops::{Add, Div, Index, Mul, Sub};

use nalgebra::Vector3;

use crate::error::RotationError;
use crate::util::close_to;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A quaternion `q = q0 + q1*i + q2*j + q3*k` with scalar part `q0`.
///
/// A *unit* quaternion (`|q| = 1` within [`crate::TOLERANCE`])
/// represents a rotation; operations that act as rotations check this
/// invariant and fail with [`RotationError::NotUnit`] otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quaternion {
    q0: f64,
    q1: f64,
    q2: f64,
    q3: f64,
}

impl Quaternion {
    /// Create a quaternion from its four components, scalar first.
    #[must_use]
    pub const fn new(q0: f64, q1: f64, q2: f64, q3: f64) -> Self {
        Self { q0, q1, q2, q3 }
    }

    /// The identity quaternion (1, 0, 0, 0).
    #[must_use]
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Create from a scalar part and a vector part.
    #[must_use]
    pub fn from_scalar_vector(scalar: f64, vector: Vector3<f64>) -> Self {
        Self::new(scalar, vector.x, vector.y, vector.z)
    }

    /// The four components as an array, scalar first.
    #[must_use]
    pub const fn components(&self) -> [f64; 4] {
        [self.q0, self.q1, self.q2, self.q3]
    }

    /// Scalar part.
    #[must_use]
    pub const fn scalar(&self) -> f64 {
        self.q0
    }

    /// Vector part.
    #[must_use]
    pub fn vector(&self) -> Vector3<f64> {
        Vector3::new(self.q1, self.q2, self.q3)
    }

    /// Euclidean length of the four-component vector.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Squared length.
    #[must_use]
    pub fn norm_squared(&self) -> f64 {
        self.q0 * self.q0 + self.q1 * self.q1 + self.q2 * self.q2 + self.q3 * self.q3
    }

    /// Whether this is a unit quaternion within the shared tolerance.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        close_to(self.norm(), 1.0)
    }

    /// Return the unit quaternion with this direction.
    ///
    /// Quaternions already of unit length are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::ZeroLength`] when the length is close
    /// to zero.
    pub fn normalized(&self) -> Result<Self, RotationError> {
        let length = self.norm();
        if close_to(length, 0.0) {
            return Err(RotationError::ZeroLength);
        }
        if close_to(length, 1.0) {
            return Ok(*self);
        }
        Ok(*self / length)
    }

    /// The conjugate (q0, -q1, -q2, -q3).
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self::new(self.q0, -self.q1, -self.q2, -self.q3)
    }

    /// The multiplicative inverse, conjugate / |q|^2.
    ///
    /// For a unit quaternion this coincides with the conjugate. The
    /// zero quaternion has no inverse; its components come back
    /// non-finite.
    #[must_use]
    pub fn inverse(&self) -> Self {
        self.conjugate() / self.norm_squared()
    }
}

impl Index<usize> for Quaternion {
    type Output = f64;

    /// Component access, scalar part at index 0.
    ///
    /// # Panics
    ///
    /// Panics for indices beyond 3.
    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.q0,
            1 => &self.q1,
            2 => &self.q2,
            3 => &self.q3,
            _ => panic!("quaternion component index out of range: {index}"),
        }
    }
}

impl Add for Quaternion {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.q0 + rhs.q0,
            self.q1 + rhs.q1,
            self.q2 + rhs.q2,
            self.q3 + rhs.q3,
        )
    }
}

impl Sub for Quaternion {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.q0 - rhs.q0,
            self.q1 - rhs.q1,
            self.q2 - rhs.q2,
            self.q3 - rhs.q3,
        )
    }
}

impl Mul<f64> for Quaternion {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(
            self.q0 * scalar,
            self.q1 * scalar,
            self.q2 * scalar,
            self.q3 * scalar,
        )
    }
}

impl Div<f64> for Quaternion {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self::new(
            self.q0 / scalar,
            self.q1 / scalar,
            self.q2 / scalar,
            self.q3 / scalar,
        )
    }
}

impl Mul for Quaternion {
    type Output = Self;

    /// Hamilton product.
    fn mul(self, rhs: Self) -> Self {
        let (a, av) = (self.q0, self.vector());
        let (b, bv) = (rhs.q0, rhs.vector());
        let scalar = a * b - av.dot(&bv);
        let vector = bv * a + av * b + av.cross(&bv);
        Self::from_scalar_vector(scalar, vector)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_is_zero() {
        let q = Quaternion::default();
        assert_eq!(q.components(), [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn scalar_and_vector_parts() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.scalar(), 1.0);
        assert_eq!(q.vector(), Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(
            Quaternion::from_scalar_vector(1.0, Vector3::new(2.0, 3.0, 4.0)),
            q
        );
    }

    #[test]
    fn index_operator() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q[0], 1.0);
        assert_eq!(q[1], 2.0);
        assert_eq!(q[2], 3.0);
        assert_eq!(q[3], 4.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_out_of_range_panics() {
        let q = Quaternion::identity();
        let _ = q[4];
    }

    #[test]
    fn norm() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_relative_eq!(q.norm(), 30.0_f64.sqrt());
    }

    #[test]
    fn unit_test_and_normalization() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert!(!q.is_unit());

        let l = 30.0_f64.sqrt();
        let unit = Quaternion::new(1.0 / l, 2.0 / l, 3.0 / l, 4.0 / l);
        assert!(unit.is_unit());

        let normalized = q.normalized().unwrap();
        assert_relative_eq!(normalized.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(normalized[0], 1.0 / l, epsilon = 1e-12);

        // Already-unit quaternions are returned unchanged.
        assert_eq!(unit.normalized().unwrap(), unit);
    }

    #[test]
    fn normalize_zero_fails() {
        assert_eq!(
            Quaternion::default().normalized(),
            Err(RotationError::ZeroLength)
        );
    }

    #[test]
    fn addition_and_subtraction() {
        let q1 = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let q2 = Quaternion::new(5.0, 6.0, 7.0, 8.0);
        let q3 = Quaternion::new(9.0, 10.0, 11.0, 12.0);

        assert_eq!((q1 + q2).components(), [6.0, 8.0, 10.0, 12.0]);
        assert_eq!((q1 + q2 + q3).components(), [15.0, 18.0, 21.0, 24.0]);
        assert_eq!((q1 - q2).components(), [-4.0, -4.0, -4.0, -4.0]);
        assert_eq!((q1 + q2 - q3).components(), [-3.0, -2.0, -1.0, 0.0]);
    }

    #[test]
    fn scalar_multiplication_and_division() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!((q * 2.0).components(), [2.0, 4.0, 6.0, 8.0]);
        assert_eq!((q / 2.0).components(), [0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn hamilton_product() {
        let q1 = Quaternion::new(3.0, 1.0, -2.0, 1.0);
        let q2 = Quaternion::new(2.0, -1.0, 2.0, 3.0);
        assert_eq!((q1 * q2).components(), [8.0, -9.0, -2.0, 11.0]);

        let q1 = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let q2 = Quaternion::new(5.0, 6.0, 7.0, 8.0);
        assert_eq!((q1 * q2).components(), [-60.0, 12.0, 30.0, 24.0]);
    }

    #[test]
    fn inverse_composes_to_identity() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let product = q * q.inverse();
        assert_relative_eq!(product[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(product[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(product[2], 0.0, epsilon = 1e-12);
        assert_relative_eq!(product[3], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn conjugate_negates_vector_part() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.conjugate().components(), [1.0, -2.0, -3.0, -4.0]);
    }
}
