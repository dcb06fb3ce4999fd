//! Rigid-body mass matrix.

use nalgebra::{DMatrix, Matrix3, Vector3};

use crate::error::MbdError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The 6x6 symmetric positive-definite mass matrix of a rigid body,
/// block diagonal `diag(m * I_3, J)` with mass `m` and principal
/// moments of inertia `J = (Jx, Jy, Jz)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MassMatrix {
    mass: f64,
    principal_inertia: Vector3<f64>,
    matrix: DMatrix<f64>,
}

impl Default for MassMatrix {
    /// Unit mass and unit principal moments of inertia.
    fn default() -> Self {
        Self::isotropic(1.0, 1.0).unwrap_or_else(|_| unreachable!("unit properties are valid"))
    }
}

impl MassMatrix {
    /// Build from a scalar mass and the vector of principal moments of
    /// inertia.
    ///
    /// # Errors
    ///
    /// Returns [`MbdError::InvalidMassProperties`] when the mass or any
    /// principal moment is not strictly positive.
    pub fn new(mass: f64, principal_inertia: Vector3<f64>) -> Result<Self, MbdError> {
        if mass <= 0.0 {
            return Err(MbdError::invalid_mass("mass must be positive"));
        }
        if principal_inertia.iter().any(|&j| j <= 0.0) {
            return Err(MbdError::invalid_mass(
                "principal moments of inertia must be positive",
            ));
        }

        let mut matrix = DMatrix::zeros(6, 6);
        for i in 0..3 {
            matrix[(i, i)] = mass;
            matrix[(i + 3, i + 3)] = principal_inertia[i];
        }
        Ok(Self {
            mass,
            principal_inertia,
            matrix,
        })
    }

    /// Build from a scalar mass and one isotropic moment of inertia.
    ///
    /// # Errors
    ///
    /// Returns [`MbdError::InvalidMassProperties`] under the same rules
    /// as [`MassMatrix::new`].
    pub fn isotropic(mass: f64, moment_of_inertia: f64) -> Result<Self, MbdError> {
        Self::new(
            mass,
            Vector3::new(moment_of_inertia, moment_of_inertia, moment_of_inertia),
        )
    }

    /// Build from a full 6x6 matrix. The mass is read off entry (0,0)
    /// and the principal moments off the rotational diagonal.
    ///
    /// # Errors
    ///
    /// Returns [`MbdError::InvalidMassProperties`] when the matrix is
    /// not 6x6.
    pub fn from_matrix(matrix: DMatrix<f64>) -> Result<Self, MbdError> {
        if matrix.nrows() != 6 || matrix.ncols() != 6 {
            return Err(MbdError::invalid_mass(format!(
                "mass matrix must be 6x6, got {}x{}",
                matrix.nrows(),
                matrix.ncols()
            )));
        }
        let mass = matrix[(0, 0)];
        let principal_inertia = Vector3::new(matrix[(3, 3)], matrix[(4, 4)], matrix[(5, 5)]);
        Ok(Self {
            mass,
            principal_inertia,
            matrix,
        })
    }

    /// Scalar mass.
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Principal moments of inertia.
    #[must_use]
    pub fn principal_inertia(&self) -> Vector3<f64> {
        self.principal_inertia
    }

    /// The full 6x6 matrix.
    #[must_use]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// The rotational 3x3 block (lower right).
    #[must_use]
    pub fn inertia_block(&self) -> Matrix3<f64> {
        Matrix3::from_fn(|i, j| self.matrix[(i + 3, j + 3)])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn block_diagonal_layout() {
        let mm = MassMatrix::new(15.0, Vector3::new(0.2, 0.4, 0.6)).unwrap();
        let m = mm.matrix();
        assert_relative_eq!(m[(0, 0)], 15.0);
        assert_relative_eq!(m[(1, 1)], 15.0);
        assert_relative_eq!(m[(2, 2)], 15.0);
        assert_relative_eq!(m[(3, 3)], 0.2);
        assert_relative_eq!(m[(4, 4)], 0.4);
        assert_relative_eq!(m[(5, 5)], 0.6);
        assert_relative_eq!(m[(0, 3)], 0.0);
        assert_relative_eq!(m[(5, 2)], 0.0);
    }

    #[test]
    fn rejects_non_positive_properties() {
        assert!(MassMatrix::new(0.0, Vector3::new(1.0, 1.0, 1.0)).is_err());
        assert!(MassMatrix::new(-1.0, Vector3::new(1.0, 1.0, 1.0)).is_err());
        assert!(MassMatrix::new(1.0, Vector3::new(1.0, 0.0, 1.0)).is_err());
        assert!(MassMatrix::new(1.0, Vector3::new(1.0, 1.0, -2.0)).is_err());
        assert!(MassMatrix::isotropic(1.0, -1.0).is_err());
    }

    #[test]
    fn from_matrix_requires_6x6() {
        assert!(MassMatrix::from_matrix(DMatrix::identity(5, 6)).is_err());
        assert!(MassMatrix::from_matrix(DMatrix::identity(7, 7)).is_err());

        let mm = MassMatrix::from_matrix(DMatrix::identity(6, 6) * 2.0).unwrap();
        assert_relative_eq!(mm.mass(), 2.0);
        assert_relative_eq!(mm.principal_inertia().x, 2.0);
    }

    #[test]
    fn inertia_block_matches_principal_moments() {
        let mm = MassMatrix::new(3.0, Vector3::new(0.1, 0.2, 0.3)).unwrap();
        let j = mm.inertia_block();
        assert_relative_eq!(j[(0, 0)], 0.1);
        assert_relative_eq!(j[(1, 1)], 0.2);
        assert_relative_eq!(j[(2, 2)], 0.3);
        assert_relative_eq!(j[(0, 1)], 0.0);
    }
}
