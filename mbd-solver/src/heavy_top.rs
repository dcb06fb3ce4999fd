//! Heavy-top problem assembly.
//!
//! A heavy top is a rotating rigid body suspended from a fixed pivot
//! under gravity, with the pivot attachment expressed as three holonomic
//! constraints. This module assembles the index-3 residual and its
//! linearization for the generalized-alpha corrector:
//!
//! ```text
//! residual  = [ M * v' + g + B^T * lambda ]   (dynamics, 6 rows)
//!             [ Phi(q)                     ]   (constraint, 3 rows)
//!
//! iteration = [ M*beta' + C_t*gamma' + K_t    B^T ]
//! matrix      [ B                             0   ]
//! ```
//!
//! with the constraint gradient `B = [-I_3 | -R*skew(X)]`, the tangent
//! damping block `skew(Omega)*J - skew(J*Omega)`, and the tangent
//! stiffness block `skew(X)*skew(R^T*lambda)` (both nonzero only in the
//! rotational quadrant). `X` is the body-frame offset from the pivot to
//! the center of mass, so the constraint residual is
//! `Phi(q) = R*X - x`.

use nalgebra::{DMatrix, DVector, Matrix3, Matrix3x6, Vector3};

use mbd_rotation::{Quaternion, quaternion_to_rotation_matrix};
use mbd_types::{GeneralizedForces, MassMatrix};

use crate::error::StepError;
use crate::problem::DynamicsProblem;

/// Number of holonomic constraints pinning the top to its pivot.
const N_CONSTRAINTS: usize = 3;

/// Degrees of freedom of a single rigid body.
const N_DOFS: usize = 6;

/// Assembler for the heavy-top residual and iteration matrix.
///
/// The rotational rows of the residual include the gyroscopic moment
/// `Omega x (J * Omega)` on top of the supplied generalized forces;
/// the tangent damping block is exactly its linearization in `Omega`.
#[derive(Debug, Clone)]
pub struct HeavyTopProblem {
    mass_matrix: MassMatrix,
    gen_forces: GeneralizedForces,
    reference_position: Vector3<f64>,
}

impl HeavyTopProblem {
    /// Create an assembler from the body's mass matrix, the constant
    /// generalized forces, and the body-frame pivot-to-COM offset `X`.
    #[must_use]
    pub fn new(
        mass_matrix: MassMatrix,
        gen_forces: GeneralizedForces,
        reference_position: Vector3<f64>,
    ) -> Self {
        Self {
            mass_matrix,
            gen_forces,
            reference_position,
        }
    }

    /// The position block of the generalized coordinates.
    fn position(gen_coords: &DVector<f64>) -> Vector3<f64> {
        Vector3::new(gen_coords[0], gen_coords[1], gen_coords[2])
    }

    /// The orientation block of the generalized coordinates.
    fn orientation(gen_coords: &DVector<f64>) -> Quaternion {
        Quaternion::new(gen_coords[3], gen_coords[4], gen_coords[5], gen_coords[6])
    }

    /// Constraint gradient `B = [-I_3 | -R*skew(X)]` (3 x 6).
    fn constraint_gradient(&self, rotation: &Matrix3<f64>) -> Matrix3x6<f64> {
        let rx = rotation * self.reference_position.cross_matrix();
        let mut b = Matrix3x6::zeros();
        for i in 0..3 {
            b[(i, i)] = -1.0;
            for j in 0..3 {
                b[(i, j + 3)] = -rx[(i, j)];
            }
        }
        b
    }

    /// Rotational tangent damping block `skew(Omega)*J - skew(J*Omega)`.
    fn tangent_damping_block(&self, angular_velocity: Vector3<f64>) -> Matrix3<f64> {
        let inertia = self.mass_matrix.inertia_block();
        angular_velocity.cross_matrix() * inertia - (inertia * angular_velocity).cross_matrix()
    }

    /// Rotational tangent stiffness block `skew(X)*skew(R^T*lambda)`.
    fn tangent_stiffness_block(
        &self,
        rotation: &Matrix3<f64>,
        lagrange_mults: Vector3<f64>,
    ) -> Matrix3<f64> {
        self.reference_position.cross_matrix()
            * (rotation.transpose() * lagrange_mults).cross_matrix()
    }
}

impl DynamicsProblem for HeavyTopProblem {
    fn n_constraints(&self) -> usize {
        N_CONSTRAINTS
    }

    fn residual(
        &self,
        gen_coords: &DVector<f64>,
        velocity: &DVector<f64>,
        acceleration: &DVector<f64>,
        lagrange_mults: &DVector<f64>,
    ) -> Result<DVector<f64>, StepError> {
        assert_eq!(gen_coords.len(), 7, "heavy top expects 7 coordinates");
        assert_eq!(velocity.len(), N_DOFS, "heavy top expects 6 dofs");
        assert_eq!(acceleration.len(), N_DOFS, "heavy top expects 6 dofs");
        assert_eq!(lagrange_mults.len(), N_CONSTRAINTS, "heavy top has 3 constraints");

        let rotation = quaternion_to_rotation_matrix(&Self::orientation(gen_coords))?;
        let omega = Vector3::new(velocity[3], velocity[4], velocity[5]);
        let lambda = Vector3::new(lagrange_mults[0], lagrange_mults[1], lagrange_mults[2]);

        let inertial = self.mass_matrix.matrix() * acceleration;
        let gyroscopic = omega.cross(&(self.mass_matrix.inertia_block() * omega));
        let constraint_forces = self.constraint_gradient(&rotation).transpose() * lambda;

        let mut residual = DVector::zeros(N_DOFS + N_CONSTRAINTS);
        for i in 0..N_DOFS {
            residual[i] = inertial[i] + self.gen_forces.vector()[i] + constraint_forces[i];
        }
        for i in 0..3 {
            residual[i + 3] += gyroscopic[i];
        }

        let closure = rotation * self.reference_position - Self::position(gen_coords);
        for i in 0..N_CONSTRAINTS {
            residual[N_DOFS + i] = closure[i];
        }

        Ok(residual)
    }

    fn iteration_matrix(
        &self,
        beta_prime: f64,
        gamma_prime: f64,
        gen_coords: &DVector<f64>,
        velocity: &DVector<f64>,
        lagrange_mults: &DVector<f64>,
        _time_step: f64,
        _delta_gen_coords: &DVector<f64>,
    ) -> Result<DMatrix<f64>, StepError> {
        assert_eq!(gen_coords.len(), 7, "heavy top expects 7 coordinates");
        assert_eq!(velocity.len(), N_DOFS, "heavy top expects 6 dofs");
        assert_eq!(lagrange_mults.len(), N_CONSTRAINTS, "heavy top has 3 constraints");

        let rotation = quaternion_to_rotation_matrix(&Self::orientation(gen_coords))?;
        let omega = Vector3::new(velocity[3], velocity[4], velocity[5]);
        let lambda = Vector3::new(lagrange_mults[0], lagrange_mults[1], lagrange_mults[2]);

        let damping = self.tangent_damping_block(omega);
        let stiffness = self.tangent_stiffness_block(&rotation, lambda);
        let gradient = self.constraint_gradient(&rotation);
        let mass = self.mass_matrix.matrix();

        let size = N_DOFS + N_CONSTRAINTS;
        let mut matrix = DMatrix::zeros(size, size);

        // Dynamics block: M*beta' everywhere, damping and stiffness only
        // in the rotational quadrant.
        for i in 0..N_DOFS {
            for j in 0..N_DOFS {
                matrix[(i, j)] = mass[(i, j)] * beta_prime;
            }
        }
        for i in 0..3 {
            for j in 0..3 {
                matrix[(i + 3, j + 3)] +=
                    damping[(i, j)] * gamma_prime + stiffness[(i, j)];
            }
        }

        // Constraint coupling: B below, B^T to the right, zero corner.
        for i in 0..N_CONSTRAINTS {
            for j in 0..N_DOFS {
                matrix[(N_DOFS + i, j)] = gradient[(i, j)];
                matrix[(j, N_DOFS + i)] = gradient[(i, j)];
            }
        }

        Ok(matrix)
    }
}
