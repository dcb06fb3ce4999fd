//! The seam between the time integrator and problem assembly.

use nalgebra::{DMatrix, DVector};

use crate::error::StepError;

/// A dynamics problem the generalized-alpha integrator can advance.
///
/// The integrator never sees the physics directly; it consumes the
/// nonlinear residual and its linearization through this trait, with
/// unknowns ordered [velocity increments (n); Lagrange-multiplier
/// increments (m)].
///
/// Implementations must be pure functions of their arguments: the
/// integrator calls them repeatedly within one Newton loop and relies
/// on consistent values.
pub trait DynamicsProblem {
    /// Number of scalar kinematic constraints `m`.
    fn n_constraints(&self) -> usize;

    /// Assemble the length-(n+m) residual at the supplied iterate:
    /// the dynamics rows followed by the constraint rows.
    ///
    /// # Errors
    ///
    /// Returns [`StepError`] when the iterate is outside the assembler's
    /// domain, e.g. a degenerate orientation block.
    fn residual(
        &self,
        gen_coords: &DVector<f64>,
        velocity: &DVector<f64>,
        acceleration: &DVector<f64>,
        lagrange_mults: &DVector<f64>,
    ) -> Result<DVector<f64>, StepError>;

    /// Assemble the (n+m) x (n+m) iteration matrix
    /// `[[M*beta' + C_t*gamma' + K_t, B^T], [B, 0]]` at the supplied
    /// iterate. `beta_prime` and `gamma_prime` are the generalized-alpha
    /// linearization weights; `time_step` and `delta_gen_coords` are
    /// available to assemblers whose linearization needs them.
    ///
    /// # Errors
    ///
    /// Returns [`StepError`] when the iterate is outside the assembler's
    /// domain.
    #[allow(clippy::too_many_arguments)]
    fn iteration_matrix(
        &self,
        beta_prime: f64,
        gamma_prime: f64,
        gen_coords: &DVector<f64>,
        velocity: &DVector<f64>,
        lagrange_mults: &DVector<f64>,
        time_step: f64,
        delta_gen_coords: &DVector<f64>,
    ) -> Result<DMatrix<f64>, StepError>;
}

/// Placeholder dynamics: a residual of all ones and an identity
/// iteration matrix.
///
/// Exercises the full predictor/corrector/update machinery with a
/// linear system whose solution is known in closed form, which is what
/// the linear-update tests integrate against.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityProblem {
    n_constraints: usize,
}

impl IdentityProblem {
    /// Create with `n_constraints` scalar constraints (zero for an
    /// unconstrained problem).
    #[must_use]
    pub fn new(n_constraints: usize) -> Self {
        Self { n_constraints }
    }
}

impl DynamicsProblem for IdentityProblem {
    fn n_constraints(&self) -> usize {
        self.n_constraints
    }

    fn residual(
        &self,
        _gen_coords: &DVector<f64>,
        _velocity: &DVector<f64>,
        acceleration: &DVector<f64>,
        lagrange_mults: &DVector<f64>,
    ) -> Result<DVector<f64>, StepError> {
        let size = acceleration.len() + lagrange_mults.len();
        Ok(DVector::from_element(size, 1.0))
    }

    fn iteration_matrix(
        &self,
        _beta_prime: f64,
        _gamma_prime: f64,
        _gen_coords: &DVector<f64>,
        velocity: &DVector<f64>,
        lagrange_mults: &DVector<f64>,
        _time_step: f64,
        _delta_gen_coords: &DVector<f64>,
    ) -> Result<DMatrix<f64>, StepError> {
        let size = velocity.len() + lagrange_mults.len();
        Ok(DMatrix::identity(size, size))
    }
}
