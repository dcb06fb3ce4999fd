//! Generalized-alpha time integration.
//!
//! Advances a constrained multibody [`State`] through time with the
//! generalized-alpha family of implicit integrators (Chung & Hulbert's
//! parameters `alpha_f`, `alpha_m`, `beta`, `gamma`), solving the
//! nonlinear index-3 system at each step by Newton-Raphson iteration on
//! the saddle-point form, following the algorithm of Bruls, Cardona,
//! and Arnold (2012, Table 1).
//!
//! Generalized coordinates live on R^3 x SO(3): the corrector solves
//! for a length-6 velocity-space increment, the position block updates
//! additively, and the orientation block is composed through the
//! exponential map so the embedded quaternion never leaves the rotation
//! manifold.
//!
//! An optional diagonal left/right scaling of the saddle-point system
//! (Bottasso, Dopico, and Trainelli 2008) equalizes the magnitudes of
//! the velocity and constraint blocks at small step sizes.

use nalgebra::{DVector, Vector3};
use tracing::{debug, info, warn};

use mbd_rotation::{Quaternion, quaternion_from_rotation_vector};
use mbd_types::{MbdError, State};

use crate::error::StepError;
use crate::linalg::solve_linear_system;
use crate::problem::DynamicsProblem;
use crate::stepper::TimeStepper;

/// Generalized-alpha implicit time integrator.
///
/// Constructed from the four scheme parameters, a [`TimeStepper`], and
/// a preconditioning flag; drives a [`DynamicsProblem`] through
/// [`GeneralizedAlphaIntegrator::integrate`].
#[derive(Debug, Clone)]
pub struct GeneralizedAlphaIntegrator {
    alpha_f: f64,
    alpha_m: f64,
    beta: f64,
    gamma: f64,
    time_stepper: TimeStepper,
    precondition: bool,
    is_converged: bool,
}

impl Default for GeneralizedAlphaIntegrator {
    /// Trapezoidal-like scheme with neutral numerical damping:
    /// `(alpha_f, alpha_m, beta, gamma) = (0.5, 0.5, 0.25, 0.5)`.
    fn default() -> Self {
        Self::new(0.5, 0.5, 0.25, 0.5, TimeStepper::default(), false)
            .unwrap_or_else(|_| unreachable!("default parameters are valid"))
    }
}

impl GeneralizedAlphaIntegrator {
    /// L2 norm below which the Newton residual counts as converged.
    pub const CONVERGENCE_TOLERANCE: f64 = 1e-4;

    /// Create an integrator from the generalized-alpha parameters.
    ///
    /// # Errors
    ///
    /// Returns [`MbdError::InvalidConfig`] unless `alpha_f`, `alpha_m`,
    /// and `gamma` lie in [0, 1] and `beta` lies in [0, 0.5]; the
    /// endpoints are accepted.
    pub fn new(
        alpha_f: f64,
        alpha_m: f64,
        beta: f64,
        gamma: f64,
        time_stepper: TimeStepper,
        precondition: bool,
    ) -> Result<Self, MbdError> {
        if !(0.0..=1.0).contains(&alpha_f) {
            return Err(MbdError::invalid_config(format!(
                "alpha_f = {alpha_f} is outside [0, 1]"
            )));
        }
        if !(0.0..=1.0).contains(&alpha_m) {
            return Err(MbdError::invalid_config(format!(
                "alpha_m = {alpha_m} is outside [0, 1]"
            )));
        }
        if !(0.0..=0.5).contains(&beta) {
            return Err(MbdError::invalid_config(format!(
                "beta = {beta} is outside [0, 0.5]"
            )));
        }
        if !(0.0..=1.0).contains(&gamma) {
            return Err(MbdError::invalid_config(format!(
                "gamma = {gamma} is outside [0, 1]"
            )));
        }

        Ok(Self {
            alpha_f,
            alpha_m,
            beta,
            gamma,
            time_stepper,
            precondition,
            is_converged: false,
        })
    }

    /// The `alpha_f` parameter.
    #[must_use]
    pub fn alpha_f(&self) -> f64 {
        self.alpha_f
    }

    /// The `alpha_m` parameter.
    #[must_use]
    pub fn alpha_m(&self) -> f64 {
        self.alpha_m
    }

    /// The `beta` parameter.
    #[must_use]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// The `gamma` parameter.
    #[must_use]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// The time stepper, including current time and iteration counters.
    #[must_use]
    pub fn time_stepper(&self) -> &TimeStepper {
        &self.time_stepper
    }

    /// Whether the latest Newton loop converged.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.is_converged
    }

    /// Integrate from `initial_state` over the stepper's full run and
    /// return the state history, one entry per time level (length
    /// `n_steps + 1`, the initial state first).
    ///
    /// A step whose Newton loop exhausts its iteration cap is accepted
    /// with a warning; see [`GeneralizedAlphaIntegrator::is_converged`].
    ///
    /// # Errors
    ///
    /// Returns [`StepError`] when the iteration matrix is singular or
    /// the orientation block degenerates; already-accepted history is
    /// not affected by the failing step.
    pub fn integrate<P: DynamicsProblem>(
        &mut self,
        initial_state: &State,
        problem: &P,
    ) -> Result<Vec<State>, StepError> {
        let n_steps = self.time_stepper.n_steps();
        let mut states = Vec::with_capacity(n_steps + 1);
        states.push(initial_state.clone());

        for step in 0..n_steps {
            self.time_stepper.advance_time_step();
            info!(
                step = step + 1,
                time = self.time_stepper.current_time(),
                "integrating step"
            );
            let (next, _lagrange_mults) = self.alpha_step(&states[step], problem)?;
            states.push(next);
        }

        info!("time integration completed");
        Ok(states)
    }

    /// Advance one time step: predictor, Newton corrector, and the
    /// closing algorithmic-acceleration update. Returns the new state
    /// and the converged (or last-iterate) Lagrange multipliers.
    ///
    /// # Errors
    ///
    /// Returns [`StepError`] under the same conditions as
    /// [`GeneralizedAlphaIntegrator::integrate`].
    pub fn alpha_step<P: DynamicsProblem>(
        &mut self,
        state: &State,
        problem: &P,
    ) -> Result<(State, DVector<f64>), StepError> {
        let h = self.time_stepper.time_step();
        let n = state.n_dofs();
        let m = problem.n_constraints();

        let acceleration_prev = state.acceleration();
        let algo_acceleration_prev = state.algo_acceleration();

        // Predictor (Bruls, Cardona, Arnold 2012, Table 1). The solved
        // unknown `delta_gen_coords` is the velocity-space increment;
        // the configuration itself is updated through
        // `update_generalized_coordinates`.
        let mut velocity = state.velocity().clone();
        let mut algo_acceleration_next = DVector::zeros(n);
        let mut delta_gen_coords = DVector::zeros(n);
        for i in 0..n {
            algo_acceleration_next[i] = (self.alpha_f * acceleration_prev[i]
                - self.alpha_m * algo_acceleration_prev[i])
                / (1.0 - self.alpha_m);
            delta_gen_coords[i] = velocity[i]
                + h * (0.5 - self.beta) * algo_acceleration_prev[i]
                + h * self.beta * algo_acceleration_next[i];
            velocity[i] += h * (1.0 - self.gamma) * algo_acceleration_prev[i]
                + h * self.gamma * algo_acceleration_next[i];
        }
        let mut acceleration = DVector::zeros(n);
        let mut lagrange_mults = DVector::zeros(m);

        let beta_prime = (1.0 - self.alpha_m) / (h * h * self.beta * (1.0 - self.alpha_f));
        let gamma_prime = self.gamma / (h * self.beta);

        // Constraint-block scaling of the preconditioner (Bottasso,
        // Dopico, Trainelli 2008).
        let scale = self.beta * h * h;

        debug!(beta_prime, gamma_prime, "starting Newton-Raphson corrector");

        let mut gen_coords = state.gen_coords().clone();
        self.is_converged = false;
        self.time_stepper.reset_iterations();
        while self.time_stepper.iterations() < self.time_stepper.max_iterations() {
            gen_coords =
                self.update_generalized_coordinates(state.gen_coords(), &delta_gen_coords)?;

            let residual =
                problem.residual(&gen_coords, &velocity, &acceleration, &lagrange_mults)?;
            if self.check_convergence(&residual) {
                self.is_converged = true;
                break;
            }

            let mut iteration_matrix = problem.iteration_matrix(
                beta_prime,
                gamma_prime,
                &gen_coords,
                &velocity,
                &lagrange_mults,
                h,
                &delta_gen_coords,
            )?;

            let mut rhs = residual;
            if self.precondition {
                // DL * J * DR with DL = diag(scale * I_n, I_m) and
                // DR = diag(I_n, I_m / scale); the velocity-block rows
                // of the residual pick up the same left scale.
                for i in 0..n {
                    for j in 0..(n + m) {
                        iteration_matrix[(i, j)] *= scale;
                    }
                    rhs[i] *= scale;
                }
                for j in n..(n + m) {
                    for i in 0..(n + m) {
                        iteration_matrix[(i, j)] /= scale;
                    }
                }
            }

            solve_linear_system(&iteration_matrix, &mut rhs)?;

            // The Newton update is the negative of the solved increment.
            for i in 0..n {
                let delta_x = -rhs[i];
                delta_gen_coords[i] += delta_x / h;
                velocity[i] += gamma_prime * delta_x;
                acceleration[i] += beta_prime * delta_x;
            }
            let lambda_scale = if self.precondition { scale } else { 1.0 };
            for i in 0..m {
                lagrange_mults[i] -= rhs[n + i] / lambda_scale;
            }

            self.time_stepper.increment_iterations();
        }

        let n_iterations = self.time_stepper.iterations();
        self.time_stepper.accumulate_total_iterations(n_iterations);

        // Close the step: fold the accepted acceleration into the
        // algorithmic acceleration carried to the next step.
        for i in 0..n {
            algo_acceleration_next[i] +=
                (1.0 - self.alpha_f) / (1.0 - self.alpha_m) * acceleration[i];
        }

        if self.is_converged {
            info!(
                iterations = n_iterations + 1,
                "Newton-Raphson iterations converged"
            );
        } else {
            warn!(
                iterations = n_iterations,
                "Newton-Raphson iterations failed to converge; accepting last iterate"
            );
        }

        let next = State::new(gen_coords, velocity, acceleration, algo_acceleration_next);
        Ok((next, lagrange_mults))
    }

    /// Apply a velocity-space increment to the generalized coordinates.
    ///
    /// Rigid-body coordinates (`|q| = |delta| + 1`, i.e. 3 position +
    /// 4 quaternion against 6 dofs) update per block: the position adds
    /// `h * delta[0..3]`, and the orientation composes with the
    /// exponential map of `h * delta[3..6]`, renormalized to absorb
    /// round-off drift. Equal-length coordinates update additively.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Rotation`] when the stored orientation
    /// block is degenerate (zero length).
    ///
    /// # Panics
    ///
    /// Panics when the coordinate and increment lengths fit neither
    /// layout; that is a programming error.
    pub fn update_generalized_coordinates(
        &self,
        gen_coords: &DVector<f64>,
        delta_gen_coords: &DVector<f64>,
    ) -> Result<DVector<f64>, StepError> {
        let h = self.time_stepper.time_step();

        if gen_coords.len() == delta_gen_coords.len() + 1 {
            assert_eq!(
                gen_coords.len(),
                7,
                "rigid-body coordinates are 3 position + 4 quaternion"
            );

            // R^3 block: plain vector addition.
            let position = Vector3::new(gen_coords[0], gen_coords[1], gen_coords[2])
                + h * Vector3::new(
                    delta_gen_coords[0],
                    delta_gen_coords[1],
                    delta_gen_coords[2],
                );

            // SO(3) block: quaternion composition with the exponential
            // map of the scaled rotation increment.
            let orientation =
                Quaternion::new(gen_coords[3], gen_coords[4], gen_coords[5], gen_coords[6]);
            let increment = quaternion_from_rotation_vector(
                h * Vector3::new(
                    delta_gen_coords[3],
                    delta_gen_coords[4],
                    delta_gen_coords[5],
                ),
            );
            let composed = (orientation * increment).normalized()?;

            Ok(DVector::from_vec(vec![
                position.x,
                position.y,
                position.z,
                composed[0],
                composed[1],
                composed[2],
                composed[3],
            ]))
        } else {
            assert_eq!(
                gen_coords.len(),
                delta_gen_coords.len(),
                "coordinate increment length mismatch"
            );
            Ok(DVector::from_fn(gen_coords.len(), |i, _| {
                gen_coords[i] + h * delta_gen_coords[i]
            }))
        }
    }

    /// Whether a residual counts as converged: L2 norm below
    /// [`GeneralizedAlphaIntegrator::CONVERGENCE_TOLERANCE`].
    #[must_use]
    pub fn check_convergence(&self, residual: &DVector<f64>) -> bool {
        let residual_norm = residual.norm();
        debug!(residual_norm, "Newton residual");
        residual_norm < Self::CONVERGENCE_TOLERANCE
    }
}
