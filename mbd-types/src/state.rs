//! Integration state: generalized coordinates and their derivatives.

use nalgebra::DVector;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The state of the system at one time level.
///
/// Holds the generalized coordinates `q`, the generalized velocity `v`,
/// the generalized acceleration `a`, and the algorithmic acceleration
/// carried between steps by the generalized-alpha scheme.
///
/// Two shapes are supported:
///
/// - **Rigid body**: `q` has 7 components (3 position + 4 unit
///   quaternion) while `v`, `a`, and the algorithmic acceleration have 6
///   (3 linear + 3 angular).
/// - **Linear**: all four vectors share one length, and the coordinate
///   update is plain vector addition.
///
/// A fresh `State` is produced for every accepted time step; past states
/// are retained by the integrator as a history sequence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State {
    gen_coords: DVector<f64>,
    velocity: DVector<f64>,
    acceleration: DVector<f64>,
    algo_acceleration: DVector<f64>,
}

impl Default for State {
    /// The all-zero scalar-dof state (every vector has length 1).
    fn default() -> Self {
        Self::zeros(1, 1)
    }
}

impl State {
    /// Create a state from its four component vectors.
    ///
    /// # Panics
    ///
    /// Panics if `velocity`, `acceleration`, and `algo_acceleration` do
    /// not share one length, or if `gen_coords` is neither that length
    /// (linear problem) nor that length + 1 (rigid body: position +
    /// quaternion). Shape mismatches are programming errors.
    #[must_use]
    pub fn new(
        gen_coords: DVector<f64>,
        velocity: DVector<f64>,
        acceleration: DVector<f64>,
        algo_acceleration: DVector<f64>,
    ) -> Self {
        let n = velocity.len();
        assert_eq!(acceleration.len(), n, "acceleration length must match velocity");
        assert_eq!(
            algo_acceleration.len(),
            n,
            "algorithmic acceleration length must match velocity"
        );
        assert!(
            gen_coords.len() == n || gen_coords.len() == n + 1,
            "gen_coords length {} is inconsistent with {} degrees of freedom",
            gen_coords.len(),
            n
        );
        Self {
            gen_coords,
            velocity,
            acceleration,
            algo_acceleration,
        }
    }

    /// Create an all-zero state with `n_coords` coordinates and `n_dofs`
    /// degrees of freedom.
    ///
    /// # Panics
    ///
    /// Panics under the same shape rules as [`State::new`].
    #[must_use]
    pub fn zeros(n_coords: usize, n_dofs: usize) -> Self {
        Self::new(
            DVector::zeros(n_coords),
            DVector::zeros(n_dofs),
            DVector::zeros(n_dofs),
            DVector::zeros(n_dofs),
        )
    }

    /// Generalized coordinates `q`.
    #[must_use]
    pub fn gen_coords(&self) -> &DVector<f64> {
        &self.gen_coords
    }

    /// Generalized velocity `v`.
    #[must_use]
    pub fn velocity(&self) -> &DVector<f64> {
        &self.velocity
    }

    /// Generalized acceleration `a`.
    #[must_use]
    pub fn acceleration(&self) -> &DVector<f64> {
        &self.acceleration
    }

    /// Algorithmic acceleration carried by the generalized-alpha scheme.
    #[must_use]
    pub fn algo_acceleration(&self) -> &DVector<f64> {
        &self.algo_acceleration
    }

    /// Number of degrees of freedom (length of the velocity vector).
    #[must_use]
    pub fn n_dofs(&self) -> usize {
        self.velocity.len()
    }
}
