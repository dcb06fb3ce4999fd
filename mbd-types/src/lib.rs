//! Core data types for constrained multibody dynamics.
//!
//! This crate provides the model-side data of a generalized-alpha
//! time-integration engine:
//!
//! - [`State`] - generalized coordinates, velocity, acceleration, and
//!   the algorithmic acceleration carried between steps
//! - [`MassMatrix`] - 6x6 rigid-body mass matrix `diag(m * I_3, J)`
//! - [`GeneralizedForces`] - length-6 [force; moment] vector
//! - [`MbdError`] - construction-time validation failures
//!
//! # Design Philosophy
//!
//! These types are **pure data**: no integration, no problem assembly,
//! no logging. They are the common language between the rotation
//! algebra, the problem assemblers, and the time integrator, and carry
//! their shape invariants (7 coordinates vs 6 degrees of freedom for a
//! rigid body, strictly positive mass properties, 6-component forces)
//! at construction time.
//!
//! # Example
//!
//! ```
//! use mbd_types::{GeneralizedForces, MassMatrix, State};
//! use nalgebra::Vector3;
//!
//! // A rigid-body state: 7 coordinates (position + quaternion), 6 dofs.
//! let state = State::zeros(7, 6);
//! assert_eq!(state.n_dofs(), 6);
//!
//! let mass = MassMatrix::new(15.0, Vector3::new(0.234, 0.468, 0.234)).unwrap();
//! assert_eq!(mass.matrix().nrows(), 6);
//!
//! let forces = GeneralizedForces::new(Vector3::new(0.0, 0.0, 147.15), Vector3::zeros());
//! assert_eq!(forces.vector().len(), 6);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::missing_const_for_fn)]

mod error;
mod forces;
mod inertia;
mod state;

pub use error::MbdError;
pub use forces::GeneralizedForces;
pub use inertia::MassMatrix;
pub use state::State;

// Re-export math types for convenience
pub use nalgebra::{DMatrix, DVector, Matrix3, Vector3};

/// Result type for model construction.
pub type Result<T> = std::result::Result<T, MbdError>;
