//! Generalized-alpha time integration for constrained rigid-body
//! dynamics.
//!
//! This crate is the solver side of the multibody engine. It builds on
//! [`mbd_types`] for the model data and [`mbd_rotation`] for the
//! orientation algebra.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                GeneralizedAlphaIntegrator                     │
//! │  Predictor → Newton corrector → manifold coordinate update   │
//! └─────────────────────────┬────────────────────────────────────┘
//!                           │ DynamicsProblem (residual, iteration matrix)
//!                           ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    HeavyTopProblem                            │
//! │  Mass matrix, constraint gradient, tangent damping/stiffness │
//! └─────────────────────────┬────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    linalg kernels                             │
//! │  Dense LU with partial pivoting (saddle-point solve)         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use mbd_solver::{GeneralizedAlphaIntegrator, HeavyTopProblem, TimeStepper};
//! use mbd_types::{GeneralizedForces, MassMatrix, State};
//! use nalgebra::{DVector, Vector3};
//!
//! // A top pinned at the origin with its center of mass at X = (0, 1, 0),
//! // initially at rest in the reference orientation.
//! let mass_matrix = MassMatrix::new(15.0, Vector3::new(0.234375, 0.46875, 0.234375)).unwrap();
//! let problem = HeavyTopProblem::new(
//!     mass_matrix,
//!     GeneralizedForces::default(),
//!     Vector3::new(0.0, 1.0, 0.0),
//! );
//!
//! let initial_state = State::new(
//!     DVector::from_vec(vec![0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0]),
//!     DVector::zeros(6),
//!     DVector::zeros(6),
//!     DVector::zeros(6),
//! );
//!
//! let stepper = TimeStepper::new(0.0, 0.01, 5).unwrap();
//! let mut integrator =
//!     GeneralizedAlphaIntegrator::new(0.5, 0.5, 0.25, 0.5, stepper, false).unwrap();
//!
//! let history = integrator.integrate(&initial_state, &problem).unwrap();
//! assert_eq!(history.len(), 6);
//! ```
//!
//! # Logging
//!
//! The integrator reports through [`tracing`] (step markers at info,
//! residual norms at debug, non-convergence at warn). Installing a
//! subscriber is the caller's business; the crate never does.

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::missing_const_for_fn, clippy::suboptimal_flops)]

mod error;
mod generalized_alpha;
mod heavy_top;
mod linalg;
mod problem;
mod stepper;

pub use error::StepError;
pub use generalized_alpha::GeneralizedAlphaIntegrator;
pub use heavy_top::HeavyTopProblem;
pub use linalg::solve_linear_system;
pub use problem::{DynamicsProblem, IdentityProblem};
pub use stepper::{DEFAULT_MAX_ITERATIONS, TimeStepper};

// Re-export the model and rotation layers for convenience
pub use mbd_rotation::{Quaternion, RotationError};
pub use mbd_types::{GeneralizedForces, MassMatrix, MbdError, State};
