//! Quaternion and rotation-vector algebra on SO(3).
//!
//! This crate provides the rotation layer of the multibody engine:
//! a [`Quaternion`] value type with the full component algebra, the
//! exponential/logarithmic maps between rotation vectors and unit
//! quaternions, rotation of vectors, and conversions to and from
//! rotation matrices.
//!
//! The integrator composes orientation increments through
//! [`quaternion_from_rotation_vector`] so configuration updates stay on
//! the rotation manifold instead of drifting off it the way additive
//! quaternion updates do.
//!
//! # Example
//!
//! ```
//! use mbd_rotation::{quaternion_from_rotation_vector, rotate_vector};
//! use nalgebra::Vector3;
//! use std::f64::consts::FRAC_PI_2;
//!
//! // A quarter turn about z maps x onto y.
//! let q = quaternion_from_rotation_vector(Vector3::z() * FRAC_PI_2);
//! let rotated = rotate_vector(&q, Vector3::x()).unwrap();
//! assert!((rotated - Vector3::y()).norm() < 1e-12);
//! ```
//!
//! All rotation *actions* (rotating vectors, producing rotation
//! matrices) demand a unit quaternion within [`TOLERANCE`] and fail
//! with [`RotationError::NotUnit`] otherwise; composition does not, so
//! callers renormalize after composing.

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::missing_const_for_fn, clippy::suboptimal_flops)]

mod error;
mod quaternion;
mod rotation;
mod util;

pub use error::RotationError;
pub use quaternion::Quaternion;
pub use rotation::{
    RotationMatrix, angle_axis_from_quaternion, quaternion_from_angle_axis,
    quaternion_from_rotation_vector, quaternion_to_rotation_matrix, rotate_vector,
    rotation_matrix_to_quaternion, rotation_vector_from_quaternion,
};
pub use util::{TOLERANCE, close_to, wrap_angle_to_pi};
