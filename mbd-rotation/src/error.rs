//! Error types for rotation-algebra operations.

use thiserror::Error;

/// Errors raised by quaternion operations whose domain is restricted.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RotationError {
    /// A rotation action was requested with a non-unit quaternion.
    #[error("quaternion is not a unit quaternion")]
    NotUnit,

    /// Normalization of a quaternion whose length is (close to) zero.
    #[error("quaternion length is zero, cannot normalize")]
    ZeroLength,
}
