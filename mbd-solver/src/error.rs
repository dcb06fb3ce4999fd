//! Error type for time-stepping operations.

use mbd_rotation::RotationError;
use thiserror::Error;

/// Errors raised while advancing the solution in time.
///
/// Newton exhaustion is deliberately *not* an error: the integrator
/// accepts the last iterate, logs a warning, and reports through
/// its convergence flag.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StepError {
    /// The iteration matrix was singular at solve time (zero pivot in
    /// the LU factorization).
    #[error("singular iteration matrix: zero pivot in LU factorization")]
    LuSingular,

    /// A rotation operation failed, e.g. the orientation block of the
    /// generalized coordinates degenerated to zero length.
    #[error(transparent)]
    Rotation(#[from] RotationError),
}
