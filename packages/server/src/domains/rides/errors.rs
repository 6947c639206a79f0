use thiserror::Error;

use crate::domains::rides::models::RideStatus;

/// Typed failures for ride lifecycle operations.
///
/// Operations fail fast on the first violated precondition; the
/// (excluded) controller layer maps these to transport responses.
#[derive(Debug, Error)]
pub enum RideError {
    #[error("missing or invalid field: {0}")]
    Validation(&'static str),

    #[error("ride not found")]
    NotFound,

    #[error("ride is {actual}, expected {expected}")]
    InvalidState {
        expected: RideStatus,
        actual: RideStatus,
    },

    #[error("OTP does not match")]
    OtpMismatch,

    #[error("ride already assigned to another captain")]
    Conflict,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
