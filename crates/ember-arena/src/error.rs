//! Arena-specific error types.

use thiserror::Error;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// The request does not fit in the remaining capacity. Nothing was
    /// committed.
    #[error("arena exhausted: requested {requested} bytes, {remaining} bytes remaining")]
    Exhausted {
        /// Number of bytes requested, excluding alignment padding.
        requested: usize,
        /// Headroom left in the arena at the time of the request.
        remaining: usize,
    },
    /// The requested alignment is not a power of two.
    #[error("alignment {align} is not a power of two")]
    InvalidAlignment {
        /// The rejected alignment.
        align: usize,
    },
    /// Arena configuration is invalid.
    #[error("invalid arena config: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}
