//! Materialization errors.

use std::fmt;

use ember_arena::ArenaError;
use ember_core::{TensorIndex, TypeError};
use thiserror::Error;

/// What an arena allocation was for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocationPurpose {
    /// The tensor's data payload.
    Payload,
    /// The tensor's dimensions array.
    Dims,
}

impl fmt::Display for AllocationPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Payload => f.write_str("data"),
            Self::Dims => f.write_str("dimensions"),
        }
    }
}

/// Errors that abort materialization of a single tensor.
///
/// Every variant is reported through the [`ember_core::ErrorReporter`]
/// before it is returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MaterializeError {
    /// The element type is unknown or has no fixed width, or the shape
    /// cannot be sized.
    #[error(transparent)]
    Type(#[from] TypeError),
    /// The arena cannot hold the payload or the dimensions array.
    #[error("couldn't allocate {purpose} memory, wanted {requested} bytes but only {available} were available")]
    ArenaExhausted {
        /// Which allocation failed.
        purpose: AllocationPurpose,
        /// Bytes requested.
        requested: usize,
        /// Arena headroom at the time of the request.
        available: usize,
    },
    /// Any other arena failure.
    #[error(transparent)]
    Arena(ArenaError),
}

impl MaterializeError {
    /// Map an arena failure for the given allocation.
    pub(crate) fn from_arena(purpose: AllocationPurpose, err: ArenaError) -> Self {
        match err {
            ArenaError::Exhausted {
                requested,
                remaining,
            } => Self::ArenaExhausted {
                purpose,
                requested,
                available: remaining,
            },
            other => Self::Arena(other),
        }
    }

    /// Whether the failure was an element type with no byte width.
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, Self::Type(TypeError::Unsupported { .. }))
    }

    /// Whether the failure was arena exhaustion.
    pub fn is_arena_exhausted(&self) -> bool {
        matches!(self, Self::ArenaExhausted { .. })
    }
}

/// A model load stopped at the first tensor that failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("tensor {index} failed to materialize: {source}")]
pub struct LoadError {
    /// Position of the failing tensor in the model's tensor list.
    pub index: TensorIndex,
    /// Why it failed.
    #[source]
    pub source: MaterializeError,
}
