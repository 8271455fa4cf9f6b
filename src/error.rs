//! Error types for threshold optimization.

use thiserror::Error;

/// Failures raised by the profit, search, evaluation and comparison core.
///
/// All of these are deterministic: retrying with the same inputs yields the
/// same error, so callers should fix their inputs rather than retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThresholdError {
    /// Misaligned vectors, labels outside {0,1}, or out-of-range values.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("threshold candidate set is empty")]
    EmptyCandidateSet,

    /// The evaluator produced counts that do not add up to the input size.
    #[error("internal consistency violated: {0}")]
    InternalConsistency(String),
}

impl ThresholdError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result type for core operations.
pub type ThresholdResult<T> = std::result::Result<T, ThresholdError>;
