//! Typed errors for per-sample parsing.
//!
//! None of these are fatal to a pipeline run. The stage that hits one logs a
//! warning and drops the offending sample, then carries on with the rest.

use thiserror::Error;

/// Why a single raw sample or daily reading was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    // ---
    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    #[error("non-numeric value: {0:?}")]
    NonNumericValue(String),

    #[error("missing value")]
    MissingValue,

    #[error("non-finite value: {0}")]
    NonFiniteValue(f64),
}
