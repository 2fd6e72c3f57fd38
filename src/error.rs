//! Error types for metric evaluation

use thiserror::Error;

/// Errors raised while building or reading metrics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("invalid range: '{0}' (expected LOW-HIGH, e.g. 60-100)")]
    InvalidRange(String),

    #[error("reversed range: low bound {low} is greater than high bound {high}")]
    ReversedRange { low: i64, high: i64 },

    #[error("invalid metric value: '{0}' (expected '<integer> <unit>', e.g. '72 bpm')")]
    InvalidReading(String),

    #[error("invalid metric definition: '{0}' (expected NAME:GOOD:WARN, e.g. Glucose:70-140:141-180)")]
    InvalidDefinition(String),

    #[error("metric name must not be empty")]
    EmptyName,
}
