//! Health dashboard core: merge snapshot and user-defined metrics, classify
//! them against activity-aware thresholds, and derive an overall verdict.

pub mod core;
pub mod error;
pub mod models;
pub mod output;

pub use error::EvalError;
