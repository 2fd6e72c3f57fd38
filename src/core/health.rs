use serde::Serialize;

use crate::models::{Metric, Status};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum OverallHealth {
    Good,
    Warning,
    Critical,
}

impl std::fmt::Display for OverallHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Good => write!(f, "Good"),
            Self::Warning => write!(f, "Warning"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

/// Worst status wins: any `Error` is critical, then any `Warning`.
pub fn overall_health(metrics: &[Metric]) -> OverallHealth {
    if metrics.iter().any(|m| m.status == Status::Error) {
        OverallHealth::Critical
    } else if metrics.iter().any(|m| m.status == Status::Warning) {
        OverallHealth::Warning
    } else {
        OverallHealth::Good
    }
}
