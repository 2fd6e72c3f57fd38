use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EvalError;

pub const HEART_RATE: &str = "Heart Rate";
pub const BLOOD_PRESSURE: &str = "Blood Pressure";

/// Inclusive numeric range, serialized as `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct Range {
    pub low: i64,
    pub high: i64,
}

impl Range {
    pub const fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.low && value <= self.high
    }
}

impl From<[i64; 2]> for Range {
    fn from([low, high]: [i64; 2]) -> Self {
        Self { low, high }
    }
}

impl From<Range> for [i64; 2] {
    fn from(r: Range) -> Self {
        [r.low, r.high]
    }
}

impl FromStr for Range {
    type Err = EvalError;

    /// Parse `LOW-HIGH`. Bounds may be negative (`-10--5`); reversed bounds are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = Regex::new(r"^\s*(-?\d+)\s*-\s*(-?\d+)\s*$")
            .map_err(|_| EvalError::InvalidRange(s.to_string()))?;
        let caps = re
            .captures(s)
            .ok_or_else(|| EvalError::InvalidRange(s.to_string()))?;
        let low: i64 = caps[1]
            .parse()
            .map_err(|_| EvalError::InvalidRange(s.to_string()))?;
        let high: i64 = caps[2]
            .parse()
            .map_err(|_| EvalError::InvalidRange(s.to_string()))?;
        if low > high {
            return Err(EvalError::ReversedRange { low, high });
        }
        Ok(Self { low, high })
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Good and warning ranges for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThresholdPair {
    pub good: Range,
    pub warning: Range,
}

impl ThresholdPair {
    pub const fn new(good: [i64; 2], warning: [i64; 2]) -> Self {
        Self {
            good: Range::new(good[0], good[1]),
            warning: Range::new(warning[0], warning[1]),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityState {
    #[default]
    Resting,
    Exercising,
    Sleeping,
}

impl ActivityState {
    /// Resolve a free-form label. Absent or unrecognized labels fall back to `Resting`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("Resting") => Self::Resting,
            Some("Exercising") => Self::Exercising,
            Some("Sleeping") => Self::Sleeping,
            _ => Self::Resting,
        }
    }
}

impl std::fmt::Display for ActivityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resting => write!(f, "Resting"),
            Self::Exercising => write!(f, "Exercising"),
            Self::Sleeping => write!(f, "Sleeping"),
        }
    }
}

/// Thresholds in force for one activity state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThresholdTable {
    pub heart_rate: ThresholdPair,
    pub blood_pressure: ThresholdPair,
}

impl ThresholdTable {
    pub const RESTING: Self = Self {
        heart_rate: ThresholdPair::new([60, 100], [101, 120]),
        blood_pressure: ThresholdPair::new([90, 120], [121, 140]),
    };

    pub const EXERCISING: Self = Self {
        heart_rate: ThresholdPair::new([100, 180], [181, 200]),
        blood_pressure: ThresholdPair::new([110, 150], [151, 170]),
    };

    pub const SLEEPING: Self = Self {
        heart_rate: ThresholdPair::new([50, 70], [71, 90]),
        blood_pressure: ThresholdPair::new([80, 110], [111, 130]),
    };

    pub fn for_activity(state: ActivityState) -> Self {
        match state {
            ActivityState::Resting => Self::RESTING,
            ActivityState::Exercising => Self::EXERCISING,
            ActivityState::Sleeping => Self::SLEEPING,
        }
    }

    /// Thresholds for a metric name; only the two built-in vitals have entries.
    pub fn lookup(&self, name: &str) -> Option<&ThresholdPair> {
        match name {
            HEART_RATE => Some(&self.heart_rate),
            BLOOD_PRESSURE => Some(&self.blood_pressure),
            _ => None,
        }
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::RESTING
    }
}

/// Select the active threshold table from an activity label.
pub fn select_thresholds(activity_state: Option<&str>) -> ThresholdTable {
    ThresholdTable::for_activity(ActivityState::from_label(activity_state))
}
