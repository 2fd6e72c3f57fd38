use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EvalError;
use crate::models::threshold::Range;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Status {
    #[default]
    Good,
    Warning,
    Error,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Good => write!(f, "Good"),
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// A numeric magnitude with its unit label, e.g. `72 bpm`.
///
/// On the wire a reading is a single display string; the magnitude is the
/// leading whitespace-delimited token and the unit is whatever follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Reading {
    pub magnitude: i64,
    pub unit: String,
}

impl Reading {
    pub fn new(magnitude: i64, unit: impl Into<String>) -> Self {
        Self {
            magnitude,
            unit: unit.into(),
        }
    }

    /// Same unit, different magnitude.
    pub fn with_magnitude(&self, magnitude: i64) -> Self {
        Self {
            magnitude,
            unit: self.unit.clone(),
        }
    }
}

impl FromStr for Reading {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (head, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (trimmed, ""),
        };
        let magnitude = head
            .parse::<i64>()
            .map_err(|_| EvalError::InvalidReading(s.to_string()))?;
        Ok(Self::new(magnitude, rest))
    }
}

impl TryFrom<String> for Reading {
    type Error = EvalError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Reading> for String {
    fn from(r: Reading) -> Self {
        r.to_string()
    }
}

impl std::fmt::Display for Reading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}", self.magnitude)
        } else {
            write!(f, "{} {}", self.magnitude, self.unit)
        }
    }
}

/// One named health observation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Metric {
    pub name: String,
    pub value: Reading,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good_threshold: Option<Range>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_threshold: Option<Range>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Metric {
    pub fn new(name: impl Into<String>, value: Reading) -> Self {
        Self {
            name: name.into(),
            value,
            status: Status::Good,
            good_threshold: None,
            warning_threshold: None,
            detail: None,
        }
    }

    /// Whether this metric was defined by the user with its own ranges.
    pub fn is_custom(&self) -> bool {
        self.good_threshold.is_some() || self.warning_threshold.is_some()
    }
}
