use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{Metric, Reading};

/// One wholesale read of the external data source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_state: Option<String>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid snapshot JSON")
    }
}

/// Anything that can produce a fresh snapshot on demand.
pub trait MetricSource {
    fn fetch(&self) -> Result<Snapshot>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Reads a snapshot JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetricSource for FileSource {
    fn fetch(&self) -> Result<Snapshot> {
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("cannot read snapshot {}", self.path.display()))?;
        Snapshot::from_json(&contents)
            .with_context(|| format!("in snapshot {}", self.path.display()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Built-in static snapshot used when no source file is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSource;

impl MetricSource for MockSource {
    fn fetch(&self) -> Result<Snapshot> {
        let mut steps = Metric::new("Steps", Reading::new(5400, "steps"));
        steps.detail = Some("Daily goal is 8000 steps".to_string());

        Ok(Snapshot {
            activity_state: Some("Resting".to_string()),
            metrics: vec![
                Metric::new("Heart Rate", Reading::new(72, "bpm")),
                Metric::new("Blood Pressure", Reading::new(118, "mmHg")),
                steps,
            ],
        })
    }

    fn describe(&self) -> String {
        "built-in mock data".to_string()
    }
}

/// Pick the file source when a path is given, the mock source otherwise.
pub fn resolve(path: Option<&Path>) -> Box<dyn MetricSource> {
    match path {
        Some(p) => Box::new(FileSource::new(p)),
        None => Box::new(MockSource),
    }
}
