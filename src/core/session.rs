use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use crate::core::classify::classify;
use crate::core::custom::create_metric;
use crate::core::health::{OverallHealth, overall_health};
use crate::core::merge::{merge, remove};
use crate::core::simulate::simulate;
use crate::core::source::{MetricSource, Snapshot};
use crate::error::EvalError;
use crate::models::threshold::select_thresholds;
use crate::models::{ActivityState, Metric, ThresholdTable};

/// In-memory dashboard state for one run of the CLI.
///
/// Snapshot metrics are replaced wholesale on every refresh; user-defined
/// metrics survive until removed and are merged back in each time.
#[derive(Debug, Default)]
pub struct Session {
    activity_label: Option<String>,
    activity_override: Option<String>,
    metrics: Vec<Metric>,
    custom: Vec<Metric>,
    refreshed_at: Option<DateTime<Utc>>,
}

/// Serializable view of a session at one point in time.
#[derive(Debug, Serialize)]
pub struct DashboardReport {
    pub activity_state: ActivityState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_activity: Option<String>,
    pub overall: OverallHealth,
    pub metrics: Vec<Metric>,
    pub custom_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force an activity label regardless of what snapshots report.
    pub fn with_activity_override(mut self, label: Option<String>) -> Self {
        self.activity_override = label;
        self
    }

    /// The label thresholds are selected from: override first, then the snapshot.
    fn effective_label(&self) -> Option<&str> {
        self.activity_override
            .as_deref()
            .or(self.activity_label.as_deref())
    }

    pub fn activity_state(&self) -> ActivityState {
        ActivityState::from_label(self.effective_label())
    }

    pub fn thresholds(&self) -> ThresholdTable {
        select_thresholds(self.effective_label())
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn custom_metrics(&self) -> &[Metric] {
        &self.custom
    }

    pub fn overall_health(&self) -> OverallHealth {
        overall_health(&self.metrics)
    }

    /// Replace the working set with a fresh snapshot merged with user metrics.
    pub fn refresh(&mut self, snapshot: Snapshot) {
        self.activity_label = snapshot.activity_state;
        let merged = merge(&snapshot.metrics, &self.custom);
        self.metrics = classify(&merged, &self.thresholds());
        self.refreshed_at = Some(Utc::now());
        tracing::debug!(
            activity = %self.activity_state(),
            snapshot = snapshot.metrics.len(),
            custom = self.custom.len(),
            total = self.metrics.len(),
            "session refreshed"
        );
    }

    /// Fetch from `source` and refresh. A failed fetch leaves the session as it was.
    pub fn refresh_from(&mut self, source: &dyn MetricSource) -> anyhow::Result<()> {
        let snapshot = source.fetch()?;
        self.refresh(snapshot);
        Ok(())
    }

    /// Define a new metric and show it immediately.
    pub fn add_metric(
        &mut self,
        name: &str,
        good: &str,
        warning: &str,
    ) -> Result<Metric, EvalError> {
        let metric = create_metric(name, good, warning)?;
        self.insert_custom(metric.clone());
        Ok(metric)
    }

    /// Add an already-built user metric, replacing any with the same name.
    pub fn insert_custom(&mut self, metric: Metric) {
        tracing::debug!(name = %metric.name, status = %metric.status, "custom metric added");
        let single = std::slice::from_ref(&metric);
        self.custom = merge(&self.custom, single);
        self.metrics = merge(&self.metrics, single);
    }

    /// Remove a metric by name from both collections. Absent names are a no-op.
    pub fn remove_metric(&mut self, name: &str) -> bool {
        let from_metrics = remove(&mut self.metrics, name);
        let from_custom = remove(&mut self.custom, name);
        from_metrics || from_custom
    }

    /// Apply a random drift to every reading and reclassify.
    pub fn simulate<R: Rng>(&mut self, rng: &mut R) {
        self.metrics = simulate(&self.metrics, &self.thresholds(), rng);
    }

    pub fn report(&self) -> DashboardReport {
        DashboardReport {
            activity_state: self.activity_state(),
            reported_activity: self.activity_label.clone(),
            overall: self.overall_health(),
            metrics: self.metrics.clone(),
            custom_count: self.custom.len(),
            refreshed_at: self.refreshed_at,
        }
    }
}
