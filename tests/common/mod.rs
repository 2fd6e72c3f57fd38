#![allow(dead_code)]

use vitalboard::models::{Metric, Reading, Status};

/// Build a metric from a display value such as `"72 bpm"`.
pub fn metric(name: &str, value: &str) -> Metric {
    Metric::new(name, value.parse::<Reading>().unwrap())
}

/// Build a metric with an explicit status.
pub fn metric_with_status(name: &str, value: &str, status: Status) -> Metric {
    let mut m = metric(name, value);
    m.status = status;
    m
}

pub fn names(metrics: &[Metric]) -> Vec<&str> {
    metrics.iter().map(|m| m.name.as_str()).collect()
}

/// A snapshot JSON document in the external source shape.
pub fn snapshot_json(activity: Option<&str>, metrics: &[(&str, &str)]) -> String {
    let metrics: Vec<serde_json::Value> = metrics
        .iter()
        .map(|(name, value)| serde_json::json!({ "Name": name, "Value": value, "Status": "Good" }))
        .collect();
    let mut doc = serde_json::json!({ "Metrics": metrics });
    if let Some(a) = activity {
        doc["ActivityState"] = serde_json::json!(a);
    }
    doc.to_string()
}
