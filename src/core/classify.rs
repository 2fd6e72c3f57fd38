use crate::models::{Metric, Range, Status, ThresholdTable};

/// Classify a magnitude against good/warning ranges.
///
/// Order matters: a value inside the warning range is `Warning` even if it
/// also lies inside the good range; otherwise anything outside good is `Error`.
pub fn classify_value(value: i64, good: &Range, warning: &Range) -> Status {
    if warning.contains(value) {
        Status::Warning
    } else if !good.contains(value) {
        Status::Error
    } else {
        Status::Good
    }
}

/// Re-derive status for the built-in vitals. Metrics without a table entry pass through.
pub fn classify(metrics: &[Metric], thresholds: &ThresholdTable) -> Vec<Metric> {
    metrics
        .iter()
        .map(|metric| match thresholds.lookup(&metric.name) {
            Some(pair) => Metric {
                status: classify_value(metric.value.magnitude, &pair.good, &pair.warning),
                ..metric.clone()
            },
            None => metric.clone(),
        })
        .collect()
}
