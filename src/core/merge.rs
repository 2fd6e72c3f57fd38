use crate::models::Metric;

/// Merge `overrides` into `base` keyed by name.
///
/// A same-named base entry is replaced in place; anything else is appended
/// in the order given.
pub fn merge(base: &[Metric], overrides: &[Metric]) -> Vec<Metric> {
    let mut merged = base.to_vec();
    for metric in overrides {
        match merged.iter().position(|m| m.name == metric.name) {
            Some(index) => merged[index] = metric.clone(),
            None => merged.push(metric.clone()),
        }
    }
    merged
}

/// Drop every metric with the given name. Returns true if anything was removed.
pub fn remove(metrics: &mut Vec<Metric>, name: &str) -> bool {
    let before = metrics.len();
    metrics.retain(|m| m.name != name);
    metrics.len() != before
}
