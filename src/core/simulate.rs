use rand::Rng;

use crate::core::classify::classify;
use crate::models::{Metric, ThresholdTable};

/// Size of one simulated swing, in the metric's own unit.
pub const DRIFT: i64 = 20;

/// Move every reading up or down by `DRIFT` with equal odds, then reclassify.
pub fn simulate<R: Rng>(
    metrics: &[Metric],
    thresholds: &ThresholdTable,
    rng: &mut R,
) -> Vec<Metric> {
    let drifted: Vec<Metric> = metrics
        .iter()
        .map(|m| {
            let delta = if rng.random_bool(0.5) { -DRIFT } else { DRIFT };
            Metric {
                value: m.value.with_magnitude(m.value.magnitude.saturating_add(delta)),
                ..m.clone()
            }
        })
        .collect();
    classify(&drifted, thresholds)
}
