use crate::core::classify::classify_value;
use crate::error::EvalError;
use crate::models::{Metric, Range, Reading};

/// Placeholder magnitude for a freshly created metric.
const INITIAL_MAGNITUDE: i64 = 0;
const INITIAL_UNIT: &str = "units";

/// Build a user-defined metric from `LOW-HIGH` range strings.
///
/// The initial status comes from evaluating a zero reading against the supplied
/// ranges, so most new metrics start out as `Error`.
pub fn create_metric(name: &str, good: &str, warning: &str) -> Result<Metric, EvalError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EvalError::EmptyName);
    }
    let good: Range = good.parse()?;
    let warning: Range = warning.parse()?;

    let mut metric = Metric::new(name, Reading::new(INITIAL_MAGNITUDE, INITIAL_UNIT));
    metric.status = classify_value(INITIAL_MAGNITUDE, &good, &warning);
    metric.good_threshold = Some(good);
    metric.warning_threshold = Some(warning);
    Ok(metric)
}

/// Parse `NAME:GOOD:WARN` as given to `dashboard --custom`.
pub fn parse_definition(definition: &str) -> Result<Metric, EvalError> {
    let mut parts = definition.rsplitn(3, ':');
    let warning = parts.next().unwrap_or_default();
    let good = parts
        .next()
        .ok_or_else(|| EvalError::InvalidDefinition(definition.to_string()))?;
    let name = parts
        .next()
        .ok_or_else(|| EvalError::InvalidDefinition(definition.to_string()))?;
    create_metric(name, good, warning)
}
