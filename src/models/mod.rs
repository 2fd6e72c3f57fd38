pub mod config;
pub mod metric;
pub mod threshold;

pub use metric::{Metric, Reading, Status};
pub use threshold::{ActivityState, Range, ThresholdPair, ThresholdTable};
