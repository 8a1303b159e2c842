//! Outcome records, the streaming stats collector, and percentile helpers.
mod collector;
mod percentiles;
mod types;


pub(crate) use collector::ratio_x100;
pub use collector::{StatsCollector, collect, setup_stats_collector};
pub use percentiles::percentile;
pub use types::{Outcome, RunSummary};

/// Divisor for percent values and fixed-point x100 figures.
pub(crate) const PERCENT_DIVISOR: u64 = 100;
