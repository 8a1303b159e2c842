mod finalize;
mod state;

use tokio::{sync::mpsc, task::JoinHandle, time::Instant};
use tracing::debug;

use super::{Outcome, RunSummary};

pub(crate) use finalize::ratio_x100;
#[cfg(test)]
pub(crate) use finalize::requests_per_sec_x100;
pub use state::StatsCollector;

/// Drains `outcomes` until every sender is gone, then finalises.
///
/// Arrival order does not matter: response times are re-sorted before any
/// percentile is taken.
pub async fn collect(mut outcomes: mpsc::Receiver<Outcome>, run_start: Instant) -> RunSummary {
    let mut collector = StatsCollector::new();
    while let Some(outcome) = outcomes.recv().await {
        collector.record(outcome);
    }
    debug!(
        "Outcome stream closed after {} outcomes",
        collector.total_requests()
    );
    collector.finish(run_start.elapsed())
}

/// Spawns [`collect`] as the single owner of the run's aggregates.
#[must_use]
pub fn setup_stats_collector(
    outcomes: mpsc::Receiver<Outcome>,
    run_start: Instant,
) -> JoinHandle<RunSummary> {
    tokio::spawn(collect(outcomes, run_start))
}
