use std::collections::BTreeMap;
use std::time::Duration;

use crate::http::ErrorKind;

use super::super::{Outcome, RunSummary};
use super::finalize::finalize_summary;

/// Running aggregates for one run.
///
/// Owned by the collector task alone; workers only ever hand it outcomes
/// through the channel.
#[derive(Debug, Default)]
pub struct StatsCollector {
    pub(super) total_requests: u64,
    pub(super) successful_requests: u64,
    pub(super) failed_requests: u64,
    pub(super) elapsed_sum_nanos: u128,
    pub(super) min_time: Option<Duration>,
    pub(super) max_time: Duration,
    pub(super) total_bytes: u64,
    pub(super) error_breakdown: BTreeMap<ErrorKind, u64>,
    pub(super) status_breakdown: BTreeMap<u16, u64>,
    pub(super) response_times: Vec<Duration>,
}

impl StatsCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: Outcome) {
        self.total_requests = self.total_requests.saturating_add(1);
        self.total_bytes = self.total_bytes.saturating_add(outcome.response_bytes);

        if outcome.success() {
            self.successful_requests = self.successful_requests.saturating_add(1);
        } else {
            self.failed_requests = self.failed_requests.saturating_add(1);
            let count = self.error_breakdown.entry(outcome.error_kind).or_insert(0);
            *count = count.saturating_add(1);
        }

        if outcome.status_code > 0 {
            let count = self
                .status_breakdown
                .entry(outcome.status_code)
                .or_insert(0);
            *count = count.saturating_add(1);
        }

        let elapsed = outcome.elapsed;
        self.elapsed_sum_nanos = self.elapsed_sum_nanos.saturating_add(elapsed.as_nanos());
        if self.min_time.is_none_or(|min| elapsed < min) {
            self.min_time = Some(elapsed);
        }
        if elapsed > self.max_time {
            self.max_time = elapsed;
        }
        self.response_times.push(elapsed);
    }

    #[must_use]
    pub const fn total_requests(&self) -> u64 {
        self.total_requests
    }

    /// Consumes the collector and produces the run summary.
    ///
    /// `run_duration` is the wall-clock span of the whole run and drives the
    /// throughput figure.
    #[must_use]
    pub fn finish(self, run_duration: Duration) -> RunSummary {
        finalize_summary(self, run_duration)
    }
}
