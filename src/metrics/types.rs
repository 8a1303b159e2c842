use std::collections::BTreeMap;
use std::time::Duration;

use crate::http::{Classification, ErrorKind};

/// Result of one request attempt.
///
/// A request succeeded exactly when its `error_kind` is [`ErrorKind::None`];
/// there is no separate flag that could disagree with the classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Observed HTTP status, 0 when no response was received.
    pub status_code: u16,
    /// Time from just before the call started until it returned or failed.
    pub elapsed: Duration,
    pub error_kind: ErrorKind,
    pub error_message: String,
    /// Payload bytes read, 0 if unknown.
    pub response_bytes: u64,
}

impl Outcome {
    #[must_use]
    pub fn new(
        status_code: u16,
        elapsed: Duration,
        classification: Classification,
        response_bytes: u64,
    ) -> Self {
        Self {
            status_code,
            elapsed,
            error_kind: classification.kind,
            error_message: classification.message,
            response_bytes,
        }
    }

    #[must_use]
    pub fn succeeded(status_code: u16, elapsed: Duration, response_bytes: u64) -> Self {
        Self::new(
            status_code,
            elapsed,
            Classification::success(),
            response_bytes,
        )
    }

    #[must_use]
    pub fn failed(
        error_kind: ErrorKind,
        error_message: impl Into<String>,
        status_code: u16,
        elapsed: Duration,
    ) -> Self {
        Self {
            status_code,
            elapsed,
            error_kind,
            error_message: error_message.into(),
            response_bytes: 0,
        }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.error_kind == ErrorKind::None
    }
}

/// Final aggregate of a run. Built once, when the outcome stream closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    /// Success percentage scaled by 100 (60% is 6000).
    pub success_rate_x100: u64,
    pub average_time: Duration,
    pub min_time: Duration,
    pub max_time: Duration,
    pub median_time: Duration,
    pub p95_time: Duration,
    pub p99_time: Duration,
    pub error_breakdown: BTreeMap<ErrorKind, u64>,
    pub status_breakdown: BTreeMap<u16, u64>,
    pub total_bytes: u64,
    /// Requests per wall-clock second scaled by 100.
    pub requests_per_sec_x100: u64,
    pub duration: Duration,
    /// Every observed elapsed time, sorted ascending.
    pub response_times: Vec<Duration>,
}

impl RunSummary {
    #[must_use]
    pub const fn failure_rate_x100(&self) -> u64 {
        if self.total_requests == 0 {
            return 0;
        }
        10_000u64.saturating_sub(self.success_rate_x100)
    }

    /// Failures split into `(transport, semantic)`: requests that never got
    /// a usable response versus responses that missed expectations.
    #[must_use]
    pub fn failure_tiers(&self) -> (u64, u64) {
        self.error_breakdown
            .iter()
            .fold((0u64, 0u64), |(transport, semantic), (kind, count)| {
                if kind.is_transport() {
                    (transport.saturating_add(*count), semantic)
                } else if *kind == ErrorKind::None {
                    (transport, semantic)
                } else {
                    (transport, semantic.saturating_add(*count))
                }
            })
    }
}
