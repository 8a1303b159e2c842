use std::time::Duration;

use super::super::percentiles::{PERCENTILE_MEDIAN, PERCENTILE_P95, PERCENTILE_P99, percentile};
use super::super::RunSummary;
use super::state::StatsCollector;

/// Fixed-point scale for percentages and rates.
const X100_SCALE: u128 = 10_000;
/// Microseconds per second, pre-multiplied by the x100 scale.
const RATE_SCALE_US: u128 = 100_000_000;

pub(super) fn finalize_summary(state: StatsCollector, run_duration: Duration) -> RunSummary {
    let StatsCollector {
        total_requests,
        successful_requests,
        failed_requests,
        elapsed_sum_nanos,
        min_time,
        max_time,
        total_bytes,
        error_breakdown,
        status_breakdown,
        mut response_times,
    } = state;

    response_times.sort_unstable();

    let average_time = average_duration(elapsed_sum_nanos, total_requests);

    RunSummary {
        total_requests,
        successful_requests,
        failed_requests,
        success_rate_x100: ratio_x100(successful_requests, total_requests),
        average_time,
        min_time: min_time.unwrap_or(Duration::ZERO),
        max_time,
        median_time: percentile(&response_times, PERCENTILE_MEDIAN),
        p95_time: percentile(&response_times, PERCENTILE_P95),
        p99_time: percentile(&response_times, PERCENTILE_P99),
        error_breakdown,
        status_breakdown,
        total_bytes,
        requests_per_sec_x100: requests_per_sec_x100(total_requests, run_duration),
        duration: run_duration,
        response_times,
    }
}

fn average_duration(sum_nanos: u128, count: u64) -> Duration {
    let avg = sum_nanos.checked_div(u128::from(count)).unwrap_or(0);
    Duration::from_nanos(u64::try_from(avg).unwrap_or(u64::MAX))
}

/// `part / total` as a percentage scaled by 100, rounded to nearest; 0 when
/// `total` is 0.
pub(crate) fn ratio_x100(part: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    let scaled = rounded_div(
        u128::from(part).saturating_mul(X100_SCALE),
        u128::from(total),
    );
    u64::try_from(scaled).unwrap_or(0)
}

pub(crate) fn requests_per_sec_x100(total: u64, run_duration: Duration) -> u64 {
    if total == 0 {
        return 0;
    }
    let duration_us = run_duration.as_micros().max(1);
    let scaled = rounded_div(u128::from(total).saturating_mul(RATE_SCALE_US), duration_us);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// Half-up integer division; 0 for a zero divisor.
fn rounded_div(numerator: u128, divisor: u128) -> u128 {
    numerator
        .saturating_add(divisor.checked_div(2).unwrap_or(0))
        .checked_div(divisor)
        .unwrap_or(0)
}
