use std::time::Duration;

use super::PERCENT_DIVISOR;

pub(crate) const PERCENTILE_MEDIAN: u64 = 50;
pub(crate) const PERCENTILE_P95: u64 = 95;
pub(crate) const PERCENTILE_P99: u64 = 99;

/// Picks the value at `floor(len * p / 100)` from an ascending slice.
///
/// The index saturates at the last element, so on small samples the high
/// percentiles collapse to the maximum (p95 and p99 of five values are both
/// the largest one).
#[must_use]
pub fn percentile(sorted: &[Duration], percentile: u64) -> Duration {
    let Some(last) = sorted.len().checked_sub(1) else {
        return Duration::ZERO;
    };
    let len = u64::try_from(sorted.len()).unwrap_or(u64::MAX);
    let index = len
        .saturating_mul(percentile)
        .checked_div(PERCENT_DIVISOR)
        .unwrap_or(0);
    let idx = usize::try_from(index).map_or(last, |value| value.min(last));
    sorted.get(idx).copied().unwrap_or(Duration::ZERO)
}
