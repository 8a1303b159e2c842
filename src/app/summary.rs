use std::cmp::Reverse;
use std::time::Duration;

use crossterm::style::{Color, Stylize};

use crate::http::ErrorKind;
use crate::metrics::{RunSummary, ratio_x100};

/// Divisor for x100 fixed-point values.
const X100_DIVISOR: u64 = 100;
/// Bytes per MiB, reported as MB.
const BYTES_PER_MB: u128 = 1_048_576;
const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const RULE_WIDTH: usize = 60;

/// Renders the human-readable report, one entry per line.
#[must_use]
pub fn summary_lines(summary: &RunSummary, no_color: bool) -> Vec<String> {
    let rule = "=".repeat(RULE_WIDTH);
    let total = summary.total_requests;
    let mut lines = vec![
        String::new(),
        rule.clone(),
        paint("LOAD TEST RESULTS", Color::Cyan, no_color),
        rule.clone(),
        format!("Total Requests:     {}", total),
        paint(
            &format!(
                "Successful:         {} ({})",
                summary.successful_requests,
                format_percent_x100(summary.success_rate_x100)
            ),
            Color::Green,
            no_color,
        ),
        paint(
            &format!(
                "Failed:             {} ({})",
                summary.failed_requests,
                format_percent_x100(summary.failure_rate_x100())
            ),
            if summary.failed_requests > 0 {
                Color::Red
            } else {
                Color::Reset
            },
            no_color,
        ),
        format!("Test Duration:      {}", format_duration(summary.duration)),
        format!(
            "Requests/sec:       {}",
            format_fixed_x100(summary.requests_per_sec_x100)
        ),
        format!(
            "Data Transferred:   {} MB",
            format_fixed_x100(megabytes_x100(summary.total_bytes))
        ),
        String::new(),
        paint("Response Time Statistics:", Color::Cyan, no_color),
        format!("  Average:          {}", format_duration(summary.average_time)),
        format!("  Median (50th):    {}", format_duration(summary.median_time)),
        format!("  95th percentile:  {}", format_duration(summary.p95_time)),
        format!("  99th percentile:  {}", format_duration(summary.p99_time)),
        format!("  Min:              {}", format_duration(summary.min_time)),
        format!("  Max:              {}", format_duration(summary.max_time)),
    ];

    if !summary.status_breakdown.is_empty() {
        lines.push(String::new());
        lines.push(paint("HTTP Status Code Breakdown:", Color::Cyan, no_color));
        for (code, count) in &summary.status_breakdown {
            lines.push(format!(
                "  {}: {} ({})",
                code,
                count,
                format_percent_x100(ratio_x100(*count, total))
            ));
        }
    }

    let errors = sorted_errors(summary);
    if !errors.is_empty() {
        let (transport, semantic) = summary.failure_tiers();
        lines.push(String::new());
        lines.push(paint("Error Type Breakdown:", Color::Cyan, no_color));
        lines.push(format!("  Transport failures: {}", transport));
        lines.push(format!("  Semantic failures:  {}", semantic));
        for (kind, count) in errors {
            lines.push(paint(
                &format!(
                    "  {}: {} ({})",
                    kind,
                    count,
                    format_percent_x100(ratio_x100(count, total))
                ),
                if kind.is_transport() {
                    Color::Red
                } else {
                    Color::Yellow
                },
                no_color,
            ));
        }
    }

    lines.push(rule);
    lines
}

/// Error kinds by count, largest first; ties keep kind order.
fn sorted_errors(summary: &RunSummary) -> Vec<(ErrorKind, u64)> {
    let mut errors: Vec<(ErrorKind, u64)> = summary
        .error_breakdown
        .iter()
        .map(|(kind, count)| (*kind, *count))
        .collect();
    errors.sort_by_key(|(_, count)| Reverse(*count));
    errors
}

fn paint(text: &str, color: Color, no_color: bool) -> String {
    if no_color || color == Color::Reset {
        return text.to_owned();
    }
    text.with(color).to_string()
}

fn megabytes_x100(bytes: u64) -> u64 {
    let scaled = u128::from(bytes)
        .saturating_mul(u128::from(X100_DIVISOR))
        .checked_div(BYTES_PER_MB)
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

pub(super) fn format_fixed_x100(value: u64) -> String {
    format!(
        "{}.{:02}",
        value.checked_div(X100_DIVISOR).unwrap_or(0),
        value.checked_rem(X100_DIVISOR).unwrap_or(0)
    )
}

fn format_percent_x100(value: u64) -> String {
    format!("{}%", format_fixed_x100(value))
}

/// `1.250s`, `42.318ms`, `870µs`.
pub(super) fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos >= NANOS_PER_SEC {
        format!(
            "{}.{:03}s",
            nanos.checked_div(NANOS_PER_SEC).unwrap_or(0),
            nanos
                .checked_rem(NANOS_PER_SEC)
                .and_then(|rest| rest.checked_div(NANOS_PER_MILLI))
                .unwrap_or(0)
        )
    } else if nanos >= NANOS_PER_MILLI {
        format!(
            "{}.{:03}ms",
            nanos.checked_div(NANOS_PER_MILLI).unwrap_or(0),
            nanos
                .checked_rem(NANOS_PER_MILLI)
                .and_then(|rest| rest.checked_div(NANOS_PER_MICRO))
                .unwrap_or(0)
        )
    } else {
        format!("{}µs", nanos.checked_div(NANOS_PER_MICRO).unwrap_or(0))
    }
}
