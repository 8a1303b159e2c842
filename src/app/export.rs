use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Value, json};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, AppResult, SinkError};
use crate::metrics::RunSummary;

/// Builds the machine-readable report.
///
/// Durations are milliseconds, percentages are plain decimals (60.0 for
/// 60%), map keys are strings.
#[must_use]
pub fn summary_json(summary: &RunSummary, url: &str, started_at: DateTime<Utc>) -> Value {
    let error_breakdown: BTreeMap<&str, u64> = summary
        .error_breakdown
        .iter()
        .map(|(kind, count)| (kind.as_str(), *count))
        .collect();
    let status_breakdown: BTreeMap<String, u64> = summary
        .status_breakdown
        .iter()
        .map(|(code, count)| (code.to_string(), *count))
        .collect();
    let response_times_ms: Vec<f64> = summary
        .response_times
        .iter()
        .map(|elapsed| duration_ms(*elapsed))
        .collect();
    let (transport_failures, semantic_failures) = summary.failure_tiers();

    json!({
        "url": url,
        "started_at": started_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        "total_requests": summary.total_requests,
        "successful_requests": summary.successful_requests,
        "failed_requests": summary.failed_requests,
        "success_rate": from_x100(summary.success_rate_x100),
        "failure_rate": from_x100(summary.failure_rate_x100()),
        "duration_ms": duration_ms(summary.duration),
        "requests_per_sec": from_x100(summary.requests_per_sec_x100),
        "total_bytes": summary.total_bytes,
        "response_time_ms": {
            "average": duration_ms(summary.average_time),
            "median": duration_ms(summary.median_time),
            "p95": duration_ms(summary.p95_time),
            "p99": duration_ms(summary.p99_time),
            "min": duration_ms(summary.min_time),
            "max": duration_ms(summary.max_time)
        },
        "status_breakdown": status_breakdown,
        "error_breakdown": error_breakdown,
        "failure_tiers": {
            "transport": transport_failures,
            "semantic": semantic_failures
        },
        "response_times_ms": response_times_ms
    })
}

#[expect(
    clippy::float_arithmetic,
    reason = "JSON report carries fractional milliseconds"
)]
fn duration_ms(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

#[expect(
    clippy::float_arithmetic,
    reason = "JSON report carries decimal percentages and rates"
)]
fn from_x100(value: u64) -> f64 {
    value as f64 / 100.0
}

/// Prints `report` to stdout.
///
/// # Errors
///
/// Returns an error when stdout cannot be written.
pub async fn write_stdout(report: &str) -> AppResult<()> {
    let mut stdout = tokio::io::stdout();
    let mut contents = report.to_owned();
    contents.push('\n');
    stdout
        .write_all(contents.as_bytes())
        .await
        .map_err(|err| AppError::sink(SinkError::WriteStdout { source: err }))?;
    stdout
        .flush()
        .await
        .map_err(|err| AppError::sink(SinkError::WriteStdout { source: err }))
}

/// Writes `report` to `path`, replacing any previous content.
///
/// # Errors
///
/// Returns an error when the file cannot be written.
pub async fn write_output_file(path: &str, report: &str) -> AppResult<()> {
    let mut contents = report.to_owned();
    contents.push('\n');
    tokio::fs::write(path, contents).await.map_err(|err| {
        AppError::sink(SinkError::WriteReport {
            path: PathBuf::from(path),
            source: err,
        })
    })
}
