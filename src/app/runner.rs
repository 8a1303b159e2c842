use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::args::{PositiveU64, PositiveUsize, TesterArgs};
use crate::error::{AppError, AppResult, HttpError};
use crate::http::{
    Dispatch, RequestExecutor, RequestSpec, dispatch, setup_progress_reporter,
};
use crate::metrics::{RunSummary, setup_stats_collector};

/// Size and pacing of one run.
#[derive(Debug, Clone, Copy)]
pub struct LoadTestPlan {
    pub total_requests: PositiveU64,
    pub concurrency: PositiveUsize,
    pub progress_interval: PositiveU64,
}

impl LoadTestPlan {
    #[must_use]
    pub const fn from_args(args: &TesterArgs) -> Self {
        Self {
            total_requests: args.requests,
            concurrency: args.concurrency,
            progress_interval: args.progress_interval,
        }
    }
}

/// Runs the whole load test and returns its summary.
///
/// Wires the dispatcher, the stats collector and the progress reporter
/// together. Per-request failures end up in the summary, never here.
///
/// # Errors
///
/// Returns an error when the dispatcher or collector task dies.
pub async fn run_load_test<E>(
    spec: Arc<RequestSpec>,
    plan: LoadTestPlan,
    executor: Arc<E>,
) -> AppResult<RunSummary>
where
    E: RequestExecutor + 'static,
{
    let total = plan.total_requests.get();
    info!(
        "Starting load test: {} requests with {} concurrent workers",
        total,
        plan.concurrency.get()
    );
    info!("Target URL: {}", spec.url);
    info!("Expected status: {}", spec.expected_status);
    if !spec.expected_body.is_empty() {
        info!("Expected body contains: {}", spec.expected_body);
    }

    let run_start = Instant::now();
    let (progress_tx, progress_rx) = mpsc::unbounded_channel();
    let progress = setup_progress_reporter(total, plan.progress_interval, progress_rx);

    let Dispatch {
        outcomes,
        coordinator,
    } = dispatch(spec, total, plan.concurrency, executor, Some(progress_tx));
    let collector = setup_stats_collector(outcomes, run_start);

    let report = coordinator
        .await
        .map_err(|err| AppError::http(HttpError::DispatcherJoinFailed { source: err }))?;
    let summary = collector
        .await
        .map_err(|err| AppError::http(HttpError::CollectorJoinFailed { source: err }))?;
    if let Err(err) = progress.await {
        warn!("Progress reporter failed: {}", err);
    }

    debug!(
        "Dispatcher spawned {} tasks, {} completed",
        report.spawned, report.completed
    );
    Ok(summary)
}
