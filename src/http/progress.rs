use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::args::PositiveU64;

/// True when `done` completions warrant a progress line.
#[must_use]
pub const fn should_report(done: u64, total: u64, interval: PositiveU64) -> bool {
    done == total || matches!(done.checked_rem(interval.get()), Some(0))
}

/// Logs `Progress: <done>/<total>` lines from completion counts.
///
/// Ends when every sender has been dropped.
#[must_use]
pub fn setup_progress_reporter(
    total: u64,
    interval: PositiveU64,
    mut progress_rx: mpsc::UnboundedReceiver<u64>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(done) = progress_rx.recv().await {
            if should_report(done, total, interval) {
                info!("Progress: {}/{} requests completed", done, total);
            }
        }
    })
}
