use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Semaphore, mpsc};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::Instant;
use tracing::{debug, error};

use crate::args::PositiveUsize;
use crate::metrics::Outcome;

use super::classify::ErrorKind;
use super::executor::RequestExecutor;
use super::spec::RequestSpec;

const OUTCOME_CHANNEL_CAPACITY: usize = 10_000;

/// Handles returned by [`dispatch`].
#[derive(Debug)]
pub struct Dispatch {
    /// Closes once every request task has delivered its outcome.
    pub outcomes: mpsc::Receiver<Outcome>,
    pub coordinator: JoinHandle<DispatchReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub spawned: u64,
    pub completed: u64,
}

struct TaskContext<E> {
    spec: Arc<RequestSpec>,
    executor: Arc<E>,
    gate: Arc<Semaphore>,
    outcome_tx: mpsc::Sender<Outcome>,
    completed: Arc<AtomicU64>,
    progress_tx: Option<mpsc::UnboundedSender<u64>>,
}

impl<E> Clone for TaskContext<E> {
    fn clone(&self) -> Self {
        Self {
            spec: Arc::clone(&self.spec),
            executor: Arc::clone(&self.executor),
            gate: Arc::clone(&self.gate),
            outcome_tx: self.outcome_tx.clone(),
            completed: Arc::clone(&self.completed),
            progress_tx: self.progress_tx.clone(),
        }
    }
}

/// Launches `total_requests` request tasks with at most `concurrency` of
/// them executing at any instant.
///
/// Every task yields exactly one outcome. The outcome stream closes only
/// after all tasks have been joined. Each delivered outcome also sends the
/// running completion count to `progress_tx`.
#[must_use]
pub fn dispatch<E>(
    spec: Arc<RequestSpec>,
    total_requests: u64,
    concurrency: PositiveUsize,
    executor: Arc<E>,
    progress_tx: Option<mpsc::UnboundedSender<u64>>,
) -> Dispatch
where
    E: RequestExecutor + 'static,
{
    let capacity = usize::try_from(total_requests)
        .unwrap_or(OUTCOME_CHANNEL_CAPACITY)
        .clamp(1, OUTCOME_CHANNEL_CAPACITY);
    let (outcome_tx, outcomes) = mpsc::channel(capacity);

    let context = TaskContext {
        spec,
        executor,
        gate: Arc::new(Semaphore::new(concurrency.get())),
        outcome_tx,
        completed: Arc::new(AtomicU64::new(0)),
        progress_tx,
    };

    let coordinator = tokio::spawn(async move {
        let mut tasks = JoinSet::new();
        let mut spawned = 0u64;
        while spawned < total_requests {
            tasks.spawn(run_request_task(context.clone()));
            spawned = spawned.saturating_add(1);
        }

        let mut completed = 0u64;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(()) => completed = completed.saturating_add(1),
                Err(err) => error!("Request task did not finish: {}", err),
            }
        }
        // Last sender; dropping it ends the outcome stream.
        drop(context);

        DispatchReport { spawned, completed }
    });

    Dispatch {
        outcomes,
        coordinator,
    }
}

async fn run_request_task<E>(context: TaskContext<E>)
where
    E: RequestExecutor + 'static,
{
    let outcome = execute_admitted(&context).await;
    if !outcome.success() {
        debug!(
            "Request failed ({}): {}",
            outcome.error_kind, outcome.error_message
        );
    }

    if context.outcome_tx.send(outcome).await.is_err() {
        error!("Outcome stream closed before the run finished");
        return;
    }

    let done = context
        .completed
        .fetch_add(1, Ordering::Relaxed)
        .saturating_add(1);
    if let Some(progress_tx) = context.progress_tx.as_ref()
        && progress_tx.send(done).is_err()
    {
        debug!("Progress reporter is gone");
    }
}

async fn execute_admitted<E>(context: &TaskContext<E>) -> Outcome
where
    E: RequestExecutor + 'static,
{
    let permit = match Arc::clone(&context.gate).acquire_owned().await {
        Ok(permit) => permit,
        Err(err) => {
            return Outcome::failed(
                ErrorKind::Network,
                format!("Request task failed: {}", err),
                0,
                std::time::Duration::ZERO,
            );
        }
    };

    let admitted_at = Instant::now();
    let spec = Arc::clone(&context.spec);
    let executor = Arc::clone(&context.executor);
    let call = tokio::spawn(async move { executor.execute(&spec).await }).await;
    drop(permit);

    match call {
        Ok(outcome) => outcome,
        Err(err) => Outcome::failed(
            ErrorKind::Network,
            format!("Request task failed: {}", err),
            0,
            admitted_at.elapsed(),
        ),
    }
}
