use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures_util::FutureExt;
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, ConfigError, TaskError};
use crate::inputs::{ProxyDescriptor, Target, TargetKind};
use crate::metrics::{RunStats, StatsSnapshot};
use crate::shutdown::CancellationFlag;

use super::context::{ProgressSink, RunContext};
use super::task::{ReportExecutor, ReportTask};

pub const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(10);

/// Parameters of one run. Immutable once the run starts.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub target: Target,
    pub report_count: usize,
    pub worker_count: usize,
    pub proxies: Vec<ProxyDescriptor>,
}

impl RunConfig {
    #[must_use]
    pub const fn kind(&self) -> TargetKind {
        self.target.kind()
    }

    /// More workers than reports would only idle.
    #[must_use]
    pub fn effective_workers(&self) -> usize {
        self.worker_count.min(self.report_count)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.report_count == 0 {
            return Err(ConfigError::ZeroReports);
        }
        if self.worker_count == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }
}

/// Result of a run: final counters plus whether it stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunReport {
    #[serde(flatten)]
    pub stats: StatsSnapshot,
    pub requested: usize,
    pub workers: usize,
    pub cancelled: bool,
}

/// Proxy for the `index`-th task: strict round-robin, `None` when the pool is
/// empty.
#[must_use]
pub fn proxy_for(proxies: &[ProxyDescriptor], index: usize) -> Option<ProxyDescriptor> {
    index
        .checked_rem(proxies.len())
        .and_then(|slot| proxies.get(slot))
        .cloned()
}

/// Hands out task indices to workers. Claiming is the submission point.
struct TaskQueue {
    target: Arc<Target>,
    proxies: Arc<[ProxyDescriptor]>,
    total: usize,
    next: AtomicUsize,
}

impl TaskQueue {
    fn new(config: &RunConfig) -> Self {
        Self {
            target: Arc::new(config.target.clone()),
            proxies: Arc::from(config.proxies.as_slice()),
            total: config.report_count,
            next: AtomicUsize::new(0),
        }
    }

    fn claim(&self) -> Option<ReportTask> {
        let index = self.next.fetch_add(1, Ordering::AcqRel);
        if index >= self.total {
            return None;
        }
        Some(ReportTask {
            index,
            target: Arc::clone(&self.target),
            proxy: proxy_for(&self.proxies, index),
        })
    }
}

struct Worker {
    id: usize,
    queue: Arc<TaskQueue>,
    stats: Arc<RunStats>,
    executor: Arc<dyn ReportExecutor>,
    cancel: CancellationFlag,
    progress: Option<ProgressSink>,
    task_timeout: Duration,
}

impl Worker {
    async fn run(self) {
        loop {
            if self.cancel.is_cancelled() {
                break;
            }
            let Some(task) = self.queue.claim() else {
                break;
            };
            if self.cancel.is_cancelled() {
                debug!(worker = self.id, index = task.index, "Skipping report after cancel");
                break;
            }

            let outcome = self.execute(&task).await;
            if let Err(err) = &outcome {
                debug!(worker = self.id, index = task.index, "Report failed: {}", err);
            }
            let total = self.stats.record(outcome.is_ok());
            if let Some(progress) = self.progress.as_ref() {
                progress.observe(total, || self.stats.snapshot());
            }
        }
    }

    async fn execute(&self, task: &ReportTask) -> Result<(), TaskError> {
        let attempt = AssertUnwindSafe(self.executor.execute(task)).catch_unwind();
        match tokio::time::timeout(self.task_timeout, attempt).await {
            Err(_elapsed) => Err(TaskError::Timeout {
                timeout: self.task_timeout,
            }),
            Ok(Err(_panic)) => Err(TaskError::Panicked),
            Ok(Ok(Ok(true))) => Ok(()),
            Ok(Ok(Ok(false))) => Err(TaskError::Rejected),
            Ok(Ok(Err(err))) => Err(err),
        }
    }
}

/// Runs report tasks on a bounded pool of tokio workers.
#[derive(Clone)]
pub struct DispatchEngine {
    executor: Arc<dyn ReportExecutor>,
    task_timeout: Duration,
}

impl std::fmt::Debug for DispatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchEngine")
            .field("task_timeout", &self.task_timeout)
            .finish_non_exhaustive()
    }
}

impl DispatchEngine {
    #[must_use]
    pub fn new(executor: Arc<dyn ReportExecutor>) -> Self {
        Self {
            executor,
            task_timeout: DEFAULT_TASK_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_task_timeout(mut self, task_timeout: Duration) -> Self {
        self.task_timeout = task_timeout;
        self
    }

    #[must_use]
    pub const fn task_timeout(&self) -> Duration {
        self.task_timeout
    }

    /// Executes `config.report_count` reports with at most
    /// `config.effective_workers()` in flight.
    ///
    /// Task failures only increment the failure count. When the context is
    /// cancelled no new reports start, in-flight ones finish, and the partial
    /// counts are returned with `cancelled` set.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the report or worker count is zero.
    pub async fn run(&self, config: &RunConfig, ctx: &RunContext) -> AppResult<RunReport> {
        config.validate().map_err(AppError::config)?;

        let workers = config.effective_workers();
        let queue = Arc::new(TaskQueue::new(config));
        let stats = Arc::new(RunStats::new());
        info!(
            target_url = %config.target,
            kind = %config.kind(),
            reports = config.report_count,
            workers,
            proxies = config.proxies.len(),
            "Starting dispatch"
        );

        let mut pool = JoinSet::new();
        for id in 0..workers {
            let worker = Worker {
                id,
                queue: Arc::clone(&queue),
                stats: Arc::clone(&stats),
                executor: Arc::clone(&self.executor),
                cancel: ctx.cancel.clone(),
                progress: ctx.progress.clone(),
                task_timeout: self.task_timeout,
            };
            pool.spawn(worker.run());
        }

        while let Some(joined) = pool.join_next().await {
            if let Err(err) = joined {
                warn!("Worker terminated abnormally: {}", err);
            }
        }

        let snapshot = stats.snapshot();
        let total = usize::try_from(snapshot.total_processed).unwrap_or(usize::MAX);
        let cancelled = ctx.cancel.is_cancelled() && total < config.report_count;
        if cancelled {
            warn!(
                completed = snapshot.total_processed,
                requested = config.report_count,
                "Dispatch cancelled"
            );
        } else {
            info!(
                completed = snapshot.total_processed,
                success = snapshot.success_count,
                failure = snapshot.failure_count,
                elapsed_ms = u64::try_from(snapshot.elapsed.as_millis()).unwrap_or(u64::MAX),
                "Dispatch finished"
            );
        }

        Ok(RunReport {
            stats: snapshot,
            requested: config.report_count,
            workers,
            cancelled,
        })
    }
}
