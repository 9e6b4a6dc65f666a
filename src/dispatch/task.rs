use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TaskError;
use crate::inputs::{ProxyDescriptor, Target, TargetKind};

/// One unit of work: the `index`-th report of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTask {
    pub index: usize,
    pub target: Arc<Target>,
    pub proxy: Option<ProxyDescriptor>,
}

impl ReportTask {
    #[must_use]
    pub fn kind(&self) -> TargetKind {
        self.target.kind()
    }
}

/// Performs the outbound action for one report.
///
/// Implementations are called concurrently from every worker and must not
/// keep per-task state on `self`. `Ok(true)` is a success, `Ok(false)` a
/// rejected report. Timeouts are enforced by the engine, not here.
#[async_trait]
pub trait ReportExecutor: Send + Sync {
    async fn execute(&self, task: &ReportTask) -> Result<bool, TaskError>;
}
