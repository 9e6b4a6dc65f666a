use std::num::NonZeroU64;

use tokio::sync::mpsc;

use crate::metrics::StatsSnapshot;
use crate::shutdown::CancellationFlag;

/// Receives a snapshot every `every` completed reports.
#[derive(Debug, Clone)]
pub struct ProgressSink {
    tx: mpsc::UnboundedSender<StatsSnapshot>,
    every: NonZeroU64,
}

impl ProgressSink {
    #[must_use]
    pub const fn new(tx: mpsc::UnboundedSender<StatsSnapshot>, every: NonZeroU64) -> Self {
        Self { tx, every }
    }

    pub(super) fn observe(&self, total: u64, snapshot: impl FnOnce() -> StatsSnapshot) {
        if total.checked_rem(self.every.get()) == Some(0) {
            drop(self.tx.send(snapshot()));
        }
    }
}

/// Per-run collaborators handed to the engine instead of process globals.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub cancel: CancellationFlag,
    pub progress: Option<ProgressSink>,
}

impl RunContext {
    #[must_use]
    pub fn new(cancel: CancellationFlag) -> Self {
        Self {
            cancel,
            progress: None,
        }
    }

    #[must_use]
    pub fn with_progress(mut self, progress: ProgressSink) -> Self {
        self.progress = Some(progress);
        self
    }
}
