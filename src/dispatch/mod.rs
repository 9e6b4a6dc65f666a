//! Dispatch engine: a bounded worker pool that runs a fixed number of report
//! tasks against one target, rotating proxies and recording outcomes.
mod context;
mod engine;
mod simulated;
mod task;


pub use context::{ProgressSink, RunContext};
pub use engine::{DispatchEngine, RunConfig, RunReport, proxy_for};
pub use simulated::{SimulatedConfig, SimulatedExecutor};
pub use task::{ReportExecutor, ReportTask};

/// Upper bound accepted for report and worker counts.
pub const MAX_COUNT: usize = 9_999;
