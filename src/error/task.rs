use std::time::Duration;

use thiserror::Error;

/// Failure of a single unit of work. Always recovered by the engine and
/// counted as a failed report; never aborts a run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Report was rejected.")]
    Rejected,
    #[error("Report timed out after {}ms.", .timeout.as_millis())]
    Timeout { timeout: Duration },
    #[error("Transport error: {message}")]
    Transport { message: String },
    #[error("Report executor panicked.")]
    Panicked,
}
