//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;


pub use cli::{Command, DispatchArgs, InitArgs, ULTRA_FAST_TASK_TIMEOUT};
pub use types::{BoundedCount, OutputFormat};
