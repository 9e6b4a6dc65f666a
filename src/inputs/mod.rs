//! Target and proxy providers: line-oriented input files, URL validation,
//! and template creation for first runs.
mod init;
mod lines;
mod proxy;
mod target;

#[cfg(test)]
mod tests;

pub use init::{InitOutcome, init_input_files};
pub use lines::{load_lines, parse_lines};
pub use proxy::{ProxyDescriptor, load_proxies, parse_proxies};
pub use target::{Target, TargetKind, load_targets};

/// Default file holding candidate target URLs.
pub const TARGETS_FILE: &str = "targets.txt";
/// Default file holding proxy descriptors.
pub const PROXIES_FILE: &str = "proxies.txt";
/// Reserved for live-import workflows; created but never read.
pub const REALTIME_TARGETS_FILE: &str = "realtime_targets.txt";
