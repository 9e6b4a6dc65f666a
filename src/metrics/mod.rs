//! Run statistics: lock-free counters and point-in-time snapshots.
mod stats;

#[cfg(test)]
mod tests;

pub use stats::{RunStats, StatsSnapshot};
