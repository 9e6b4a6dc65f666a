use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;

/// Success count lives in the high half, failure count in the low half, so
/// one `fetch_add` updates both totals together and every load observes
/// `total == success + failure`.
const SUCCESS_SHIFT: u32 = 32;
const SUCCESS_UNIT: u64 = 1 << SUCCESS_SHIFT;
const FAILURE_UNIT: u64 = 1;
const FAILURE_MASK: u64 = u32::MAX as u64;

const MICROS_PER_SEC: u128 = 1_000_000;
const FIXED_POINT: u128 = 100;
const PERCENT_FIXED_POINT: u128 = 10_000;

/// Shared aggregate for one run. Each half holds up to `u32::MAX` records.
#[derive(Debug)]
pub struct RunStats {
    counts: AtomicU64,
    started: Instant,
}

impl RunStats {
    #[must_use]
    pub fn new() -> Self {
        Self::started_at(Instant::now())
    }

    #[must_use]
    pub const fn started_at(started: Instant) -> Self {
        Self {
            counts: AtomicU64::new(0),
            started,
        }
    }

    /// Records one outcome and returns the total processed after it.
    pub fn record(&self, success: bool) -> u64 {
        let delta = if success { SUCCESS_UNIT } else { FAILURE_UNIT };
        let previous = self.counts.fetch_add(delta, Ordering::AcqRel);
        let (success_count, failure_count) = unpack(previous.wrapping_add(delta));
        success_count.saturating_add(failure_count)
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        let (success_count, failure_count) = unpack(self.counts.load(Ordering::Acquire));
        StatsSnapshot {
            success_count,
            failure_count,
            total_processed: success_count.saturating_add(failure_count),
            elapsed: self.started.elapsed(),
        }
    }

    #[must_use]
    pub const fn started(&self) -> Instant {
        self.started
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

const fn unpack(word: u64) -> (u64, u64) {
    (word >> SUCCESS_SHIFT, word & FAILURE_MASK)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub success_count: u64,
    pub failure_count: u64,
    pub total_processed: u64,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl StatsSnapshot {
    /// Completed reports per second, times 100. Zero before any time has
    /// elapsed.
    #[must_use]
    pub fn throughput_x100(&self) -> u64 {
        let micros = self.elapsed.as_micros();
        if micros == 0 {
            return 0;
        }
        let scaled = u128::from(self.total_processed)
            .saturating_mul(FIXED_POINT)
            .saturating_mul(MICROS_PER_SEC)
            .checked_div(micros)
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }

    /// Percentage of successful reports, times 100. Zero when nothing has
    /// been processed.
    #[must_use]
    pub fn success_rate_x100(&self) -> u64 {
        let scaled = u128::from(self.success_count)
            .saturating_mul(PERCENT_FIXED_POINT)
            .checked_div(u128::from(self.total_processed))
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }
}

fn serialize_millis<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
    serializer.serialize_u64(millis)
}
