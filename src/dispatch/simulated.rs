use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{TaskError, ValidationError};

use super::task::{ReportExecutor, ReportTask};

pub const DEFAULT_DELAY_MIN: Duration = Duration::from_millis(10);
pub const DEFAULT_DELAY_MAX: Duration = Duration::from_millis(50);
pub const DEFAULT_SUCCESS_PERCENT: u8 = 90;
const PERCENT_SCALE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedConfig {
    pub delay_min: Duration,
    pub delay_max: Duration,
    pub success_percent: u8,
    pub seed: Option<u64>,
}

impl Default for SimulatedConfig {
    fn default() -> Self {
        Self {
            delay_min: DEFAULT_DELAY_MIN,
            delay_max: DEFAULT_DELAY_MAX,
            success_percent: DEFAULT_SUCCESS_PERCENT,
            seed: None,
        }
    }
}

/// Stand-in for a network call: sleeps a random delay, then flips a biased
/// coin.
#[derive(Debug, Clone)]
pub struct SimulatedExecutor {
    config: SimulatedConfig,
}

impl SimulatedExecutor {
    /// # Errors
    ///
    /// Returns an error when the delay range is inverted or the success
    /// percentage exceeds 100.
    pub fn new(config: SimulatedConfig) -> Result<Self, ValidationError> {
        if config.delay_min > config.delay_max {
            return Err(ValidationError::DelayRangeInverted);
        }
        if u32::from(config.success_percent) > PERCENT_SCALE {
            return Err(ValidationError::SuccessRateOutOfRange {
                value: u64::from(config.success_percent),
            });
        }
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &SimulatedConfig {
        &self.config
    }

    /// Draws the delay and outcome for one task. Seeded runs derive the
    /// generator from the task index so results do not depend on scheduling.
    fn draw(&self, index: usize) -> (Duration, bool) {
        match self.config.seed {
            Some(seed) => {
                let stream = u64::try_from(index).unwrap_or(u64::MAX);
                let mut rng = StdRng::seed_from_u64(seed ^ stream.rotate_left(17));
                self.draw_with(&mut rng)
            }
            None => self.draw_with(&mut rand::thread_rng()),
        }
    }

    fn draw_with<R: Rng>(&self, rng: &mut R) -> (Duration, bool) {
        let min = u64::try_from(self.config.delay_min.as_micros()).unwrap_or(u64::MAX);
        let max = u64::try_from(self.config.delay_max.as_micros()).unwrap_or(u64::MAX);
        let delay = Duration::from_micros(rng.gen_range(min..=max));
        let success = rng.gen_ratio(u32::from(self.config.success_percent), PERCENT_SCALE);
        (delay, success)
    }
}

#[async_trait]
impl ReportExecutor for SimulatedExecutor {
    async fn execute(&self, task: &ReportTask) -> Result<bool, TaskError> {
        let (delay, success) = self.draw(task.index);
        tokio::time::sleep(delay).await;
        Ok(success)
    }
}
