use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use crate::dispatch::MAX_COUNT;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Report or worker count in `1..=9999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedCount(NonZeroUsize);

impl BoundedCount {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for BoundedCount {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        let out_of_range = || ValidationError::CountOutOfRange {
            value: u64::try_from(value).unwrap_or(u64::MAX),
            min: 1,
            max: MAX_COUNT as u64,
        };
        if value > MAX_COUNT {
            return Err(out_of_range());
        }
        NonZeroUsize::new(value)
            .map(BoundedCount)
            .ok_or_else(out_of_range)
    }
}

impl std::str::FromStr for BoundedCount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        BoundedCount::try_from(value)
    }
}

impl From<BoundedCount> for usize {
    fn from(value: BoundedCount) -> Self {
        value.get()
    }
}
