use std::time::Duration;

use serde::Deserialize;

use crate::args::OutputFormat;
use crate::args::parsers::{parse_delay_arg, parse_duration_arg};
use crate::error::ValidationError;
use crate::inputs::TargetKind;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(alias = "url")]
    pub target: Option<String>,
    pub kind: Option<TargetKind>,
    #[serde(alias = "report_count")]
    pub reports: Option<usize>,
    #[serde(alias = "threads", alias = "worker_count")]
    pub workers: Option<usize>,
    pub proxies_file: Option<String>,
    pub targets_file: Option<String>,
    pub task_timeout: Option<DurationValue>,
    pub progress_every: Option<u64>,
    pub success_rate: Option<u64>,
    pub delay_min: Option<DurationValue>,
    pub delay_max: Option<DurationValue>,
    pub seed: Option<u64>,
    pub output_format: Option<OutputFormat>,
    pub no_color: Option<bool>,
}

/// Whole seconds as a number, or a string with a unit (`"250ms"`, `"2m"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }

    pub(crate) fn to_delay(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_delay_arg(text),
        }
    }
}
