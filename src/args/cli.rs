use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use crate::dispatch::MAX_COUNT;
use crate::error::ValidationError;
use crate::inputs::TargetKind;

use super::parsers::{parse_bounded_count, parse_delay_arg, parse_duration_arg, parse_percent};
use super::types::{BoundedCount, OutputFormat};

/// Per-report timeout of the ultra-fast preset.
pub const ULTRA_FAST_TASK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Create targets.txt, proxies.txt and realtime_targets.txt templates
    Init(InitArgs),
}

#[derive(Debug, Args, Clone)]
pub struct InitArgs {
    /// Directory to create the input files in
    #[arg(long = "dir", default_value = ".")]
    pub dir: String,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Fan out a bounded number of concurrent simulated reports against one target, with proxy rotation and live throughput stats."
)]
pub struct DispatchArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Target URL (falls back to every entry of the targets file)
    #[arg(long, short = 'u')]
    pub target: Option<String>,

    /// Require the target to be this kind (derived from the URL otherwise)
    #[arg(long, ignore_case = true)]
    pub kind: Option<TargetKind>,

    /// Number of reports per target (1-9999)
    #[arg(
        long = "reports",
        short = 'n',
        default_value = "100",
        value_parser = parse_bounded_count
    )]
    pub reports: BoundedCount,

    /// Number of concurrent workers (1-9999)
    #[arg(
        long = "workers",
        short = 'c',
        alias = "threads",
        default_value = "500",
        value_parser = parse_bounded_count
    )]
    pub workers: BoundedCount,

    /// Fixed preset: 9999 reports on 9999 workers with a 5s per-report timeout
    #[arg(long = "ultra-fast", conflicts_with_all = ["reports", "workers", "task_timeout"])]
    pub ultra_fast: bool,

    /// Proxy list, one descriptor per line
    #[arg(long = "proxies-file", default_value = "proxies.txt")]
    pub proxies_file: String,

    /// Target list, one URL per line
    #[arg(long = "targets-file", default_value = "targets.txt")]
    pub targets_file: String,

    /// Per-report timeout (supports ms/s/m)
    #[arg(long = "task-timeout", default_value = "10s", value_parser = parse_duration_arg)]
    pub task_timeout: Duration,

    /// Print progress every N completed reports (0 disables)
    #[arg(long = "progress-every", default_value_t = 100)]
    pub progress_every: u64,

    /// Simulated success probability in percent (0-100)
    #[arg(long = "success-rate", default_value = "90", value_parser = parse_percent)]
    pub success_rate: u8,

    /// Lower bound of the simulated per-report delay
    #[arg(long = "delay-min", default_value = "10ms", value_parser = parse_delay_arg)]
    pub delay_min: Duration,

    /// Upper bound of the simulated per-report delay
    #[arg(long = "delay-max", default_value = "50ms", value_parser = parse_delay_arg)]
    pub delay_max: Duration,

    /// Seed for reproducible simulated outcomes
    #[arg(long)]
    pub seed: Option<u64>,

    /// Config file (.toml or .json); defaults to fanout.toml / fanout.json
    #[arg(long)]
    pub config: Option<String>,

    /// Summary output format
    #[arg(long = "output-format", default_value = "text", ignore_case = true)]
    pub output_format: OutputFormat,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl DispatchArgs {
    /// Applies the ultra-fast preset when requested. Runs after config so the
    /// preset wins over config counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the preset count falls outside the accepted range.
    pub fn apply_presets(&mut self) -> Result<(), ValidationError> {
        if self.ultra_fast {
            let count = BoundedCount::try_from(MAX_COUNT)?;
            self.reports = count;
            self.workers = count;
            self.task_timeout = ULTRA_FAST_TASK_TIMEOUT;
        }
        Ok(())
    }
}
