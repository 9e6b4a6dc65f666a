use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::parsers::parse_percent;
use crate::args::{BoundedCount, DispatchArgs};
use crate::error::{ConfigError, ValidationError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. Options given explicitly
/// on the command line win.
///
/// # Errors
///
/// Returns an error when a config value is out of range.
pub fn apply_config(
    args: &mut DispatchArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> Result<(), ConfigError> {
    if !is_cli(matches, "target")
        && let Some(target) = config.target.clone()
    {
        args.target = Some(target);
    }

    if !is_cli(matches, "kind")
        && let Some(kind) = config.kind
    {
        args.kind = Some(kind);
    }

    if !is_cli(matches, "reports")
        && let Some(reports) = config.reports
    {
        args.reports = bounded(reports, "reports")?;
    }

    if !is_cli(matches, "workers")
        && let Some(workers) = config.workers
    {
        args.workers = bounded(workers, "workers")?;
    }

    if !is_cli(matches, "proxies_file")
        && let Some(path) = config.proxies_file.clone()
    {
        args.proxies_file = path;
    }

    if !is_cli(matches, "targets_file")
        && let Some(path) = config.targets_file.clone()
    {
        args.targets_file = path;
    }

    if !is_cli(matches, "task_timeout")
        && let Some(timeout) = config.task_timeout.as_ref()
    {
        args.task_timeout = timeout.to_duration().map_err(field("task_timeout"))?;
    }

    if !is_cli(matches, "progress_every")
        && let Some(every) = config.progress_every
    {
        args.progress_every = every;
    }

    if !is_cli(matches, "success_rate")
        && let Some(rate) = config.success_rate
    {
        args.success_rate = parse_percent(&rate.to_string()).map_err(field("success_rate"))?;
    }

    if !is_cli(matches, "delay_min")
        && let Some(delay) = config.delay_min.as_ref()
    {
        args.delay_min = delay.to_delay().map_err(field("delay_min"))?;
    }

    if !is_cli(matches, "delay_max")
        && let Some(delay) = config.delay_max.as_ref()
    {
        args.delay_max = delay.to_delay().map_err(field("delay_max"))?;
    }

    if !is_cli(matches, "seed")
        && let Some(seed) = config.seed
    {
        args.seed = Some(seed);
    }

    if !is_cli(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn bounded(value: usize, field_name: &'static str) -> Result<BoundedCount, ConfigError> {
    BoundedCount::try_from(value).map_err(field(field_name))
}

fn field(name: &'static str) -> impl Fn(ValidationError) -> ConfigError {
    move |source| ConfigError::InvalidField { field: name, source }
}
