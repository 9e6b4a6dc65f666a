use std::ffi::OsString;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::info;

use crate::app::{run_dispatch, run_init};
use crate::args::{Command, DispatchArgs};
use crate::config::{apply_config, load_config};
use crate::error::{AppError, AppResult, ValidationError};

/// Parses the command line, applies config, and runs the requested mode.
///
/// # Errors
///
/// Returns an error when arguments, config, or inputs are invalid, or when
/// output cannot be written.
pub fn run() -> AppResult<()> {
    run_from(std::env::args_os())
}

fn run_from<I>(raw_args: I) -> AppResult<()>
where
    I: IntoIterator<Item = OsString>,
{
    let matches = DispatchArgs::command().get_matches_from(raw_args);
    let args = resolve_args(&matches)?;

    crate::logger::init_logging(args.verbose, args.no_color);

    if let Some(Command::Init(init_args)) = &args.command {
        return run_init(init_args);
    }
    if args.ultra_fast {
        info!(
            reports = args.reports.get(),
            workers = args.workers.get(),
            task_timeout_ms = u64::try_from(args.task_timeout.as_millis()).unwrap_or(u64::MAX),
            "Ultra-fast preset enabled"
        );
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(ValidationError::RuntimeBuildFailed { source: err }))?;

    runtime.block_on(run_dispatch(args))
}

/// Final arguments: CLI values, then config for anything not given on the
/// command line, then presets.
fn resolve_args(matches: &ArgMatches) -> AppResult<DispatchArgs> {
    let mut args = DispatchArgs::from_arg_matches(matches)?;
    if args.command.is_some() {
        return Ok(args);
    }
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config)?;
    }
    args.apply_presets()?;
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn arg_matches(argv: &[&str]) -> AppResult<ArgMatches> {
        Ok(DispatchArgs::command().try_get_matches_from(argv.iter().copied())?)
    }

    #[test]
    fn config_no_color_reaches_resolved_args() -> AppResult<()> {
        let dir = tempdir()?;
        let path = dir.path().join("fanout.toml");
        std::fs::write(&path, "no_color = true\n")?;
        let path_arg = path.to_string_lossy().into_owned();
        let args = resolve_args(&arg_matches(&["fanout", "--config", &path_arg])?)?;
        if !args.no_color {
            return Err(AppError::validation("Config no_color was not applied"));
        }
        Ok(())
    }

    #[test]
    fn ultra_fast_wins_over_config_counts() -> AppResult<()> {
        let dir = tempdir()?;
        let path = dir.path().join("fanout.toml");
        std::fs::write(&path, "reports = 5\nworkers = 2\ntask_timeout = 30\n")?;
        let path_arg = path.to_string_lossy().into_owned();
        let args = resolve_args(&arg_matches(&["fanout", "--config", &path_arg, "--ultra-fast"])?)?;
        if args.reports.get() != 9_999 || args.workers.get() != 9_999 {
            return Err(AppError::validation("Preset counts should win over config"));
        }
        if args.task_timeout != crate::args::ULTRA_FAST_TASK_TIMEOUT {
            return Err(AppError::validation("Preset timeout should win over config"));
        }
        Ok(())
    }

    #[test]
    fn init_skips_config_loading() -> AppResult<()> {
        let args = resolve_args(&arg_matches(&["fanout", "--config", "missing.yaml", "init"])?)?;
        if !matches!(args.command, Some(Command::Init(_))) {
            return Err(AppError::validation("Expected init command"));
        }
        Ok(())
    }
}
