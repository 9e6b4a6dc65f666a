use std::num::NonZeroU64;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::args::{DispatchArgs, InitArgs, OutputFormat};
use crate::dispatch::{
    DispatchEngine, ProgressSink, RunConfig, RunContext, RunReport, SimulatedConfig,
    SimulatedExecutor,
};
use crate::error::{AppError, AppResult, ConfigError};
use crate::inputs::{ProxyDescriptor, Target, init_input_files, load_proxies, load_targets};
use crate::shutdown::CancellationFlag;
use crate::shutdown_handlers::setup_interrupt_handler;

use super::progress::setup_progress_printer;
use super::summary::{RunSummary, header_lines, print_lines, summary_lines};

/// Creates the template input files.
///
/// # Errors
///
/// Returns an error when a file cannot be written.
pub(crate) fn run_init(args: &InitArgs) -> AppResult<()> {
    let outcome = init_input_files(Path::new(&args.dir))?;
    for path in &outcome.existing {
        info!("Keeping existing {}", path.display());
    }
    Ok(())
}

/// Targets for this invocation: `--target` alone, or every valid entry of
/// the targets file in order.
///
/// # Errors
///
/// Returns an error when `--target` is invalid or no target is available.
pub(crate) fn resolve_targets(args: &DispatchArgs) -> AppResult<Vec<Target>> {
    if let Some(raw) = args.target.as_deref() {
        let target = match args.kind {
            Some(kind) => Target::parse_as(raw, kind)?,
            None => Target::parse(raw)?,
        };
        return Ok(vec![target]);
    }

    let path = Path::new(&args.targets_file);
    let mut targets = load_targets(path)?;
    if let Some(kind) = args.kind {
        targets.retain(|target| {
            let keep = target.kind() == kind;
            if !keep {
                warn!("Skipping {} target {} (want {})", target.kind(), target, kind);
            }
            keep
        });
    }
    if targets.is_empty() {
        return Err(AppError::config(ConfigError::NoTargets {
            path: path.to_path_buf(),
        }));
    }
    Ok(targets)
}

#[must_use]
pub(crate) const fn simulated_config(args: &DispatchArgs) -> SimulatedConfig {
    SimulatedConfig {
        delay_min: args.delay_min,
        delay_max: args.delay_max,
        success_percent: args.success_rate,
        seed: args.seed,
    }
}

/// Runs every resolved target in turn. An interrupt stops the current run
/// and skips the remaining targets.
///
/// # Errors
///
/// Returns an error when inputs are invalid or output cannot be written.
pub(crate) async fn run_dispatch(args: DispatchArgs) -> AppResult<()> {
    let targets = resolve_targets(&args)?;
    let proxies = load_proxies(Path::new(&args.proxies_file))?;
    if proxies.is_empty() {
        warn!("No proxies loaded from '{}'; using direct connection.", args.proxies_file);
    }

    let executor = SimulatedExecutor::new(simulated_config(&args)).map_err(AppError::validation)?;
    let engine = DispatchEngine::new(Arc::new(executor)).with_task_timeout(args.task_timeout);

    let cancel = CancellationFlag::new();
    let interrupt = setup_interrupt_handler(&cancel);

    let result = run_targets(&engine, &args, targets, &proxies, &cancel).await;
    interrupt.abort();
    result.map(|_| ())
}

/// Runs targets in order until one is interrupted. The flag stays set after
/// an interrupt, even one that landed after the last report was claimed, so
/// a second Ctrl+C still exits.
async fn run_targets(
    engine: &DispatchEngine,
    args: &DispatchArgs,
    targets: Vec<Target>,
    proxies: &[ProxyDescriptor],
    cancel: &CancellationFlag,
) -> AppResult<Vec<RunReport>> {
    let batch = targets.len();
    let mut reports = Vec::with_capacity(batch);
    for (position, target) in targets.into_iter().enumerate() {
        if batch > 1 {
            info!("Target {} of {}", position.saturating_add(1), batch);
        }
        let config = RunConfig {
            target,
            report_count: args.reports.get(),
            worker_count: args.workers.get(),
            proxies: proxies.to_vec(),
        };
        let report = run_one(engine, &config, args, cancel).await?;
        reports.push(report);
        if cancel.is_cancelled() {
            if position.saturating_add(1) < batch {
                warn!("Skipping remaining targets after interrupt.");
            }
            break;
        }
    }
    Ok(reports)
}

async fn run_one(
    engine: &DispatchEngine,
    config: &RunConfig,
    args: &DispatchArgs,
    cancel: &CancellationFlag,
) -> AppResult<RunReport> {
    let text = args.output_format == OutputFormat::Text;
    if text {
        print_lines(&header_lines(config), args.no_color)?;
    }

    let mut ctx = RunContext::new(cancel.clone());
    let mut printer = None;
    if let Some(every) = NonZeroU64::new(args.progress_every).filter(|_| text) {
        let (tx, rx) = mpsc::unbounded_channel();
        ctx = ctx.with_progress(ProgressSink::new(tx, every));
        printer = Some(setup_progress_printer(rx, config.report_count, args.no_color));
    }

    let started_at = chrono::Utc::now().to_rfc3339();
    let outcome = engine.run(config, &ctx).await;
    drop(ctx);
    if let Some(printer) = printer {
        printer.await?;
    }
    let report = outcome?;

    let summary = RunSummary::new(config, &report, &started_at);
    match args.output_format {
        OutputFormat::Text => print_lines(&summary_lines(&summary), args.no_color)?,
        OutputFormat::Json => println!("{}", serde_json::to_string(&summary)?),
    }
    Ok(report)
}
