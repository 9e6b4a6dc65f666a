use std::io::Write;

use crossterm::style::Color;
use serde::Serialize;

use crate::dispatch::{RunConfig, RunReport};
use crate::inputs::TargetKind;

use super::output::{Segment, format_x100, write_line};

const RULE_WIDTH: usize = 60;

/// Machine-readable record of one run.
#[derive(Debug, Serialize)]
pub(crate) struct RunSummary<'a> {
    pub(crate) target: &'a str,
    pub(crate) kind: TargetKind,
    pub(crate) started_at: &'a str,
    pub(crate) proxies: usize,
    #[serde(flatten)]
    pub(crate) report: &'a RunReport,
    pub(crate) success_rate_x100: u64,
    pub(crate) throughput_x100: u64,
}

impl<'a> RunSummary<'a> {
    pub(crate) fn new(config: &'a RunConfig, report: &'a RunReport, started_at: &'a str) -> Self {
        Self {
            target: config.target.url().as_str(),
            kind: config.kind(),
            started_at,
            proxies: config.proxies.len(),
            report,
            success_rate_x100: report.stats.success_rate_x100(),
            throughput_x100: report.stats.throughput_x100(),
        }
    }
}

pub(crate) fn header_lines(config: &RunConfig) -> Vec<Vec<Segment>> {
    let proxies = if config.proxies.is_empty() {
        "none (direct)".to_owned()
    } else {
        config.proxies.len().to_string()
    };
    vec![
        vec![Segment::colored(
            format!("Dispatching {} reports", config.report_count),
            Color::Magenta,
        )],
        vec![Segment::plain("Target: "), Segment::colored(config.target.to_string(), Color::Green)],
        vec![Segment::plain("Kind: "), Segment::plain(config.kind().as_str())],
        vec![
            Segment::plain("Workers: "),
            Segment::plain(config.effective_workers().to_string()),
        ],
        vec![Segment::plain("Proxies: "), Segment::plain(proxies)],
    ]
}

pub(crate) fn summary_lines(summary: &RunSummary<'_>) -> Vec<Vec<Segment>> {
    let stats = &summary.report.stats;
    let title = if summary.report.cancelled {
        Segment::colored("Run cancelled", Color::Yellow)
    } else {
        Segment::colored("Run completed", Color::Green)
    };
    let rule = "=".repeat(RULE_WIDTH);
    vec![
        vec![Segment::colored(rule.clone(), Color::Cyan)],
        vec![title],
        vec![
            Segment::plain("Successful: "),
            Segment::colored(stats.success_count.to_string(), Color::Green),
        ],
        vec![
            Segment::plain("Failed: "),
            Segment::colored(stats.failure_count.to_string(), Color::Red),
        ],
        vec![
            Segment::plain("Success rate: "),
            Segment::colored(format!("{}%", format_x100(summary.success_rate_x100)), Color::Blue),
        ],
        vec![Segment::plain(format!(
            "Elapsed: {}.{:02}s",
            stats.elapsed.as_secs(),
            stats.elapsed.subsec_millis() / 10
        ))],
        vec![
            Segment::plain("Throughput: "),
            Segment::colored(
                format!("{} reports/s", format_x100(summary.throughput_x100)),
                Color::Magenta,
            ),
        ],
        vec![Segment::plain(format!(
            "Total processed: {} of {}",
            stats.total_processed, summary.report.requested
        ))],
        vec![Segment::plain(format!("Kind: {}", summary.kind))],
        vec![Segment::colored(rule, Color::Cyan)],
    ]
}

pub(crate) fn print_lines(lines: &[Vec<Segment>], no_color: bool) -> Result<(), std::io::Error> {
    let mut out = std::io::stdout().lock();
    for line in lines {
        write_line(&mut out, line, no_color)?;
    }
    out.flush()
}
