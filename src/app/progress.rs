use crossterm::style::Color;
use tokio::sync::mpsc;

use crate::metrics::StatsSnapshot;

use super::output::{Segment, format_x100, write_line};

/// Prints one line per progress snapshot until the engine drops its senders.
pub(crate) fn setup_progress_printer(
    mut rx: mpsc::UnboundedReceiver<StatsSnapshot>,
    requested: usize,
    no_color: bool,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(snapshot) = rx.recv().await {
            let line = progress_line(&snapshot, requested);
            let mut out = std::io::stderr().lock();
            if write_line(&mut out, &line, no_color).is_err() {
                break;
            }
        }
    })
}

pub(crate) fn progress_line(snapshot: &StatsSnapshot, requested: usize) -> Vec<Segment> {
    vec![
        Segment::colored("Progress: ", Color::Blue),
        Segment::plain(format!("{}/{} reports", snapshot.total_processed, requested)),
        Segment::plain(" | "),
        Segment::colored(
            format!("{} reports/s", format_x100(snapshot.throughput_x100())),
            Color::Magenta,
        ),
    ]
}
