use tracing::{error, warn};

use crate::shutdown::CancellationFlag;

#[cfg(unix)]
use tokio::signal::unix::{Signal, SignalKind, signal};

/// Conventional exit status for a process stopped by SIGINT.
pub const EXIT_CODE_INTERRUPTED: i32 = 130;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    /// First interrupt: stop starting reports and let in-flight ones finish.
    Cancel,
    /// Interrupt while already winding down.
    Exit,
}

#[must_use]
pub fn on_interrupt(cancel: &CancellationFlag) -> InterruptAction {
    if cancel.cancel() {
        InterruptAction::Exit
    } else {
        InterruptAction::Cancel
    }
}

/// Wires Ctrl+C (and SIGTERM on unix) to `cancel`. A second interrupt exits
/// the process immediately. Abort the handle once the runs are over.
pub fn setup_interrupt_handler(cancel: &CancellationFlag) -> tokio::task::JoinHandle<()> {
    let cancel = cancel.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                error!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };

        loop {
            #[cfg(unix)]
            let received = wait_for_interrupt(term_signal.as_mut()).await;
            #[cfg(not(unix))]
            let received = tokio::signal::ctrl_c().await;

            if let Err(err) = received {
                error!("Failed to listen for Ctrl+C: {}", err);
                break;
            }

            match on_interrupt(&cancel) {
                InterruptAction::Cancel => {
                    warn!(
                        "Interrupt received; finishing in-flight reports. Press Ctrl+C again to exit immediately."
                    );
                }
                InterruptAction::Exit => {
                    eprintln!("Interrupted again; exiting.");
                    std::process::exit(EXIT_CODE_INTERRUPTED);
                }
            }
        }
    })
}

#[cfg(unix)]
async fn wait_for_interrupt(term_signal: Option<&mut Signal>) -> std::io::Result<()> {
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        () = async {
            if let Some(signal) = term_signal {
                signal.recv().await;
            } else {
                std::future::pending::<()>().await;
            }
        } => Ok(()),
    }
}
