//! Core library for the `fanout` CLI.
//!
//! The heart of the crate is [`dispatch::DispatchEngine`]: a bounded pool of
//! tokio workers that executes a fixed number of report tasks against one
//! target, rotates proxy descriptors round-robin, enforces a per-task
//! timeout, and stops cooperatively when a [`shutdown::CancellationFlag`] is
//! set. Outcomes are aggregated lock-free in [`metrics::RunStats`].
//!
//! Report tasks run through the [`dispatch::ReportExecutor`] trait. The
//! bundled [`dispatch::SimulatedExecutor`] only sleeps and flips a biased
//! coin; no network requests are made.
mod app;
pub mod args;
pub mod config;
pub mod dispatch;
mod entry;
pub mod error;
pub mod inputs;
mod logger;
pub mod metrics;
pub mod shutdown;
pub mod shutdown_handlers;

pub use entry::run;
