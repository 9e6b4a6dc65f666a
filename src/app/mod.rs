mod output;
mod progress;
mod runner;
mod summary;

pub(crate) use runner::{run_dispatch, run_init};
