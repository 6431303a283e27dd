//! Command-line workflow, decoupled from clap and process state

pub mod orchestration;

pub use orchestration::{run_workflow, Environment, RunArgs, RunResult};
