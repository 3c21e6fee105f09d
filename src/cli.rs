//! CLI argument parsing and run orchestration

pub mod args;
pub mod run;

// Re-export types for convenient access
pub use args::{ArgError, Cli, ParsedArgs, RunConfiguration, parse_args, utf8_args};
pub use run::{EXIT_FAILURE, EXIT_SUCCESS, RunError, RunSummary, run, run_cli};
