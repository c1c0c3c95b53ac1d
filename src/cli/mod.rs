//! CLI module
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP API
//! - query: One-shot query printed as JSON

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{query, query_to_writer, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_json, write_stdout};
