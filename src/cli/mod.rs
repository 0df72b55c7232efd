//! CLI module for streamschema
//!
//! Provides command-line interface for:
//! - compile: Compile a schema's "required" keyword
//! - check: Stream a document through the validator

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, compile_schema, run, run_command};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{open_document, write_error, write_response};
