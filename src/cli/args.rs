//! CLI argument definitions using clap
//!
//! Commands:
//! - streamschema compile --schema <path>
//! - streamschema check --schema <path> [--config <path>] [--top-level] <document>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// streamschema - validate streamed JSON against the schema "required" keyword
#[derive(Parser, Debug)]
#[command(name = "streamschema")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a schema's "required" keyword and print the result
    Compile {
        /// Path to the schema file
        #[arg(long)]
        schema: PathBuf,
    },

    /// Stream a document through the validator
    Check {
        /// Path to the schema file
        #[arg(long)]
        schema: PathBuf,

        /// Only accept keys of the root object
        #[arg(long)]
        top_level: bool,

        /// Keep reading after every required name was found
        #[arg(long)]
        read_all: bool,

        /// Document to validate, "-" for stdin
        #[arg(default_value = "-")]
        document: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
