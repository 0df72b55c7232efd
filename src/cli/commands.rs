//! CLI command implementations
//!
//! Each command writes exactly one JSON response and reports whether the
//! run succeeded, which the binary maps to its exit code.

use std::io::Read;
use std::path::Path;

use serde_json::{json, Value};
use tracing::info;

use crate::logging;
use crate::schema::{CompileOutcome, SchemaLoader};
use crate::stream::{MatchScope, StreamOptions, StreamOutcome};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::CliResult;
use super::io::{open_document, write_response};

/// Parse arguments, set up logging and run the requested command.
///
/// Returns `Ok(false)` when the command ran but the document is invalid.
pub fn run() -> CliResult<bool> {
    let cli = Cli::parse_args();
    let config = Config::load_or_default(cli.config.as_deref())?;
    logging::init(&config.log_settings());
    run_command(cli.command, &config)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command, config: &Config) -> CliResult<bool> {
    match cmd {
        Command::Compile { schema } => compile_schema(&schema),
        Command::Check {
            schema,
            top_level,
            read_all,
            document,
        } => {
            let mut options = config.stream_options();
            if top_level {
                options.match_scope = MatchScope::TopLevel;
            }
            if read_all {
                options.stop_when_satisfied = false;
            }
            let reader = open_document(&document)?;
            check(&schema, reader, options)
        }
    }
}

/// Compile a schema's `required` keyword and print the names.
pub fn compile_schema(schema_path: &Path) -> CliResult<bool> {
    let outcome = SchemaLoader::compile_file(schema_path)?;
    write_response(compile_report(outcome)?)?;
    Ok(true)
}

fn compile_report(outcome: CompileOutcome) -> CliResult<Value> {
    let report = match outcome.into_result()? {
        None => json!({ "absent": true, "required": [] }),
        Some(constraint) => json!({ "absent": false, "required": constraint.names() }),
    };
    Ok(report)
}

/// Stream a document through the schema's `required` constraint.
pub fn check<R: Read>(schema_path: &Path, document: R, options: StreamOptions) -> CliResult<bool> {
    let schema = SchemaLoader::load_file(schema_path)?;

    info!(schema = %schema_path.display(), "validating document");
    let outcome = crate::check(&schema, document, options)?;

    let valid = !outcome.has_errors();
    info!(valid, tokens = outcome.tokens, "document checked");
    write_response(check_report(&outcome))?;
    Ok(valid)
}

fn check_report(outcome: &StreamOutcome) -> Value {
    json!({
        "valid": !outcome.has_errors(),
        "missing": outcome.state.not_found_yet(),
        "tokens": outcome.tokens,
        "reached_end": outcome.reached_end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{compile, CompileError, NodeKind};
    use crate::stream::ValidationState;
    use std::fs;
    use tempfile::TempDir;

    fn schema_file(content: &str) -> (TempDir, std::path::PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("schema.json");
        fs::write(&path, content).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn test_compile_report() {
        let outcome = compile(&json!({ "required": ["b", "a"] }));
        assert_eq!(
            compile_report(outcome).unwrap(),
            json!({ "absent": false, "required": ["b", "a"] })
        );
        assert_eq!(
            compile_report(CompileOutcome::Absent).unwrap(),
            json!({ "absent": true, "required": [] })
        );
    }

    #[test]
    fn test_compile_report_error() {
        let outcome = CompileOutcome::Error(CompileError::NotAnArray {
            found: NodeKind::Number,
        });
        let err = compile_report(outcome).unwrap_err();
        assert_eq!(err.code_str(), "REQUIRED_NOT_ARRAY");
    }

    #[test]
    fn test_check_valid_document() {
        let (_temp_dir, path) = schema_file(r#"{"required": ["latitude", "longitude"]}"#);
        let valid = check(
            &path,
            r#"{"longitude": 1, "latitude": 2}"#.as_bytes(),
            StreamOptions::default(),
        )
        .unwrap();
        assert!(valid);
    }

    #[test]
    fn test_check_invalid_document() {
        let (_temp_dir, path) = schema_file(r#"{"required": ["latitude", "longitude"]}"#);
        let document = r#"{"latitude": 2}"#.as_bytes();
        let valid = check(&path, document, StreamOptions::default()).unwrap();
        assert!(!valid);
    }

    #[test]
    fn test_check_malformed_schema() {
        let (_temp_dir, path) = schema_file(r#"{"required": ["a", "a"]}"#);
        let err = check(&path, "{}".as_bytes(), StreamOptions::default()).unwrap_err();
        assert_eq!(err.code_str(), "REQUIRED_DUPLICATE_NAMES");
    }

    #[test]
    fn test_check_malformed_document() {
        let (_temp_dir, path) = schema_file(r#"{"required": ["latitude"]}"#);
        let err = check(&path, "01".as_bytes(), StreamOptions::default()).unwrap_err();
        assert_eq!(err.code_str(), "STREAM_SYNTAX_ERROR");

        let err = check(&path, r#"{"lat"#.as_bytes(), StreamOptions::default()).unwrap_err();
        assert_eq!(err.code_str(), "STREAM_UNEXPECTED_EOF");
    }

    #[test]
    fn test_check_report_lists_missing() {
        let outcome = StreamOutcome {
            state: ValidationState::new(["longitude"]),
            tokens: 3,
            reached_end: true,
        };
        assert_eq!(
            check_report(&outcome),
            json!({ "valid": false, "missing": ["longitude"], "tokens": 3, "reached_end": true })
        );
    }
}
