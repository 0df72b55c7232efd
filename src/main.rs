//! streamschema CLI entry point
//!
//! Parses arguments, runs the command and maps the result to an exit code:
//! 0 when the schema compiled or the document is valid, 1 otherwise.

use streamschema::cli;

fn main() {
    match cli::run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            if cli::write_error(e.code_str(), e.message()).is_err() {
                eprintln!("{}", e);
            }
            std::process::exit(1);
        }
    }
}
