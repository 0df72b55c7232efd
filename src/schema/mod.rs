//! Schema subsystem: compiles the JSON-Schema `required` keyword
//!
//! # Design Principles
//!
//! - Compilation is pure and runs once per schema
//! - Exactly one error is reported per malformed clause
//! - Errors are returned as data, never as panics
//! - A missing keyword is not an error

mod compiler;
mod errors;
mod loader;
mod types;

pub use compiler::compile;
pub use errors::{CompileError, LoadError, LoadResult, SchemaErrorCode, REQUIRED_KEYWORD};
pub use loader::SchemaLoader;
pub use types::{CompileOutcome, CompiledConstraint, NodeKind};
