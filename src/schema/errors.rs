//! Schema error types
//!
//! Error codes:
//! - REQUIRED_NOT_ARRAY
//! - REQUIRED_NON_STRING_ELEMENTS
//! - REQUIRED_DUPLICATE_NAMES
//! - SCHEMA_IO_ERROR
//! - SCHEMA_PARSE_ERROR

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::types::NodeKind;

/// Name of the schema keyword this crate compiles.
pub const REQUIRED_KEYWORD: &str = "required";

/// Stable codes for compile and load failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// `required` present but not an array
    RequiredNotArray,
    /// `required` array holds non-string elements
    RequiredNonStringElements,
    /// `required` array repeats a name
    RequiredDuplicateNames,
    /// Schema file could not be read
    SchemaIo,
    /// Schema file is not valid JSON
    SchemaParse,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::RequiredNotArray => "REQUIRED_NOT_ARRAY",
            SchemaErrorCode::RequiredNonStringElements => "REQUIRED_NON_STRING_ELEMENTS",
            SchemaErrorCode::RequiredDuplicateNames => "REQUIRED_DUPLICATE_NAMES",
            SchemaErrorCode::SchemaIo => "SCHEMA_IO_ERROR",
            SchemaErrorCode::SchemaParse => "SCHEMA_PARSE_ERROR",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A malformed `required` clause.
///
/// Exactly one of these is reported per compile, checked in declaration
/// order: the value's type first, then element types, then duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The keyword holds something other than an array
    #[error("\"{}\" field contains {found} instead of array", REQUIRED_KEYWORD)]
    NotAnArray {
        /// Kind of the value actually found
        found: NodeKind,
    },

    /// The array holds at least one non-string element
    #[error(
        "\"{}\" field contains array, including {} node types instead of only strings",
        REQUIRED_KEYWORD,
        bracketed(.kinds)
    )]
    NonStringElements {
        /// Kinds of the offending elements, in document order
        kinds: Vec<NodeKind>,
    },

    /// The array names the same property more than once
    #[error("\"{}\" field contains duplicates: {}", REQUIRED_KEYWORD, bracketed(.names))]
    DuplicateNames {
        /// Each repeated name once, in first-occurrence order
        names: Vec<String>,
    },
}

impl CompileError {
    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        match self {
            CompileError::NotAnArray { .. } => SchemaErrorCode::RequiredNotArray,
            CompileError::NonStringElements { .. } => SchemaErrorCode::RequiredNonStringElements,
            CompileError::DuplicateNames { .. } => SchemaErrorCode::RequiredDuplicateNames,
        }
    }
}

/// Failure to read a schema document from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read schema '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in schema '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        match self {
            LoadError::Io { .. } => SchemaErrorCode::SchemaIo,
            LoadError::Parse { .. } => SchemaErrorCode::SchemaParse,
        }
    }

    /// Returns the path of the schema that failed to load
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Io { path, .. } | LoadError::Parse { path, .. } => path,
        }
    }
}

/// Result type for schema loading
pub type LoadResult<T> = Result<T, LoadError>;

/// Renders items as `[a, b, c]`.
fn bracketed<T: fmt::Display>(items: &[T]) -> String {
    let joined: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", joined.join(", "))
}
