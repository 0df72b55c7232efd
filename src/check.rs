//! One-call validation: compile a schema, then stream a document through it

use std::io::Read;

use serde_json::Value;
use thiserror::Error;

use crate::schema::{compile, CompileError};
use crate::stream::{
    JsonTokenizer, StreamError, StreamOptions, StreamOutcome, StreamValidator, ValidationState,
};

/// Either half of a check can fail
#[derive(Debug, Error)]
pub enum CheckError {
    /// The schema's `required` clause is malformed; nothing was validated
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The document could not be read or tokenized
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl CheckError {
    pub fn code(&self) -> &'static str {
        match self {
            CheckError::Compile(err) => err.code().code(),
            CheckError::Stream(err) => err.code(),
        }
    }
}

/// Validates the JSON document read from `reader` against `schema`.
pub fn check<R: Read>(
    schema: &Value,
    reader: R,
    options: StreamOptions,
) -> Result<StreamOutcome, CheckError> {
    let state = ValidationState::seed(&compile(schema))?;
    let outcome = StreamValidator::new(options).run(state, JsonTokenizer::new(reader))?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_valid() {
        let schema = json!({ "required": ["id", "name"] });
        let outcome = check(
            &schema,
            r#"{"name": "x", "id": 7}"#.as_bytes(),
            StreamOptions::default(),
        )
        .unwrap();
        assert!(!outcome.has_errors());
    }

    #[test]
    fn test_check_missing() {
        let schema = json!({ "required": ["id", "name"] });
        let outcome = check(&schema, r#"{"id": 7}"#.as_bytes(), StreamOptions::default()).unwrap();
        assert_eq!(outcome.state.not_found_yet(), ["name"]);
    }

    #[test]
    fn test_compile_error_stops_check() {
        let schema = json!({ "required": ["id", "id"] });
        let err = check(&schema, "not even json".as_bytes(), StreamOptions::default()).unwrap_err();
        assert!(matches!(err, CheckError::Compile(CompileError::DuplicateNames { .. })));
        assert_eq!(err.code(), "REQUIRED_DUPLICATE_NAMES");
    }

    #[test]
    fn test_absent_keyword_always_passes() {
        let outcome = check(&json!({}), "".as_bytes(), StreamOptions::default()).unwrap();
        assert!(!outcome.has_errors());
    }

    #[test]
    fn test_stream_error_code() {
        let schema = json!({ "required": ["id", "name"] });
        let err = check(&schema, "{\"id\"".as_bytes(), StreamOptions::default()).unwrap_err();
        assert_eq!(err.code(), "STREAM_UNEXPECTED_EOF");
    }
}
