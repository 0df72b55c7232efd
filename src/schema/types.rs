//! Compiled forms of the `required` keyword

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::CompileError;

/// Kind of a JSON value, as named in compile errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl NodeKind {
    /// Returns the kind of the given value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => NodeKind::Null,
            Value::Bool(_) => NodeKind::Boolean,
            Value::Number(_) => NodeKind::Number,
            Value::String(_) => NodeKind::String,
            Value::Array(_) => NodeKind::Array,
            Value::Object(_) => NodeKind::Object,
        }
    }

    /// Returns the kind name for error messages
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Object => "object",
            NodeKind::Array => "array",
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Boolean => "boolean",
            NodeKind::Null => "null",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Property names that must appear as object keys in the validated stream.
///
/// Names keep the order the schema listed them in and never repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledConstraint {
    names: Vec<String>,
}

impl CompiledConstraint {
    /// Wraps an already checked, duplicate-free name list.
    pub(crate) fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Required names in schema order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Result of compiling the `required` keyword of one schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    /// The schema has no `required` member
    Absent,
    /// The keyword compiled successfully
    Value(CompiledConstraint),
    /// The keyword is malformed
    Error(CompileError),
}

impl CompileOutcome {
    pub fn is_absent(&self) -> bool {
        matches!(self, CompileOutcome::Absent)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CompileOutcome::Error(_))
    }

    /// Returns the compiled constraint, if any
    pub fn constraint(&self) -> Option<&CompiledConstraint> {
        match self {
            CompileOutcome::Value(constraint) => Some(constraint),
            _ => None,
        }
    }

    /// Returns the compile error, if any
    pub fn error(&self) -> Option<&CompileError> {
        match self {
            CompileOutcome::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Converts into a `Result` so callers can propagate with `?`.
    ///
    /// `Absent` maps to `Ok(None)`.
    pub fn into_result(self) -> Result<Option<CompiledConstraint>, CompileError> {
        match self {
            CompileOutcome::Absent => Ok(None),
            CompileOutcome::Value(constraint) => Ok(Some(constraint)),
            CompileOutcome::Error(err) => Err(err),
        }
    }
}
