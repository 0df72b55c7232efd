//! Compiles the `required` keyword of a schema document
//!
//! Checks, in order, stopping at the first failure:
//! 1. The keyword value is an array
//! 2. Every element is a string
//! 3. No string appears twice
//!
//! Compilation is a pure function of the schema value.

use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::debug;

use super::errors::{CompileError, REQUIRED_KEYWORD};
use super::types::{CompileOutcome, CompiledConstraint, NodeKind};

/// Compiles the `required` member of `schema`.
///
/// A schema that is not an object has no members and yields
/// [`CompileOutcome::Absent`].
pub fn compile(schema: &Value) -> CompileOutcome {
    let Some(required) = schema.get(REQUIRED_KEYWORD) else {
        return CompileOutcome::Absent;
    };

    let outcome = match compile_required(required) {
        Ok(constraint) => CompileOutcome::Value(constraint),
        Err(err) => CompileOutcome::Error(err),
    };

    match &outcome {
        CompileOutcome::Value(constraint) => {
            debug!(names = constraint.len(), "compiled required constraint")
        }
        CompileOutcome::Error(err) => {
            debug!(code = err.code().code(), error = %err, "rejected required constraint")
        }
        CompileOutcome::Absent => {}
    }

    outcome
}

fn compile_required(required: &Value) -> Result<CompiledConstraint, CompileError> {
    let elements = required.as_array().ok_or(CompileError::NotAnArray {
        found: NodeKind::of(required),
    })?;

    let mut names = Vec::with_capacity(elements.len());
    let mut non_strings = Vec::new();
    for element in elements {
        match element {
            Value::String(name) => names.push(name.clone()),
            other => non_strings.push(NodeKind::of(other)),
        }
    }

    if !non_strings.is_empty() {
        return Err(CompileError::NonStringElements { kinds: non_strings });
    }

    let duplicates = duplicates(&names);
    if !duplicates.is_empty() {
        return Err(CompileError::DuplicateNames { names: duplicates });
    }

    Ok(CompiledConstraint::new(names))
}

/// Names occurring more than once, each listed once in first-occurrence order.
fn duplicates(names: &[String]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::with_capacity(names.len());
    for name in names {
        *counts.entry(name.as_str()).or_default() += 1;
    }

    let mut reported = HashSet::new();
    names
        .iter()
        .filter(|name| counts[name.as_str()] > 1 && reported.insert(name.as_str()))
        .cloned()
        .collect()
}
