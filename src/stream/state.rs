//! Incremental `required` validation
//!
//! A [`ValidationState`] holds the required names not seen yet. Each call to
//! [`validate`] either hands the state back untouched or returns a new
//! snapshot with exactly one name removed. Snapshots share nothing mutable,
//! so earlier ones stay valid after the stream moves on.
//!
//! Matching is global: a field name anywhere in the stream satisfies the
//! requirement, whatever object it belongs to.

use std::sync::Arc;

use crate::schema::{CompileError, CompileOutcome, CompiledConstraint};

use super::token::Token;

/// Required property names not yet observed, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationState {
    not_found_yet: Arc<[String]>,
}

impl ValidationState {
    /// Seeds a state expecting every name in `names`.
    ///
    /// A name listed more than once is kept at its first position only, so
    /// one matching key always satisfies it. Use [`compile`](crate::schema::compile)
    /// when repeats should be reported as an error instead.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names.into_iter().map(Into::into) {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self {
            not_found_yet: unique.into(),
        }
    }

    /// A terminal state: nothing left to find.
    pub fn satisfied() -> Self {
        Self::new(std::iter::empty::<String>())
    }

    pub fn from_constraint(constraint: &CompiledConstraint) -> Self {
        Self::new(constraint.names().iter().cloned())
    }

    /// Seeds a state from a compile outcome.
    ///
    /// A missing keyword gives a terminal state. A malformed one is handed
    /// back so no validation runs against that schema.
    pub fn seed(outcome: &CompileOutcome) -> Result<Self, CompileError> {
        match outcome {
            CompileOutcome::Absent => Ok(Self::satisfied()),
            CompileOutcome::Value(constraint) => Ok(Self::from_constraint(constraint)),
            CompileOutcome::Error(err) => Err(err.clone()),
        }
    }

    /// True while at least one required name is outstanding.
    pub fn has_errors(&self) -> bool {
        !self.not_found_yet.is_empty()
    }

    /// True once every required name has been seen. Absorbing.
    pub fn is_terminal(&self) -> bool {
        self.not_found_yet.is_empty()
    }

    /// Names still outstanding, in schema order
    pub fn not_found_yet(&self) -> &[String] {
        &self.not_found_yet
    }

    pub fn remaining(&self) -> usize {
        self.not_found_yet.len()
    }

    /// True when both states are the very same snapshot, not just equal.
    pub fn shares_snapshot(&self, other: &ValidationState) -> bool {
        Arc::ptr_eq(&self.not_found_yet, &other.not_found_yet)
    }

    fn without(&self, index: usize) -> Self {
        let not_found_yet = self
            .not_found_yet
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, name)| name.clone())
            .collect();
        Self { not_found_yet }
    }
}

impl From<&CompiledConstraint> for ValidationState {
    fn from(constraint: &CompiledConstraint) -> Self {
        Self::from_constraint(constraint)
    }
}

/// Folds one token into the state.
///
/// Only field-name tokens can change anything. The first outstanding name
/// equal to the token text is removed; otherwise `state` comes back as is.
pub fn validate(state: ValidationState, token: &Token) -> ValidationState {
    if state.is_terminal() || !token.is_field_name() {
        return state;
    }
    let Some(text) = token.text() else {
        return state;
    };

    match state.not_found_yet.iter().position(|name| name == text) {
        Some(index) => state.without(index),
        None => state,
    }
}
