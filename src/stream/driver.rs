//! Drives a token source through the validator
//!
//! The driver owns the pull loop: it asks the source for the next token,
//! folds it into the state, and stops at end of input or, if configured,
//! as soon as nothing is left to find.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::errors::StreamResult;
use super::state::{validate, ValidationState};
use super::token::{Token, TokenSource};

/// Which field names may satisfy a requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchScope {
    /// Any field name at any depth
    #[default]
    Anywhere,
    /// Only keys of a root-level object
    TopLevel,
}

impl MatchScope {
    fn admits(&self, token: &Token) -> bool {
        match self {
            MatchScope::Anywhere => true,
            MatchScope::TopLevel => token.depth() == 1,
        }
    }
}

/// Options for [`StreamValidator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamOptions {
    pub match_scope: MatchScope,
    /// Stop pulling tokens once every required name has been seen.
    ///
    /// Input after that point is not read, so it is not checked for
    /// syntax errors either.
    pub stop_when_satisfied: bool,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            match_scope: MatchScope::Anywhere,
            stop_when_satisfied: true,
        }
    }
}

/// Final state of a run plus how much of the stream it consumed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamOutcome {
    pub state: ValidationState,
    /// Tokens pulled from the source
    pub tokens: usize,
    /// Whether the source reported end of input
    pub reached_end: bool,
}

impl StreamOutcome {
    pub fn has_errors(&self) -> bool {
        self.state.has_errors()
    }
}

/// Runs the `required` fold over a token source.
#[derive(Debug, Clone, Default)]
pub struct StreamValidator {
    options: StreamOptions,
}

impl StreamValidator {
    pub fn new(options: StreamOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &StreamOptions {
        &self.options
    }

    /// Feeds every token of `source` into `state`, in order.
    pub fn run<S: TokenSource>(
        &self,
        mut state: ValidationState,
        mut source: S,
    ) -> StreamResult<StreamOutcome> {
        let mut tokens = 0;
        let mut reached_end = false;

        loop {
            if self.options.stop_when_satisfied && state.is_terminal() {
                break;
            }
            if source.next_token()?.is_none() {
                reached_end = true;
                break;
            }
            tokens += 1;

            let Some(token) = source.current() else {
                continue;
            };
            trace!(kind = %token.kind(), depth = token.depth(), "token");
            if !self.options.match_scope.admits(token) {
                continue;
            }

            let before = state.remaining();
            state = validate(state, token);
            if state.remaining() < before {
                debug!(
                    name = token.text().unwrap_or_default(),
                    remaining = state.remaining(),
                    "required property found"
                );
            }
        }

        debug!(
            tokens,
            reached_end,
            missing = state.remaining(),
            "stream validation finished"
        );
        Ok(StreamOutcome {
            state,
            tokens,
            reached_end,
        })
    }
}
