//! Streaming validation of the `required` keyword
//!
//! A document is never materialized. Tokens are pulled one at a time from a
//! [`TokenSource`] and folded into an immutable [`ValidationState`]:
//!
//! ```
//! use streamschema::stream::{validate, JsonTokenizer, TokenSource, ValidationState};
//!
//! let mut tokens = JsonTokenizer::new(r#"{"latitude": 1, "longitude": 2}"#.as_bytes());
//! let mut state = ValidationState::new(["latitude", "longitude"]);
//! while tokens.next_token()?.is_some() {
//!     if let Some(token) = tokens.current() {
//!         state = validate(state, token);
//!     }
//! }
//! assert!(!state.has_errors());
//! # Ok::<(), streamschema::stream::StreamError>(())
//! ```

mod driver;
mod errors;
mod state;
mod token;
mod tokenizer;

pub use driver::{MatchScope, StreamOptions, StreamOutcome, StreamValidator};
pub use errors::{StreamError, StreamResult};
pub use state::{validate, ValidationState};
pub use token::{Token, TokenKind, TokenReplay, TokenSource};
pub use tokenizer::JsonTokenizer;
