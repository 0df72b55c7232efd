//! streamschema - incremental validation of streamed JSON against the
//! JSON-Schema `required` keyword
//!
//! Two parts, used in order:
//! - [`schema`] compiles the keyword from a schema document
//! - [`stream`] folds a token stream into an immutable validation state
//!
//! [`check()`] runs both over a reader in one call.

pub mod check;
pub mod cli;
pub mod logging;
pub mod schema;
pub mod stream;

pub use check::{check, CheckError};
