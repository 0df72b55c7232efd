//! Token-source errors
//!
//! The validator never fails. These errors come from reading and
//! tokenizing the input stream.

use std::io;

use thiserror::Error;

/// Failure to produce the next token
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("I/O error while reading JSON stream: {0}")]
    Io(#[from] io::Error),

    #[error("malformed JSON at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("unexpected end of JSON input at line {line}, column {column}")]
    UnexpectedEof { line: usize, column: usize },
}

impl StreamError {
    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            StreamError::Io(_) => "STREAM_IO_ERROR",
            StreamError::Syntax { .. } => "STREAM_SYNTAX_ERROR",
            StreamError::UnexpectedEof { .. } => "STREAM_UNEXPECTED_EOF",
        }
    }
}

/// Result type for token-source operations
pub type StreamResult<T> = Result<T, StreamError>;
