//! Tokens and the token-source seam
//!
//! The validator only needs two things from a parser: pull the next token,
//! and look at the current one. Anything that can do both is a
//! [`TokenSource`].

use std::fmt;

use super::errors::StreamResult;

/// Kind of a JSON token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `{`
    StartObject,
    /// `}`
    EndObject,
    /// `[`
    StartArray,
    /// `]`
    EndArray,
    /// An object key
    FieldName,
    /// A string value
    String,
    /// A number value
    Number,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::StartObject => "START_OBJECT",
            TokenKind::EndObject => "END_OBJECT",
            TokenKind::StartArray => "START_ARRAY",
            TokenKind::EndArray => "END_ARRAY",
            TokenKind::FieldName => "FIELD_NAME",
            TokenKind::String => "VALUE_STRING",
            TokenKind::Number => "VALUE_NUMBER",
            TokenKind::True => "VALUE_TRUE",
            TokenKind::False => "VALUE_FALSE",
            TokenKind::Null => "VALUE_NULL",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single token with its decoded text.
///
/// `depth` counts the containers enclosing the token: the root value has
/// depth 0 and the keys of a root object have depth 1. The validator itself
/// never looks at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: Option<String>,
    depth: usize,
}

impl Token {
    /// Creates a token without text (punctuation and literals).
    pub fn new(kind: TokenKind, depth: usize) -> Self {
        Self {
            kind,
            text: None,
            depth,
        }
    }

    /// Creates a token carrying text (field names, strings, numbers).
    pub fn with_text(kind: TokenKind, text: impl Into<String>, depth: usize) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            depth,
        }
    }

    /// Shorthand for a key of the root object.
    pub fn field_name(name: impl Into<String>) -> Self {
        Self::with_text(TokenKind::FieldName, name, 1)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Decoded text for field names, strings and numbers
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_field_name(&self) -> bool {
        self.kind == TokenKind::FieldName
    }
}

/// A forward-only cursor over JSON tokens.
pub trait TokenSource {
    /// Advances to the next token and returns its kind, or `None` at end of input.
    fn next_token(&mut self) -> StreamResult<Option<TokenKind>>;

    /// The token the cursor currently points at.
    ///
    /// `None` before the first call to [`next_token`](Self::next_token) and
    /// after end of input.
    fn current(&self) -> Option<&Token>;
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    fn next_token(&mut self) -> StreamResult<Option<TokenKind>> {
        (**self).next_token()
    }

    fn current(&self) -> Option<&Token> {
        (**self).current()
    }
}

/// Replays an in-memory sequence of tokens.
#[derive(Debug, Clone)]
pub struct TokenReplay<I: Iterator<Item = Token>> {
    tokens: I,
    current: Option<Token>,
}

impl<I: Iterator<Item = Token>> TokenReplay<I> {
    pub fn new(tokens: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            current: None,
        }
    }
}

impl<I: Iterator<Item = Token>> TokenSource for TokenReplay<I> {
    fn next_token(&mut self) -> StreamResult<Option<TokenKind>> {
        self.current = self.tokens.next();
        Ok(self.current.as_ref().map(Token::kind))
    }

    fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }
}
