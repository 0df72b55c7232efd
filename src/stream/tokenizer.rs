//! Pull tokenizer over a byte stream
//!
//! Produces one token per call without building a document tree. A stack of
//! open containers decides whether a string is a key or a value and tracks
//! token depth. Several whitespace-separated root values may follow each
//! other in one stream.

use std::io::{BufReader, Bytes, Read};

use super::errors::{StreamError, StreamResult};
use super::token::{Token, TokenKind, TokenSource};

/// What the innermost open container expects next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// After `{`: a key or `}`
    KeyOrEnd,
    /// After `,` in an object: a key
    Key,
    /// After a key: `:`
    Colon,
    /// After `:` or `,` in an array: a value
    Value,
    /// After `[`: a value or `]`
    ValueOrEnd,
    /// After a complete member or element: `,` or the closing bracket
    CommaOrEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

#[derive(Debug)]
struct Frame {
    container: Container,
    expect: Expect,
}

/// Streaming JSON tokenizer implementing [`TokenSource`].
pub struct JsonTokenizer<R: Read> {
    bytes: Bytes<BufReader<R>>,
    peeked: Option<u8>,
    stack: Vec<Frame>,
    current: Option<Token>,
    /// Set after a root-level scalar; the next byte must delimit it
    needs_separator: bool,
    line: usize,
    column: usize,
}

impl<R: Read> JsonTokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            peeked: None,
            stack: Vec::new(),
            current: None,
            needs_separator: false,
            line: 1,
            column: 1,
        }
    }

    /// Number of containers currently open
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn peek(&mut self) -> StreamResult<Option<u8>> {
        if self.peeked.is_none() {
            self.peeked = self.bytes.next().transpose()?;
        }
        Ok(self.peeked)
    }

    fn bump(&mut self) -> StreamResult<Option<u8>> {
        let byte = self.peek()?;
        self.peeked = None;
        if let Some(b) = byte {
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        Ok(byte)
    }

    fn bump_required(&mut self) -> StreamResult<u8> {
        self.bump()?.ok_or(StreamError::UnexpectedEof {
            line: self.line,
            column: self.column,
        })
    }

    fn syntax(&self, message: impl Into<String>) -> StreamError {
        StreamError::Syntax {
            line: self.line,
            column: self.column,
            message: message.into(),
        }
    }

    fn skip_whitespace(&mut self) -> StreamResult<Option<u8>> {
        while let Some(b) = self.peek()? {
            if matches!(b, b' ' | b'\t' | b'\n' | b'\r') {
                self.bump()?;
            } else {
                return Ok(Some(b));
            }
        }
        Ok(None)
    }

    fn set_expect(&mut self, expect: Expect) {
        if let Some(frame) = self.stack.last_mut() {
            frame.expect = expect;
        }
    }

    /// Root scalars are not self-delimiting: `01` or `truefalse` must not
    /// split into two values.
    fn check_separator(&mut self) -> StreamResult<()> {
        if !std::mem::take(&mut self.needs_separator) {
            return Ok(());
        }
        match self.peek()? {
            None | Some(b' ' | b'\t' | b'\n' | b'\r' | b'{' | b'[') => Ok(()),
            Some(b) => Err(self.syntax(format!(
                "unexpected character '{}' (expected whitespace between root values)",
                char::from(b).escape_default()
            ))),
        }
    }

    fn produce(&mut self) -> StreamResult<Option<Token>> {
        self.check_separator()?;
        loop {
            let Some(b) = self.skip_whitespace()? else {
                if self.stack.is_empty() {
                    return Ok(None);
                }
                return Err(StreamError::UnexpectedEof {
                    line: self.line,
                    column: self.column,
                });
            };

            let Some(frame) = self.stack.last() else {
                let token = self.read_value(b)?;
                self.needs_separator = self.stack.is_empty();
                return Ok(Some(token));
            };

            match (frame.container, frame.expect, b) {
                (Container::Object, Expect::KeyOrEnd | Expect::CommaOrEnd, b'}') => {
                    return Ok(Some(self.close()?));
                }
                (Container::Array, Expect::ValueOrEnd | Expect::CommaOrEnd, b']') => {
                    return Ok(Some(self.close()?));
                }
                (Container::Object, Expect::KeyOrEnd | Expect::Key, b'"') => {
                    self.bump()?;
                    let name = self.read_string_body()?;
                    self.set_expect(Expect::Colon);
                    let depth = self.stack.len();
                    return Ok(Some(Token::with_text(TokenKind::FieldName, name, depth)));
                }
                (Container::Object, Expect::Colon, b':') => {
                    self.bump()?;
                    self.set_expect(Expect::Value);
                }
                (Container::Object, Expect::CommaOrEnd, b',') => {
                    self.bump()?;
                    self.set_expect(Expect::Key);
                }
                (Container::Array, Expect::CommaOrEnd, b',') => {
                    self.bump()?;
                    self.set_expect(Expect::Value);
                }
                (_, Expect::Value | Expect::ValueOrEnd, _) => {
                    return self.read_value(b).map(Some);
                }
                (_, expect, _) => {
                    return Err(self.syntax(format!(
                        "unexpected character '{}' ({})",
                        char::from(b).escape_default(),
                        describe(expect)
                    )));
                }
            }
        }
    }

    /// Consumes a closing bracket and pops its frame.
    fn close(&mut self) -> StreamResult<Token> {
        self.bump()?;
        let kind = match self.stack.pop().map(|frame| frame.container) {
            Some(Container::Object) => TokenKind::EndObject,
            Some(Container::Array) => TokenKind::EndArray,
            None => return Err(self.syntax("closing bracket without open container")),
        };
        Ok(Token::new(kind, self.stack.len()))
    }

    /// Reads the value starting at `first`. Containers are opened, not read.
    fn read_value(&mut self, first: u8) -> StreamResult<Token> {
        let depth = self.stack.len();
        // the enclosing container resumes after this value
        self.set_expect(Expect::CommaOrEnd);

        match first {
            b'{' => {
                self.bump()?;
                self.stack.push(Frame {
                    container: Container::Object,
                    expect: Expect::KeyOrEnd,
                });
                Ok(Token::new(TokenKind::StartObject, depth))
            }
            b'[' => {
                self.bump()?;
                self.stack.push(Frame {
                    container: Container::Array,
                    expect: Expect::ValueOrEnd,
                });
                Ok(Token::new(TokenKind::StartArray, depth))
            }
            b'"' => {
                self.bump()?;
                let text = self.read_string_body()?;
                Ok(Token::with_text(TokenKind::String, text, depth))
            }
            b'-' | b'0'..=b'9' => {
                let text = self.read_number()?;
                Ok(Token::with_text(TokenKind::Number, text, depth))
            }
            b't' => {
                self.expect_literal(b"true")?;
                Ok(Token::new(TokenKind::True, depth))
            }
            b'f' => {
                self.expect_literal(b"false")?;
                Ok(Token::new(TokenKind::False, depth))
            }
            b'n' => {
                self.expect_literal(b"null")?;
                Ok(Token::new(TokenKind::Null, depth))
            }
            other => Err(self.syntax(format!(
                "unexpected character '{}' (expected a value)",
                char::from(other).escape_default()
            ))),
        }
    }

    fn expect_literal(&mut self, literal: &[u8]) -> StreamResult<()> {
        for &expected in literal {
            let b = self.bump_required()?;
            if b != expected {
                return Err(self.syntax(format!(
                    "invalid literal, expected '{}'",
                    String::from_utf8_lossy(literal)
                )));
            }
        }
        Ok(())
    }

    fn read_number(&mut self) -> StreamResult<String> {
        let mut text = String::new();

        if self.peek()? == Some(b'-') {
            self.bump()?;
            text.push('-');
        }

        match self.peek()? {
            Some(b'0') => {
                self.bump()?;
                text.push('0');
            }
            Some(b'1'..=b'9') => self.read_digits(&mut text)?,
            _ => return Err(self.syntax("invalid number, expected a digit")),
        }

        if self.peek()? == Some(b'.') {
            self.bump()?;
            text.push('.');
            if !matches!(self.peek()?, Some(b'0'..=b'9')) {
                return Err(self.syntax("invalid number, expected a digit after '.'"));
            }
            self.read_digits(&mut text)?;
        }

        if let Some(e @ (b'e' | b'E')) = self.peek()? {
            self.bump()?;
            text.push(char::from(e));
            if let Some(sign @ (b'+' | b'-')) = self.peek()? {
                self.bump()?;
                text.push(char::from(sign));
            }
            if !matches!(self.peek()?, Some(b'0'..=b'9')) {
                return Err(self.syntax("invalid number, expected a digit in exponent"));
            }
            self.read_digits(&mut text)?;
        }

        Ok(text)
    }

    fn read_digits(&mut self, text: &mut String) -> StreamResult<()> {
        while let Some(d @ b'0'..=b'9') = self.peek()? {
            self.bump()?;
            text.push(char::from(d));
        }
        Ok(())
    }

    /// Reads a string after its opening quote, decoding escapes.
    fn read_string_body(&mut self) -> StreamResult<String> {
        let mut buf: Vec<u8> = Vec::new();
        loop {
            match self.bump_required()? {
                b'"' => break,
                b'\\' => self.read_escape(&mut buf)?,
                b if b < 0x20 => {
                    return Err(self.syntax("unescaped control character in string"));
                }
                b => buf.push(b),
            }
        }
        String::from_utf8(buf).map_err(|_| self.syntax("invalid UTF-8 in string"))
    }

    fn read_escape(&mut self, buf: &mut Vec<u8>) -> StreamResult<()> {
        let decoded = match self.bump_required()? {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{0008}',
            b'f' => '\u{000C}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => self.read_unicode_escape()?,
            other => {
                return Err(self.syntax(format!(
                    "invalid escape '\\{}'",
                    char::from(other).escape_default()
                )))
            }
        };
        let mut utf8 = [0u8; 4];
        buf.extend_from_slice(decoded.encode_utf8(&mut utf8).as_bytes());
        Ok(())
    }

    fn read_unicode_escape(&mut self) -> StreamResult<char> {
        let first = self.read_hex4()?;
        let code = match first {
            0xD800..=0xDBFF => {
                if self.bump_required()? != b'\\' || self.bump_required()? != b'u' {
                    return Err(self.syntax("unpaired surrogate in \\u escape"));
                }
                let second = self.read_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(self.syntax("invalid low surrogate in \\u escape"));
                }
                0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(self.syntax("unpaired surrogate in \\u escape")),
            _ => first,
        };
        char::from_u32(code).ok_or_else(|| self.syntax("invalid \\u escape"))
    }

    fn read_hex4(&mut self) -> StreamResult<u32> {
        let mut value = 0u32;
        for _ in 0..4 {
            let b = self.bump_required()?;
            let digit = char::from(b)
                .to_digit(16)
                .ok_or_else(|| self.syntax("invalid hex digit in \\u escape"))?;
            value = value * 16 + digit;
        }
        Ok(value)
    }
}

impl<R: Read> TokenSource for JsonTokenizer<R> {
    fn next_token(&mut self) -> StreamResult<Option<TokenKind>> {
        // clear first so a failed read leaves no stale token behind
        self.current = None;
        self.current = self.produce()?;
        Ok(self.current.as_ref().map(Token::kind))
    }

    fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }
}

impl<R: Read> std::fmt::Debug for JsonTokenizer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonTokenizer")
            .field("line", &self.line)
            .field("column", &self.column)
            .field("depth", &self.stack.len())
            .field("current", &self.current)
            .finish()
    }
}

fn describe(expect: Expect) -> &'static str {
    match expect {
        Expect::KeyOrEnd => "expected a field name or '}'",
        Expect::Key => "expected a field name",
        Expect::Colon => "expected ':'",
        Expect::Value => "expected a value",
        Expect::ValueOrEnd => "expected a value or ']'",
        Expect::CommaOrEnd => "expected ',' or a closing bracket",
    }
}
