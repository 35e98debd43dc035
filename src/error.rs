//! The decoder's error taxonomy: EOF, unexpected byte, invalid token, and
//! trailing input, with the exact `Display` formats normatively required of
//! the external interface.

use std::fmt;

use thiserror::Error;

/// The four kinds of error the core can raise. Each carries only the
/// minimal payload needed to render its message; the absolute byte
/// position is carried separately on [`ParseError`] so that streaming
/// callers can adjust it uniformly by a running chunk offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Input was exhausted while a token or structure was incomplete, in a
    /// context that does not support continuation, or the caller demanded a
    /// complete parse.
    #[error("unexpected end of input")]
    Eof,
    /// A byte not permitted by the current context.
    #[error("unexpected byte 0x{0:02X}")]
    UnexpectedByte(u8),
    /// A syntactically well-formed token that failed semantic conversion:
    /// an out-of-range float literal, or a malformed/orphaned `\u` escape.
    #[error("invalid token {0:?}")]
    InvalidToken(String),
    /// A complete value was followed by non-whitespace input.
    #[error("trailing input")]
    TrailingInput(Vec<u8>),
}

/// A decode error, tagged with the absolute byte position (measured from
/// the start of the logical input, chunk offsets already applied) at which
/// it was raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.render())]
pub struct ParseError {
    /// 0-based byte offset into the logical input.
    pub position: usize,
    /// What went wrong.
    pub kind: ErrorKind,
}

impl ParseError {
    fn render(&self) -> String {
        render(&self.position, &self.kind)
    }

    pub(crate) fn eof(position: usize) -> Self {
        ParseError {
            position,
            kind: ErrorKind::Eof,
        }
    }

    pub(crate) fn unexpected_byte(position: usize, byte: u8) -> Self {
        ParseError {
            position,
            kind: ErrorKind::UnexpectedByte(byte),
        }
    }

    pub(crate) fn invalid_token(position: usize, token: impl Into<String>) -> Self {
        ParseError {
            position,
            kind: ErrorKind::InvalidToken(token.into()),
        }
    }

    pub(crate) fn trailing_input(position: usize, bytes: impl Into<Vec<u8>>) -> Self {
        ParseError {
            position,
            kind: ErrorKind::TrailingInput(bytes.into()),
        }
    }

    /// Returns a copy of this error with `offset` added to its position.
    /// Used by the chunked driver to convert a per-chunk-local position
    /// into an absolute one.
    #[must_use]
    pub fn offset_by(mut self, offset: usize) -> Self {
        self.position += offset;
        self
    }
}

/// JSON-style quoting of a token for embedding in an error message: wraps
/// in double quotes and escapes embedded backslashes and quotes. This is
/// deliberately narrower than full JSON string escaping (it does not escape
/// control characters) because tokens are always printable source slices.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn render(position: &usize, kind: &ErrorKind) -> String {
    match kind {
        ErrorKind::Eof => format!("unexpected end of input at position {position}"),
        ErrorKind::UnexpectedByte(b) => {
            if (0x20..=0x7E).contains(b) {
                format!(
                    "unexpected byte at position {position}: 0x{b:02X} ('{}')",
                    *b as char
                )
            } else {
                format!("unexpected byte at position {position}: 0x{b:02X}")
            }
        }
        ErrorKind::InvalidToken(token) => {
            format!("unexpected sequence at position {position}: {}", quote(token))
        }
        ErrorKind::TrailingInput(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            format!("unexpected extra input after valid json: {}", quote(&text))
        }
    }
}
