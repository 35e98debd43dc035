//! The decoded value tree (gated behind the `values` feature, default-on).
//!
//! [`Value`] is the decoder's output sum type: `Null`, `Bool`, `Integer`,
//! `Float`, `String`, `Array`, and `Object`. It is generic over the key type
//! `K` produced by whichever [`crate::keys::KeyDecode`] the caller
//! configured; the default, and the type every example in this crate uses,
//! is `Value<String>`, aliased below as plain [`Value`].
//!
//! The [`Sink`] trait this module's [`TreeSink`] implements lives in
//! `crate::sink`, not here, so `crate::state::Parser` (generic over any
//! `Sink`) never needs this module or the `values` feature at all: a host
//! that wants a different in-memory representation implements `Sink` and
//! depends on `crate::sink` alone.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::sink::{Leaf, Sink};

/// A JSON value as defined by [RFC 8259], generic over the key
/// representation produced by the active key-decode policy.
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
// `serde` support is derived for tests unconditionally (so snapshot and
// round-trip tests never need the optional feature) and for downstream
// crates only when they opt into the `serde` feature.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Clone, Debug, PartialEq)]
pub enum Value<K = String> {
    /// A JSON `null`.
    Null,
    /// A JSON `true` or `false`.
    Bool(bool),
    /// A JSON number with no fraction or exponent, representable in `i64`.
    ///
    /// Literal integers wider than `i64` are widened to `i128` during
    /// conversion and, if still too large, demoted to [`Value::Float`]; see
    /// the number-lexer design notes for why this crate does not keep
    /// arbitrary-precision integers.
    Integer(i64),
    /// A JSON number with a fraction or exponent, or an integer literal wide
    /// enough that it was demoted from [`Value::Integer`].
    Float(f64),
    /// A JSON string, already unescaped and validated as UTF-8.
    String(String),
    /// A JSON array, in source order.
    Array(Vec<Value<K>>),
    /// A JSON object. Duplicate keys collapse to the last value written,
    /// which falls out of plain `HashMap` insert semantics.
    Object(HashMap<K, Value<K>>),
}

impl<K> Default for Value<K> {
    fn default() -> Self {
        Value::Null
    }
}

impl<K> Value<K> {
    /// Borrows the inner value if this is a [`Value::Bool`], else `None`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrows the inner value if this is a [`Value::Integer`], else `None`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrows the inner value if this is a [`Value::Float`], else `None`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrows the inner value if this is a [`Value::String`], else `None`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Borrows the inner value if this is a [`Value::Array`], else `None`.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value<K>]> {
        match self {
            Value::Array(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Borrows the inner value if this is a [`Value::Object`], else `None`.
    #[must_use]
    pub fn as_object(&self) -> Option<&HashMap<K, Value<K>>> {
        match self {
            Value::Object(m) => Some(m),
            _ => None,
        }
    }
}

/// The default [`Sink`]: materializes [`Value<K>`] trees directly. The
/// [`Sink`] trait and [`Leaf`] live in `crate::sink` so the bare decoding
/// state machine can depend on them without pulling in this module; they are
/// re-exported here for callers who only ever use the `values` feature.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeSink;

impl<K: Eq + Hash> Sink<K> for TreeSink {
    type Out = Value<K>;

    fn finish_array(&mut self, items: Vec<Value<K>>) -> Value<K> {
        Value::Array(items)
    }

    fn finish_object(&mut self, pairs: Vec<(K, Value<K>)>) -> Value<K> {
        let mut map = HashMap::with_capacity(pairs.len());
        for (k, v) in pairs {
            map.insert(k, v);
        }
        Value::Object(map)
    }

    fn leaf(&mut self, value: Leaf) -> Value<K> {
        match value {
            Leaf::Null => Value::Null,
            Leaf::Bool(b) => Value::Bool(b),
            Leaf::Integer(n) => Value::Integer(n),
            Leaf::Float(n) => Value::Float(n),
            Leaf::String(s) => Value::String(s),
        }
    }
}

/// Escapes control characters, quotes, and backslashes for inclusion in a
/// JSON string literal. Used only by `Value`'s `Display` impl; this crate
/// does not ship a tuned encoder (see non-goals).
fn write_escaped_string(src: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0C}' => f.write_str("\\f")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    Ok(())
}

impl<K: fmt::Display> fmt::Display for Value<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => {
                f.write_str("\"")?;
                write_escaped_string(s, f)?;
                f.write_str("\"")
            }
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "\"{k}\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
