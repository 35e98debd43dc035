//! A byte-oriented, position-accurate, resumable JSON decoder core.
//!
//! `jscore` turns a UTF-8 JSON text into an in-memory value tree in one shot
//! or incrementally, across as many input chunks as the caller cares to
//! supply, without ever copying more than it has to. It is built to sit
//! inside a larger service that must parse adversarial input, report errors
//! at an exact byte position, and stay fast on the common case: short keys,
//! many small objects and arrays.
//!
//! # Layout
//!
//! - `dispatch`: 256-entry byte classification tables for the hot
//!   structural contexts.
//! - `number` / `string` / `keyword`: the three per-token lexers.
//! - `stack` / `state`: the explicit parse-frame stack and the structural
//!   driver ([`Parser`]) that ties dispatch and the lexers together.
//! - [`Sink`] / [`Leaf`]: the materialization seam the driver is generic
//!   over; always compiled, independent of the `values` feature.
//! - [`Value`] (feature `values`, default-on): the concrete value tree and
//!   its [`TreeSink`] implementation.
//! - [`KeyDecode`] and friends: the opaque key-decoding policy (`strings` /
//!   `atoms` / `atoms!` / a user callback) every object key is run through
//!   exactly once. [`KeyMode`] picks one of the built-in policies at
//!   runtime; see [`decode_with_mode`] and [`decode_chunks_with_mode`].
//! - [`Symbol`]: the process-wide interner backing the `atoms` policies.
//! - [`ParseError`] / [`ErrorKind`]: the error taxonomy, with the exact wire
//!   message formats documented in the crate's external interface.
//! - [`decode`] / [`decode_chunks`] (feature `values`): the single-buffer
//!   and chunked entry points, plus their strict convenience wrappers.
//!
//! # Example
//!
//! ```
//! use jscore::{decode_strict, Value};
//!
//! let v = decode_strict(br#"{"foo": [1, 2, 3]}"#).unwrap();
//! assert_eq!(v.as_object().unwrap()["foo"].as_array().unwrap().len(), 3);
//! ```
//!
//! Chunked input resumes exactly where the previous chunk left off:
//!
//! ```
//! use jscore::decode_chunks_strict;
//!
//! let v = decode_chunks_strict(["[1, 2,", " 3]"]).unwrap();
//! assert_eq!(v.as_array().unwrap().len(), 3);
//! ```

mod dispatch;
mod error;
mod keys;
mod keyword;
mod number;
mod sink;
mod stack;
mod state;
mod string;
mod symbol;

#[cfg(feature = "values")]
mod value;

#[cfg(feature = "values")]
mod chunked;
#[cfg(feature = "values")]
mod decode;

pub use error::{ErrorKind, ParseError};
pub use keys::{AtomKeys, AtomKeysExisting, FnKeys, KeyDecode, KeyDecodeError, KeyMode, StringKeys};
pub use sink::{Leaf, Sink};
pub use state::{Outcome, Parser};
pub use symbol::Symbol;

#[cfg(feature = "values")]
pub use chunked::{
    decode_chunks, decode_chunks_strict, decode_chunks_with, decode_chunks_with_mode,
};
#[cfg(feature = "values")]
pub use decode::{
    decode, decode_strict, decode_with, decode_with_mode, decode_with_strict, DecodeOutcome,
    KeyedOutcome, Suspended,
};
#[cfg(feature = "values")]
pub use value::{TreeSink, Value};
