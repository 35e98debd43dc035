//! Key-decoding policy: the opaque transform applied to every object key,
//! exactly once, in source order. The structural driver depends only on the
//! [`KeyDecode`] trait; [`KeyMode`] is a convenience enum for callers who
//! want one of the three built-in policies picked at runtime instead of
//! naming a type at the call site.

use std::fmt;

use thiserror::Error;

use crate::symbol::Symbol;

/// Failure of a key-decode transform. Distinct from [`crate::error::ParseError`]
/// because it is raised by caller-supplied policy code, not by the grammar;
/// the driver wraps it into a `ParseError::invalid_token` at the key's
/// starting position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyDecodeError {
    /// `AtomKeysExisting` saw a key text that was never previously interned.
    #[error("unknown atom {0:?}")]
    UnknownAtom(String),
    /// A custom `FnKeys` closure rejected the key text.
    #[error("rejected key {0:?}")]
    Rejected(String),
}

/// Transforms a decoded, already-unescaped object key into the host's key
/// representation `Key`. Invoked exactly once per key, never on non-key
/// strings (array elements and values are unaffected).
pub trait KeyDecode {
    /// The key representation produced by this policy; used as `Value<K>`'s
    /// `K` and as the `HashMap` key in `Value::Object`.
    type Key: Eq + std::hash::Hash;

    /// Converts `text` (the fully unescaped key) into `Self::Key`.
    fn decode_key(&mut self, text: String) -> Result<Self::Key, KeyDecodeError>;
}

/// The default policy: keys are plain owned `String`s, one allocation per
/// key, no interning.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringKeys;

impl KeyDecode for StringKeys {
    type Key = String;

    fn decode_key(&mut self, text: String) -> Result<String, KeyDecodeError> {
        Ok(text)
    }
}

/// Interns every key through the process-wide [`crate::symbol`] table,
/// allocating a new slot the first time a given key text is seen.
#[derive(Debug, Default, Clone, Copy)]
pub struct AtomKeys;

impl KeyDecode for AtomKeys {
    type Key = Symbol;

    fn decode_key(&mut self, text: String) -> Result<Symbol, KeyDecodeError> {
        Ok(Symbol::intern(&text))
    }
}

/// Like [`AtomKeys`], but never allocates a new interner slot: a key text
/// that was never interned before is a [`KeyDecodeError::UnknownAtom`].
/// Useful when the host has pre-interned a closed set of expected keys and
/// wants unknown keys treated as a decode error rather than silently
/// growing the interner.
#[derive(Debug, Default, Clone, Copy)]
pub struct AtomKeysExisting;

impl KeyDecode for AtomKeysExisting {
    type Key = Symbol;

    fn decode_key(&mut self, text: String) -> Result<Symbol, KeyDecodeError> {
        Symbol::try_existing(&text).ok_or(KeyDecodeError::UnknownAtom(text))
    }
}

/// Wraps an arbitrary host closure as a key-decode policy.
pub struct FnKeys<Key, F>(pub F)
where
    F: FnMut(String) -> Result<Key, KeyDecodeError>;

impl<Key, F> fmt::Debug for FnKeys<Key, F>
where
    F: FnMut(String) -> Result<Key, KeyDecodeError>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnKeys").finish_non_exhaustive()
    }
}

impl<Key, F> KeyDecode for FnKeys<Key, F>
where
    Key: Eq + std::hash::Hash,
    F: FnMut(String) -> Result<Key, KeyDecodeError>,
{
    type Key = Key;

    fn decode_key(&mut self, text: String) -> Result<Key, KeyDecodeError> {
        (self.0)(text)
    }
}

/// Convenience selector over the built-in [`KeyDecode`] policies, for
/// callers who would rather pick a name than implement the trait. The core
/// parser (`crate::state::Parser`) is generic over `KeyDecode` and never
/// depends on this enum; it exists for `crate::decode::decode_with_mode`
/// and `crate::chunked::decode_chunks_with_mode`, which need to pick a
/// policy at runtime rather than at compile time.
#[derive(Debug, Default, Clone, Copy)]
pub enum KeyMode {
    /// `StringKeys`.
    #[default]
    Strings,
    /// `AtomKeys`.
    Atoms,
    /// `AtomKeysExisting`.
    AtomsExisting,
}
