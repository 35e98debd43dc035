//! Entry points: single-buffer and chunked decoding, plus the strict
//! convenience wrappers that collapse trailing/incomplete outcomes into
//! errors.

use crate::error::{ErrorKind, ParseError};
use crate::keys::{AtomKeys, AtomKeysExisting, KeyDecode, KeyMode, StringKeys};
use crate::sink::Sink;
use crate::state::{self, Parser};
use crate::value::TreeSink;

/// Result of a decode attempt.
pub enum DecodeOutcome<D: KeyDecode, S: Sink<D::Key>> {
    /// A complete value was parsed with nothing left over.
    Done(S::Out),
    /// A complete value was parsed, followed by non-whitespace input
    /// starting at the given absolute position.
    DoneWithTrailing(S::Out, Vec<u8>, usize),
    /// The input violated the grammar.
    Error(ParseError),
    /// Input was exhausted mid-parse; feed more via [`Suspended::resume`].
    More(Suspended<D, S>),
}

/// A parse that ran out of input before reaching a decision. Owns the full
/// frame stack, the active sub-lexer state, and the `KeyDecode`/`Sink`
/// instances, an explicit, inspectable value rather than a closure, so it
/// can be held across an arbitrary number of chunk boundaries.
pub struct Suspended<D: KeyDecode, S: Sink<D::Key>> {
    parser: Parser<D, S>,
}

impl<D: KeyDecode, S: Sink<D::Key>> Suspended<D, S> {
    /// Wraps an already-fed parser as a continuation. Used by
    /// [`crate::chunked`] when its input iterable runs dry mid-parse; the
    /// driver yields a final continuation to the caller rather than
    /// guessing no more input is coming.
    pub(crate) fn from_parser(parser: Parser<D, S>) -> Self {
        Suspended { parser }
    }

    /// Absolute position of the next byte this continuation expects.
    #[must_use]
    pub fn position(&self) -> usize {
        self.parser.position()
    }

    /// Feeds the next chunk, continuing exactly where the previous call left
    /// off.
    pub fn resume(mut self, chunk: &[u8]) -> DecodeOutcome<D, S> {
        log::debug!("resuming decode at position {}", self.parser.position());
        from_parser_outcome(self.parser.feed(chunk), self.parser)
    }

    /// Declares that no further input is coming.
    pub fn finish(mut self) -> DecodeOutcome<D, S> {
        from_parser_outcome(self.parser.finish(), self.parser)
    }
}

fn from_parser_outcome<D: KeyDecode, S: Sink<D::Key>>(
    outcome: state::Outcome<S::Out>,
    parser: Parser<D, S>,
) -> DecodeOutcome<D, S> {
    match outcome {
        state::Outcome::Done(v) => DecodeOutcome::Done(v),
        state::Outcome::DoneWithTrailing(v, t, pos) => {
            DecodeOutcome::DoneWithTrailing(v, t, pos)
        }
        state::Outcome::Error { kind, position } => {
            DecodeOutcome::Error(ParseError { position, kind })
        }
        state::Outcome::Suspend => DecodeOutcome::More(Suspended { parser }),
    }
}

/// Decodes `bytes` as a single, complete buffer using the default key policy
/// ([`StringKeys`]) and the default sink ([`TreeSink`]).
#[must_use]
pub fn decode(bytes: &[u8]) -> DecodeOutcome<StringKeys, TreeSink> {
    decode_with(bytes, StringKeys)
}

/// Like [`decode`], with an explicit key-decoding policy. A value left
/// incomplete at the end of `bytes` is reported as `DecodeOutcome::More`
/// rather than an EOF error: a single-buffer decode is itself one of the
/// four outcomes a continuation can produce. Callers that want "incomplete
/// at the end of this buffer is an error" should use [`decode_with_strict`]
/// instead.
pub fn decode_with<D: KeyDecode>(bytes: &[u8], keys: D) -> DecodeOutcome<D, TreeSink> {
    log::trace!("decoding {} byte buffer", bytes.len());
    let mut parser = Parser::new(keys, TreeSink);
    let outcome = parser.feed(bytes);
    from_parser_outcome(outcome, parser)
}

/// [`decode`], but a trailing non-whitespace tail becomes
/// `ErrorKind::TrailingInput` and an incomplete parse becomes
/// `ErrorKind::Eof`, rather than their respective non-strict outcomes.
pub fn decode_strict(bytes: &[u8]) -> Result<crate::value::Value, ParseError> {
    decode_with_strict(bytes, StringKeys)
}

/// [`decode_with`] with the same strict collapsing as [`decode_strict`].
///
/// A `More` outcome does not immediately become `ErrorKind::Eof`: the
/// suspended parser is first asked to [`Suspended::finish`], since a value
/// whose last token is in a terminal-acceptable sub-state (e.g. a bare
/// integer with nothing following it) is a complete document, not an
/// incomplete one, once the caller declares `bytes` to be everything there
/// is.
pub fn decode_with_strict<D: KeyDecode>(
    bytes: &[u8],
    keys: D,
) -> Result<<TreeSink as Sink<D::Key>>::Out, ParseError> {
    let outcome = match decode_with(bytes, keys) {
        DecodeOutcome::More(s) => s.finish(),
        other => other,
    };
    match outcome {
        DecodeOutcome::Done(v) => Ok(v),
        DecodeOutcome::DoneWithTrailing(_, trailing, position) => Err(ParseError {
            position,
            kind: ErrorKind::TrailingInput(trailing),
        }),
        DecodeOutcome::Error(e) => Err(e),
        DecodeOutcome::More(s) => Err(ParseError {
            position: s.position(),
            kind: ErrorKind::Eof,
        }),
    }
}

/// The three built-in key policies each produce a different `DecodeOutcome`,
/// since `StringKeys`, `AtomKeys`, and `AtomKeysExisting` have different
/// associated `Key` types. This wraps all three behind a single return type
/// so [`decode_with_mode`] can dispatch on a runtime [`KeyMode`] instead of
/// requiring the caller to pick a policy at compile time.
pub enum KeyedOutcome {
    /// Decoded with [`StringKeys`].
    Strings(DecodeOutcome<StringKeys, TreeSink>),
    /// Decoded with [`AtomKeys`].
    Atoms(DecodeOutcome<AtomKeys, TreeSink>),
    /// Decoded with [`AtomKeysExisting`].
    AtomsExisting(DecodeOutcome<AtomKeysExisting, TreeSink>),
}

/// [`decode`], picking the key policy at runtime from a [`KeyMode`] instead
/// of naming one of [`StringKeys`], [`AtomKeys`], or [`AtomKeysExisting`] at
/// the call site.
#[must_use]
pub fn decode_with_mode(bytes: &[u8], mode: KeyMode) -> KeyedOutcome {
    match mode {
        KeyMode::Strings => KeyedOutcome::Strings(decode_with(bytes, StringKeys)),
        KeyMode::Atoms => KeyedOutcome::Atoms(decode_with(bytes, AtomKeys)),
        KeyMode::AtomsExisting => {
            KeyedOutcome::AtomsExisting(decode_with(bytes, AtomKeysExisting))
        }
    }
}
