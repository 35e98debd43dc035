//! Chunked decoding: feeds an iterable of byte slices through a single
//! [`Parser`](crate::state::Parser), offsetting reported positions by bytes
//! already consumed.

use crate::decode::{DecodeOutcome, KeyedOutcome, Suspended};
use crate::error::{ErrorKind, ParseError};
use crate::keys::{AtomKeys, AtomKeysExisting, KeyDecode, KeyMode, StringKeys};
use crate::sink::Sink;
use crate::state::{self, Parser};
use crate::value::TreeSink;

/// Decodes a sequence of chunks as one logical input, using the default key
/// policy and sink. Pulls chunks from `chunks` until a value completes, an
/// error occurs, or the iterable is exhausted (in which case the result is
/// `DecodeOutcome::More`, since nothing declares the document finished).
pub fn decode_chunks<I, B>(chunks: I) -> DecodeOutcome<StringKeys, TreeSink>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    decode_chunks_with(chunks, StringKeys)
}

/// Like [`decode_chunks`], with an explicit key-decoding policy.
pub fn decode_chunks_with<I, B, D>(chunks: I, keys: D) -> DecodeOutcome<D, TreeSink>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
    D: KeyDecode,
{
    let mut parser = Parser::new(keys, TreeSink);
    for chunk in chunks {
        let chunk = chunk.as_ref();
        if chunk.is_empty() {
            continue;
        }
        log::trace!("feeding {} byte chunk", chunk.len());
        match parser.feed(chunk) {
            state::Outcome::Suspend => continue,
            state::Outcome::Done(v) => return DecodeOutcome::Done(v),
            state::Outcome::DoneWithTrailing(v, t, pos) => {
                return DecodeOutcome::DoneWithTrailing(v, t, pos)
            }
            state::Outcome::Error { kind, position } => {
                return DecodeOutcome::Error(ParseError { position, kind })
            }
        }
    }
    // The iterable ran dry before a value completed (or produced no
    // non-empty chunk at all). The driver yields a final continuation to
    // the caller rather than guessing that no more chunks will ever arrive.
    DecodeOutcome::More(Suspended::from_parser(parser))
}

/// [`decode_chunks`], picking the key policy at runtime from a [`KeyMode`].
#[must_use]
pub fn decode_chunks_with_mode<I, B>(chunks: I, mode: KeyMode) -> KeyedOutcome
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    match mode {
        KeyMode::Strings => KeyedOutcome::Strings(decode_chunks_with(chunks, StringKeys)),
        KeyMode::Atoms => KeyedOutcome::Atoms(decode_chunks_with(chunks, AtomKeys)),
        KeyMode::AtomsExisting => {
            KeyedOutcome::AtomsExisting(decode_chunks_with(chunks, AtomKeysExisting))
        }
    }
}

/// [`decode_chunks`], collapsing trailing/incomplete outcomes into errors
/// the way [`crate::decode::decode_strict`] does for a single buffer.
pub fn decode_chunks_strict<I, B>(chunks: I) -> Result<crate::value::Value, ParseError>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let outcome = match decode_chunks(chunks) {
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
