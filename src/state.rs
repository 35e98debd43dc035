//! The structural driver and continuation engine: the state machine that
//! sits above the dispatch tables and per-token lexers, owns the explicit
//! work stack, and can suspend at any point a lexer or the driver itself
//! runs out of input.

use crate::dispatch::{self, KeyStartClass, SepClass, ValueClass};
use crate::error::{ErrorKind, ParseError};
use crate::keys::KeyDecode;
use crate::keyword::{self, KeywordState};
use crate::number::{self, NumberState};
use crate::sink::{Leaf, Sink};
use crate::stack::Frame;
use crate::string::{self, StringState};

/// What a completed string becomes: a pending object key, or a value handed
/// to `complete_value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringRole {
    Key,
    Value,
}

/// The parser's current activity. `Value`/`ArraySep`/`ObjectKeyStart`/
/// `ObjectColon`/`ObjectSep` are dispatch-table-driven; the `In*` variants
/// hold a suspended sub-lexer.
enum Mode {
    /// Awaiting the first byte of a value (array element, object value, or
    /// the root).
    Value,
    /// Awaiting `,` or `]` after an array element.
    ArraySep,
    /// Awaiting `"` (a key) or `}` (empty object) at an object key position.
    ObjectKeyStart,
    /// Awaiting `:` after a key was read.
    ObjectColon,
    /// Awaiting `,` or `}` after an object member.
    ObjectSep,
    InNumber(NumberState),
    InString(StringState, StringRole),
    InKeyword(KeywordState),
    /// The root value is complete; skipping trailing whitespace.
    Trailing,
}

/// Outcome of driving the parser through one chunk.
pub enum Outcome<Out> {
    /// Ran out of input mid-parse; state is retained in `self`.
    Suspend,
    /// A complete document was parsed with nothing left over in this chunk.
    Done(Out),
    /// A complete document was parsed, followed by non-whitespace bytes
    /// (captured from the current chunk onward).
    DoneWithTrailing(Out, Vec<u8>, usize),
    /// The grammar was violated. `position` is already absolute (measured
    /// from the start of the logical input, not the current chunk).
    Error { kind: ErrorKind, position: usize },
}

/// The streaming JSON decoder core. Generic over the key-decoding policy
/// `D` and the materialization sink `S`; `S::Out` is the type produced for
/// both scalars and completed containers.
pub struct Parser<D: KeyDecode, S: Sink<D::Key>> {
    keys: D,
    sink: S,
    stack: Vec<Frame<D::Key, S::Out>>,
    mode: Mode,
    /// Total bytes consumed across all chunks fed before the current one.
    chunk_offset: usize,
    /// Set once the root value completes, until a terminal `Outcome` is
    /// produced (`Done`/`DoneWithTrailing`/an error) or `finish` consumes it.
    root: Option<S::Out>,
}

impl<D: KeyDecode, S: Sink<D::Key>> Parser<D, S> {
    /// Creates a parser awaiting the first byte of a new document.
    pub fn new(keys: D, sink: S) -> Self {
        log::trace!("starting new decode");
        Parser {
            keys,
            sink,
            stack: vec![Frame::Terminate],
            mode: Mode::Value,
            chunk_offset: 0,
            root: None,
        }
    }

    /// Absolute position of the next byte this parser expects, i.e. the
    /// position an error or suspension at the very start of the next chunk
    /// would be reported at.
    #[must_use]
    pub fn position(&self) -> usize {
        self.chunk_offset
    }

    /// Feeds one chunk of input. `chunk` is treated as a direct continuation
    /// of everything fed (or resumed into this parser) so far.
    pub fn feed(&mut self, chunk: &[u8]) -> Outcome<S::Out> {
        let mut pos = 0usize;
        let outcome = self.run(chunk, &mut pos);
        if matches!(outcome, Outcome::Suspend) {
            self.chunk_offset += chunk.len();
        }
        outcome
    }

    /// Declares that no further chunks are coming. Converts a suspended,
    /// but logically completable, state into `Done`; anything else becomes
    /// an EOF or token error at the current position.
    pub fn finish(&mut self) -> Outcome<S::Out> {
        log::trace!("finishing decode at position {}", self.chunk_offset);
        match std::mem::replace(&mut self.mode, Mode::Value) {
            Mode::Trailing => Outcome::Done(
                self.root
                    .take()
                    .expect("Trailing mode is only entered after the root value completes"),
            ),
            Mode::InNumber(mut ns) if self.stack.len() == 1 => match ns.finish_at_eof() {
                Some(Ok(leaf)) => {
                    let out = self.sink.leaf(leaf);
                    match self.complete_value(out) {
                        Ok(()) => Outcome::Done(
                            self.root
                                .take()
                                .expect("completing the sole root value sets root"),
                        ),
                        Err(kind) => Outcome::Error {
                            kind,
                            position: self.chunk_offset,
                        },
                    }
                }
                Some(Err(())) => Outcome::Error {
                    kind: ErrorKind::InvalidToken(ns.token().to_string()),
                    position: ns.start(),
                },
                None => Outcome::Error {
                    kind: ErrorKind::Eof,
                    position: self.chunk_offset,
                },
            },
            _ => Outcome::Error {
                kind: ErrorKind::Eof,
                position: self.chunk_offset,
            },
        }
    }

    fn run(&mut self, chunk: &[u8], pos: &mut usize) -> Outcome<S::Out> {
        loop {
            let mode = std::mem::replace(&mut self.mode, Mode::Value);
            match mode {
                Mode::InNumber(mut ns) => match ns.step(chunk, pos) {
                    number::Step::Done(leaf) => {
                        let out = self.sink.leaf(leaf);
                        if let Err(kind) = self.complete_value(out) {
                            return Outcome::Error {
                                kind,
                                position: self.chunk_offset + *pos,
                            };
                        }
                    }
                    number::Step::Pending => {
                        self.mode = Mode::InNumber(ns);
                        return Outcome::Suspend;
                    }
                    number::Step::BadByte(b) => {
                        return Outcome::Error {
                            kind: ErrorKind::UnexpectedByte(b),
                            position: self.chunk_offset + *pos,
                        }
                    }
                    number::Step::BadToken => {
                        return Outcome::Error {
                            kind: ErrorKind::InvalidToken(ns.token().to_string()),
                            position: ns.start(),
                        }
                    }
                },
                Mode::InString(mut ss, role) => match ss.step(chunk, pos, self.chunk_offset) {
                    string::Step::Done(text) => {
                        if let Err(kind) = self.complete_string(text.into_owned(), role) {
                            return Outcome::Error {
                                kind,
                                position: ss.start(),
                            };
                        }
                    }
                    string::Step::Pending => {
                        self.mode = Mode::InString(ss, role);
                        return Outcome::Suspend;
                    }
                    string::Step::BadByte(b) => {
                        return Outcome::Error {
                            kind: ErrorKind::UnexpectedByte(b),
                            position: self.chunk_offset + *pos,
                        }
                    }
                    string::Step::BadUtf8 => {
                        return Outcome::Error {
                            kind: ErrorKind::UnexpectedByte(ss.bad_byte()),
                            position: ss.seq_start(),
                        }
                    }
                    string::Step::BadEscape(token) => {
                        return Outcome::Error {
                            kind: ErrorKind::InvalidToken(token),
                            position: ss.esc_start(),
                        }
                    }
                },
                Mode::InKeyword(mut ks) => match ks.step(chunk, pos) {
                    keyword::Step::Done(leaf) => {
                        let out = self.sink.leaf(leaf);
                        if let Err(kind) = self.complete_value(out) {
                            return Outcome::Error {
                                kind,
                                position: self.chunk_offset + *pos,
                            };
                        }
                    }
                    keyword::Step::Pending => {
                        self.mode = Mode::InKeyword(ks);
                        return Outcome::Suspend;
                    }
                    keyword::Step::BadByte(b) => {
                        return Outcome::Error {
                            kind: ErrorKind::UnexpectedByte(b),
                            position: self.chunk_offset + *pos,
                        }
                    }
                },
                Mode::Value => match self.start_value(chunk, pos) {
                    Ok(Some(())) => {}
                    Ok(None) => return Outcome::Suspend,
                    Err(outcome) => return outcome,
                },
                Mode::ArraySep => match self.step_array_sep(chunk, pos) {
                    Ok(()) => {}
                    Err(outcome) => return outcome,
                },
                Mode::ObjectKeyStart => match self.step_object_key_start(chunk, pos) {
                    Ok(()) => {}
                    Err(outcome) => return outcome,
                },
                Mode::ObjectColon => match self.step_object_colon(chunk, pos) {
                    Ok(()) => {}
                    Err(outcome) => return outcome,
                },
                Mode::ObjectSep => match self.step_object_sep(chunk, pos) {
                    Ok(()) => {}
                    Err(outcome) => return outcome,
                },
                Mode::Trailing => match self.step_trailing(chunk, pos) {
                    Ok(outcome) => return outcome,
                    Err(outcome) => return outcome,
                },
            }
        }
    }

    /// Consumes whitespace then classifies the next byte as the start of a
    /// value. Returns `Ok(Some(()))` after making progress (a value was
    /// started or completed), `Ok(None)` on suspension, `Err` on error.
    #[allow(clippy::type_complexity)]
    fn start_value(
        &mut self,
        chunk: &[u8],
        pos: &mut usize,
    ) -> Result<Option<()>, Outcome<S::Out>> {
        loop {
            let Some(&b) = chunk.get(*pos) else {
                self.mode = Mode::Value;
                return Ok(None);
            };
            match dispatch::VALUE_CLASS[b as usize] {
                ValueClass::Whitespace => *pos += 1,
                ValueClass::ObjectOpen => {
                    *pos += 1;
                    self.stack.push(Frame::Object { acc: Vec::new() });
                    self.mode = Mode::ObjectKeyStart;
                    return Ok(Some(()));
                }
                ValueClass::ArrayOpen => {
                    *pos += 1;
                    self.stack.push(Frame::Array { acc: Vec::new() });
                    self.mode = Mode::Value;
                    return Ok(Some(()));
                }
                ValueClass::ArrayClose => {
                    // Legal only as an empty-array close: the value-dispatch
                    // path is reached both right after `[` (acc empty) and,
                    // incorrectly, would also be reached mid-array if a
                    // lingering `Mode::Value` state existed there; it does
                    // not, `step_array_sep` owns that position instead.
                    match self.stack.last() {
                        Some(Frame::Array { acc }) if acc.is_empty() => {
                            *pos += 1;
                            self.stack.pop();
                            let out = self.sink.finish_array(Vec::new());
                            if let Err(kind) = self.complete_value(out) {
                                return Err(Outcome::Error {
                                    kind,
                                    position: self.chunk_offset + *pos,
                                });
                            }
                            return Ok(Some(()));
                        }
                        _ => {
                            return Err(Outcome::Error {
                                kind: ErrorKind::UnexpectedByte(b),
                                position: self.chunk_offset + *pos,
                            });
                        }
                    }
                }
                ValueClass::Quote => {
                    let start = self.chunk_offset + *pos;
                    *pos += 1;
                    self.mode = Mode::InString(StringState::begin(start), StringRole::Value);
                    return Ok(Some(()));
                }
                ValueClass::Minus | ValueClass::Zero | ValueClass::Digit19 => {
                    let start = self.chunk_offset + *pos;
                    let first = b;
                    *pos += 1;
                    self.mode = Mode::InNumber(NumberState::begin(start, first));
                    return Ok(Some(()));
                }
                ValueClass::True | ValueClass::False | ValueClass::Null => {
                    let first = b;
                    *pos += 1;
                    if let Some(leaf) = KeywordState::try_match_whole(first, chunk, pos) {
                        let out = self.sink.leaf(leaf);
                        if let Err(kind) = self.complete_value(out) {
                            return Err(Outcome::Error {
                                kind,
                                position: self.chunk_offset + *pos,
                            });
                        }
                    } else {
                        self.mode = Mode::InKeyword(KeywordState::begin(first));
                    }
                    return Ok(Some(()));
                }
                ValueClass::Invalid => {
                    return Err(Outcome::Error {
                        kind: ErrorKind::UnexpectedByte(b),
                        position: self.chunk_offset + *pos,
                    });
                }
            }
        }
    }

    fn step_array_sep(&mut self, chunk: &[u8], pos: &mut usize) -> Result<(), Outcome<S::Out>> {
        loop {
            let Some(&b) = chunk.get(*pos) else {
                self.mode = Mode::ArraySep;
                return Err(Outcome::Suspend);
            };
            match dispatch::ARRAY_SEP_CLASS[b as usize] {
                SepClass::Whitespace => *pos += 1,
                SepClass::Comma => {
                    *pos += 1;
                    self.mode = Mode::Value;
                    return Ok(());
                }
                SepClass::Close => {
                    *pos += 1;
                    let Some(Frame::Array { acc }) = self.stack.pop() else {
                        unreachable!("ArraySep is only entered with an Array frame on top");
                    };
                    let out = self.sink.finish_array(acc);
                    self.complete_value(out).map_err(|kind| Outcome::Error {
                        kind,
                        position: self.chunk_offset + *pos,
                    })?;
                    return Ok(());
                }
                SepClass::Invalid => {
                    return Err(Outcome::Error {
                        kind: ErrorKind::UnexpectedByte(b),
                        position: self.chunk_offset + *pos,
                    });
                }
            }
        }
    }

    fn step_object_key_start(
        &mut self,
        chunk: &[u8],
        pos: &mut usize,
    ) -> Result<(), Outcome<S::Out>> {
        loop {
            let Some(&b) = chunk.get(*pos) else {
                self.mode = Mode::ObjectKeyStart;
                return Err(Outcome::Suspend);
            };
            match dispatch::KEY_START_CLASS[b as usize] {
                KeyStartClass::Whitespace => *pos += 1,
                KeyStartClass::Quote => {
                    let start = self.chunk_offset + *pos;
                    *pos += 1;
                    self.mode = Mode::InString(StringState::begin(start), StringRole::Key);
                    return Ok(());
                }
                KeyStartClass::ObjectClose => {
                    // Legal only for a genuinely empty object: a `}`
                    // reached here after a comma (a trailing comma) finds a
                    // non-empty `acc` and falls through to the error below.
                    match self.stack.last() {
                        Some(Frame::Object { acc }) if acc.is_empty() => {
                            *pos += 1;
                            let Some(Frame::Object { acc }) = self.stack.pop() else {
                                unreachable!("checked above");
                            };
                            let out = self.sink.finish_object(acc);
                            self.complete_value(out).map_err(|kind| Outcome::Error {
                                kind,
                                position: self.chunk_offset + *pos,
                            })?;
                            return Ok(());
                        }
                        _ => {
                            return Err(Outcome::Error {
                                kind: ErrorKind::UnexpectedByte(b),
                                position: self.chunk_offset + *pos,
                            });
                        }
                    }
                }
                KeyStartClass::Invalid => {
                    return Err(Outcome::Error {
                        kind: ErrorKind::UnexpectedByte(b),
                        position: self.chunk_offset + *pos,
                    });
                }
            }
        }
    }

    fn step_object_colon(&mut self, chunk: &[u8], pos: &mut usize) -> Result<(), Outcome<S::Out>> {
        loop {
            let Some(&b) = chunk.get(*pos) else {
                self.mode = Mode::ObjectColon;
                return Err(Outcome::Suspend);
            };
            if dispatch::is_whitespace(b) {
                *pos += 1;
                continue;
            }
            if b == b':' {
                *pos += 1;
                self.mode = Mode::Value;
                return Ok(());
            }
            return Err(Outcome::Error {
                kind: ErrorKind::UnexpectedByte(b),
                position: self.chunk_offset + *pos,
            });
        }
    }

    fn step_object_sep(&mut self, chunk: &[u8], pos: &mut usize) -> Result<(), Outcome<S::Out>> {
        loop {
            let Some(&b) = chunk.get(*pos) else {
                self.mode = Mode::ObjectSep;
                return Err(Outcome::Suspend);
            };
            match dispatch::OBJECT_SEP_CLASS[b as usize] {
                SepClass::Whitespace => *pos += 1,
                SepClass::Comma => {
                    *pos += 1;
                    self.mode = Mode::ObjectKeyStart;
                    return Ok(());
                }
                SepClass::Close => {
                    *pos += 1;
                    let Some(Frame::Object { acc }) = self.stack.pop() else {
                        unreachable!("ObjectSep is only entered with an Object frame on top");
                    };
                    let out = self.sink.finish_object(acc);
                    self.complete_value(out).map_err(|kind| Outcome::Error {
                        kind,
                        position: self.chunk_offset + *pos,
                    })?;
                    return Ok(());
                }
                SepClass::Invalid => {
                    return Err(Outcome::Error {
                        kind: ErrorKind::UnexpectedByte(b),
                        position: self.chunk_offset + *pos,
                    });
                }
            }
        }
    }

    /// `Ok` carries the terminal outcome (`Done`/`DoneWithTrailing`) once
    /// resolved; `Err` carries `Suspend` when no non-whitespace byte has
    /// shown up yet in this chunk.
    fn step_trailing(
        &mut self,
        chunk: &[u8],
        pos: &mut usize,
    ) -> Result<Outcome<S::Out>, Outcome<S::Out>> {
        while let Some(&b) = chunk.get(*pos) {
            if dispatch::is_whitespace(b) {
                *pos += 1;
                continue;
            }
            let trailing_start = self.chunk_offset + *pos;
            let trailing = chunk[*pos..].to_vec();
            *pos = chunk.len();
            let root = self
                .root
                .take()
                .expect("Trailing mode is only entered after the root value completes");
            return Ok(Outcome::DoneWithTrailing(root, trailing, trailing_start));
        }
        self.mode = Mode::Trailing;
        Err(Outcome::Suspend)
    }

    /// A string lexer completed: routes it to either a pending object key or
    /// `complete_value`.
    fn complete_string(&mut self, text: String, role: StringRole) -> Result<(), ErrorKind> {
        match role {
            StringRole::Key => {
                let key = self
                    .keys
                    .decode_key(text)
                    .map_err(|e| ErrorKind::InvalidToken(e.to_string()))?;
                self.stack.push(Frame::Key { key });
                self.mode = Mode::ObjectColon;
                Ok(())
            }
            StringRole::Value => {
                let out = self.sink.leaf(Leaf::String(text));
                self.complete_value(out)
            }
        }
    }

    /// Routes a completed value (scalar or container) according to the
    /// frame currently on top of the stack: `Terminate` ends the document;
    /// `Array` appends and awaits the next separator; `Key` promotes to a
    /// pending object pair; `Object` is never on top when a *value* (as
    /// opposed to a key) completes.
    fn complete_value(&mut self, value: S::Out) -> Result<(), ErrorKind> {
        match self.stack.pop().expect("stack is never empty") {
            Frame::Terminate => {
                self.root = Some(value);
                self.stack.push(Frame::Terminate);
                self.mode = Mode::Trailing;
            }
            Frame::Array { mut acc } => {
                acc.push(value);
                self.stack.push(Frame::Array { acc });
                self.mode = Mode::ArraySep;
            }
            Frame::Key { key } => {
                let Some(Frame::Object { mut acc }) = self.stack.pop() else {
                    unreachable!("a Key frame always sits directly atop its Object frame");
                };
                acc.push((key, value));
                self.stack.push(Frame::Object { acc });
                self.mode = Mode::ObjectSep;
            }
            Frame::Object { .. } => {
                unreachable!("a bare value never completes directly atop an Object frame")
            }
        }
        Ok(())
    }
}
