//! String lexer: recognizes a JSON string body (the bytes between the
//! quotes; the driver consumes the quotes themselves) and produces an
//! unescaped, UTF-8-validated `String`.
//!
//! Two paths are used depending on whether the token needs ownership:
//!
//! - **Fast path**: while no escape has been seen and the token does not
//!   cross a chunk boundary, the lexer tracks only a start/end offset into
//!   the caller's slice and validates it as UTF-8 once, in a single pass, at
//!   the closing quote. [`Step::Done`] then borrows directly from the input
//!   chunk, no allocation.
//! - **Slow path**: the first escape, or a chunk boundary reached mid-string,
//!   forces the lexer to own an accumulator. From that point on it decodes
//!   escapes into UTF-8 bytes and copies plain runs in, rather than
//!   revalidating per chunk.
//!
//! Raw (un-escaped) UTF-8 surrogate code points are rejected, the stricter
//! of the two behaviors a JSON string may legally choose here, validating
//! with `core::str::from_utf8`/`String::from_utf8`, both of which already
//! reject surrogates, so no extra check is needed on that path.

use std::borrow::Cow;

/// String-lexer sub-states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StrSub {
    /// Scanning a run of unescaped bytes.
    Normal,
    /// Collecting the continuation bytes of a multi-byte UTF-8 sequence whose
    /// lead byte was seen but whose full extent didn't fit in the chunk that
    /// introduced it. `bytes[0]` is always the lead byte.
    Utf8Seq { need: u8, have: u8, bytes: [u8; 4] },
    /// Just consumed `\`; awaiting the escape selector byte.
    Escape,
    /// Accumulating the raw hex digits of a `\uXXXX` escape. `pending_high`
    /// is `Some(h)` when this run is the low half of a surrogate pair whose
    /// high half was already decoded. The raw bytes are kept (rather than
    /// folded into a numeric value as they arrive) so that an invalid digit
    /// can be reported with the literal source text, not a reinterpretation
    /// of however much of the value was valid.
    UnicodeHex {
        filled: u8,
        raw: [u8; 4],
        pending_high: Option<u16>,
    },
    /// Just finished a high-surrogate `\uXXXX`; the grammar requires an
    /// immediately following `\u` introducing the low half.
    ExpectBackslash { high: u16 },
    ExpectU { high: u16 },
}

/// Suspendable string-lexer state.
#[derive(Debug, Clone)]
pub struct StringState {
    sub: StrSub,
    /// Absolute position of the opening quote, for error reporting.
    start: usize,
    /// Absolute position of the `\` that introduced the escape currently (or
    /// most recently) being decoded, for `BadEscape` error reporting: the
    /// error is reported at the start of the malformed escape, not wherever
    /// the lexer happened to notice the problem.
    esc_start: usize,
    /// Absolute position of the lead byte of the multi-byte UTF-8 sequence a
    /// `BadUtf8` error is being reported for.
    seq_start: usize,
    /// The lead byte of the sequence a `BadUtf8` error is being reported for,
    /// used to render the error message's `0x%02X` byte.
    bad_byte: u8,
    /// `None` while the fast path is still viable; becomes `Some` the first
    /// time an escape is decoded, a multi-byte sequence is buffered whole, or
    /// the token crosses a chunk boundary.
    buf: Option<Vec<u8>>,
}

/// Outcome of one call to [`StringState::step`].
pub enum Step<'a> {
    /// The string is complete; the closing quote *was* consumed.
    Done(Cow<'a, str>),
    /// Input ran out mid-string; state is saved in `self` for resumption.
    Pending,
    /// A byte not permitted in this position (an unescaped control
    /// character, or an unrecognized escape selector).
    BadByte(u8),
    /// A decoded byte run was not valid UTF-8 (only reachable on input that
    /// bypassed UTF-8 validation further upstream, e.g. raw bytes fed
    /// directly to `decode_bytes`-style entry points).
    BadUtf8,
    /// A syntactically-shaped `\u` escape that didn't resolve to a valid
    /// scalar value: a lone low surrogate, a high surrogate not followed by
    /// `\u`, or a high surrogate followed by a non-low-surrogate `\uXXXX`.
    /// The token carries the offending source text for the error message.
    BadEscape(String),
}

impl StringState {
    /// Starts lexing a string body whose opening quote sat at absolute
    /// position `start`.
    #[must_use]
    pub fn begin(start: usize) -> Self {
        StringState {
            sub: StrSub::Normal,
            start,
            esc_start: start,
            seq_start: start,
            bad_byte: 0,
            buf: None,
        }
    }

    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Absolute position of the `\` that introduced the escape a
    /// [`Step::BadEscape`] is being reported for.
    #[must_use]
    pub fn esc_start(&self) -> usize {
        self.esc_start
    }

    /// Absolute position of the lead byte of the malformed multi-byte
    /// sequence a [`Step::BadUtf8`] is being reported for.
    #[must_use]
    pub fn seq_start(&self) -> usize {
        self.seq_start
    }

    /// The lead byte of the malformed sequence a [`Step::BadUtf8`] is being
    /// reported for, for the error message's `0x%02X` rendering.
    #[must_use]
    pub fn bad_byte(&self) -> u8 {
        self.bad_byte
    }

    /// Feeds bytes from `chunk[*pos..]`, advancing `*pos` past every byte
    /// consumed (including the closing quote, on success). `chunk_offset` is
    /// the absolute position of `chunk[0]`, needed to record `esc_start` in
    /// absolute terms.
    pub fn step<'a>(&mut self, chunk: &'a [u8], pos: &mut usize, chunk_offset: usize) -> Step<'a> {
        let mut seg_start = *pos;
        loop {
            if self.sub == StrSub::Normal {
                while let Some(&b) = chunk.get(*pos) {
                    match b {
                        b'"' => {
                            let text = match self.finish(chunk, seg_start, *pos) {
                                Ok(t) => t,
                                Err(()) => return Step::BadUtf8,
                            };
                            *pos += 1;
                            return Step::Done(text);
                        }
                        b'\\' => {
                            self.own_plain_run(chunk, seg_start, *pos);
                            self.esc_start = chunk_offset + *pos;
                            self.sub = StrSub::Escape;
                            *pos += 1;
                            break;
                        }
                        b if b < 0x20 => return Step::BadByte(b),
                        b if b < 0x80 => *pos += 1,
                        lead => {
                            let Some(need) = utf8_seq_len(lead) else {
                                self.seq_start = chunk_offset + *pos;
                                self.bad_byte = lead;
                                return Step::BadUtf8;
                            };
                            let need = need as usize;
                            if *pos + need <= chunk.len() {
                                match std::str::from_utf8(&chunk[*pos..*pos + need]) {
                                    Ok(_) => *pos += need,
                                    Err(_) => {
                                        self.seq_start = chunk_offset + *pos;
                                        self.bad_byte = lead;
                                        return Step::BadUtf8;
                                    }
                                }
                            } else {
                                // The sequence crosses this chunk's boundary;
                                // own everything scanned so far (the run up
                                // to, but not including, the lead byte), then
                                // buffer what's available of the sequence
                                // itself and suspend.
                                self.own_plain_run(chunk, seg_start, *pos);
                                self.seq_start = chunk_offset + *pos;
                                let mut bytes = [0u8; 4];
                                let avail = chunk.len() - *pos;
                                bytes[..avail].copy_from_slice(&chunk[*pos..]);
                                self.sub = StrSub::Utf8Seq {
                                    need: need as u8,
                                    have: avail as u8,
                                    bytes,
                                };
                                *pos = chunk.len();
                                return Step::Pending;
                            }
                        }
                    }
                }
                if self.sub == StrSub::Normal {
                    // Ran out of chunk while still scanning a plain run.
                    self.own_plain_run(chunk, seg_start, *pos);
                    return Step::Pending;
                }
                continue;
            }

            let Some(&b) = chunk.get(*pos) else {
                return Step::Pending;
            };

            match self.sub {
                StrSub::Normal => unreachable!("handled above"),
                StrSub::Utf8Seq {
                    need,
                    mut have,
                    mut bytes,
                } => {
                    bytes[have as usize] = b;
                    have += 1;
                    *pos += 1;
                    if have < need {
                        self.sub = StrSub::Utf8Seq { need, have, bytes };
                        continue;
                    }
                    if std::str::from_utf8(&bytes[..need as usize]).is_err() {
                        self.bad_byte = bytes[0];
                        return Step::BadUtf8;
                    }
                    self.buf
                        .get_or_insert_with(Vec::new)
                        .extend_from_slice(&bytes[..need as usize]);
                    self.sub = StrSub::Normal;
                    seg_start = *pos;
                }
                StrSub::Escape => {
                    // Only advance past the selector byte once it is known
                    // good: an unrecognized selector must be reported at its
                    // own position, not the byte after it.
                    match b {
                        b'"' => {
                            *pos += 1;
                            self.push_char('"');
                        }
                        b'\\' => {
                            *pos += 1;
                            self.push_char('\\');
                        }
                        b'/' => {
                            *pos += 1;
                            self.push_char('/');
                        }
                        b'b' => {
                            *pos += 1;
                            self.push_char('\u{08}');
                        }
                        b'f' => {
                            *pos += 1;
                            self.push_char('\u{0C}');
                        }
                        b'n' => {
                            *pos += 1;
                            self.push_char('\n');
                        }
                        b'r' => {
                            *pos += 1;
                            self.push_char('\r');
                        }
                        b't' => {
                            *pos += 1;
                            self.push_char('\t');
                        }
                        b'u' => {
                            *pos += 1;
                            self.sub = StrSub::UnicodeHex {
                                filled: 0,
                                raw: [0; 4],
                                pending_high: None,
                            };
                            seg_start = *pos;
                            continue;
                        }
                        other => return Step::BadByte(other),
                    }
                    self.sub = StrSub::Normal;
                    seg_start = *pos;
                }
                StrSub::UnicodeHex {
                    mut filled,
                    mut raw,
                    pending_high,
                } => {
                    raw[filled as usize] = b;
                    filled += 1;
                    *pos += 1;
                    if filled < 4 {
                        self.sub = StrSub::UnicodeHex {
                            filled,
                            raw,
                            pending_high,
                        };
                        continue;
                    }
                    let Some(value) = hex_quad(&raw) else {
                        return Step::BadEscape(format!(
                            "\\u{}",
                            raw.iter()
                                .map(|b| (*b as char).to_ascii_lowercase())
                                .collect::<String>()
                        ));
                    };
                    match pending_high {
                        None => {
                            if (0xD800..=0xDBFF).contains(&value) {
                                self.sub = StrSub::ExpectBackslash { high: value };
                            } else if (0xDC00..=0xDFFF).contains(&value) {
                                return Step::BadEscape(format!("\\u{value:04x}"));
                            } else {
                                self.push_char(
                                    char::from_u32(u32::from(value))
                                        .expect("value is outside both surrogate ranges"),
                                );
                                self.sub = StrSub::Normal;
                                seg_start = *pos;
                            }
                        }
                        Some(high) => {
                            if (0xDC00..=0xDFFF).contains(&value) {
                                let c = combine_surrogates(high, value);
                                self.push_char(c);
                                self.sub = StrSub::Normal;
                                seg_start = *pos;
                            } else {
                                return Step::BadEscape(format!(
                                    "\\u{high:04x}\\u{value:04x}"
                                ));
                            }
                        }
                    }
                }
                StrSub::ExpectBackslash { high } => {
                    if b == b'\\' {
                        self.esc_start = chunk_offset + *pos;
                        *pos += 1;
                        self.sub = StrSub::ExpectU { high };
                    } else {
                        return Step::BadEscape(format!("\\u{high:04x}"));
                    }
                }
                StrSub::ExpectU { high } => {
                    if b == b'u' {
                        *pos += 1;
                        self.sub = StrSub::UnicodeHex {
                            filled: 0,
                            raw: [0; 4],
                            pending_high: Some(high),
                        };
                        seg_start = *pos;
                    } else {
                        return Step::BadEscape(format!("\\u{high:04x}\\"));
                    }
                }
            }
        }
    }

    /// Moves any bytes already scanned in the current plain run into the
    /// owned accumulator, switching off the fast path. A no-op if the run is
    /// empty and the fast path is still viable, so this can be called
    /// unconditionally at every fast-path exit.
    fn own_plain_run(&mut self, chunk: &[u8], seg_start: usize, pos: usize) {
        if pos > seg_start {
            self.buf
                .get_or_insert_with(Vec::new)
                .extend_from_slice(&chunk[seg_start..pos]);
        } else if self.buf.is_none() {
            self.buf = Some(Vec::new());
        }
    }

    fn push_char(&mut self, c: char) {
        let mut tmp = [0u8; 4];
        self.buf
            .get_or_insert_with(Vec::new)
            .extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
    }

    /// Completes the token: if the fast path survived untouched (`buf` is
    /// still `None`), validates `chunk[seg_start..pos]` as UTF-8 in one pass
    /// and borrows it directly; otherwise appends the final plain run to the
    /// owned buffer and converts it.
    fn finish<'a>(
        &mut self,
        chunk: &'a [u8],
        seg_start: usize,
        pos: usize,
    ) -> Result<Cow<'a, str>, ()> {
        match self.buf.take() {
            None => std::str::from_utf8(&chunk[seg_start..pos])
                .map(Cow::Borrowed)
                .map_err(|_| ()),
            Some(mut owned) => {
                owned.extend_from_slice(&chunk[seg_start..pos]);
                String::from_utf8(owned).map(Cow::Owned).map_err(|_| ())
            }
        }
    }
}

/// The total length (lead byte included) of the multi-byte UTF-8 sequence
/// introduced by `lead`, or `None` if `lead` cannot legally start one (a bare
/// continuation byte, or a byte never valid anywhere in well-formed UTF-8).
fn utf8_seq_len(lead: u8) -> Option<u8> {
    match lead {
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn hex_quad(raw: &[u8; 4]) -> Option<u16> {
    let mut value: u16 = 0;
    for &b in raw {
        value = value * 16 + u16::from(hex_value(b)?);
    }
    Some(value)
}

fn combine_surrogates(high: u16, low: u16) -> char {
    let c = 0x10000 + (u32::from(high) - 0xD800) * 0x400 + (u32::from(low) - 0xDC00);
    char::from_u32(c).expect("valid surrogate pair always yields a scalar value")
}
