//! Number lexer: recognizes `-? ( 0 | [1-9][0-9]* ) ( . [0-9]+ )? ( [eE]
//! [+-]? [0-9]+ )?` and converts the recognized token into [`Leaf::Integer`]
//! or [`Leaf::Float`].
//!
//! The lexer never decides whether it has hit genuine end-of-input or a mere
//! chunk boundary: running out of bytes always suspends (`Step::Pending`),
//! uniformly across every sub-state. It is the caller's job to turn an
//! unresolved suspension into an EOF error when no further chunks are
//! coming.

use crate::sink::Leaf;

/// Number lexer sub-states, named after the RFC 8259 grammar positions they
/// correspond to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumSub {
    /// Just consumed the leading `-`; must see `0` or `1`-`9` next.
    Minus,
    /// Just consumed a leading `0`; may be followed by `.`, `e`/`E`, or end
    /// (this is also a leading-zero terminal: a further digit is *not* an
    /// error here, it simply ends the number).
    Zero,
    /// Accumulating digits after a non-zero leading digit.
    Int,
    /// Just consumed `.`; must see a digit next.
    Frac,
    /// Accumulating fraction digits.
    FracCont,
    /// Just consumed `e`/`E`; may be followed by a sign or a digit.
    Exp,
    /// Just consumed the exponent sign; must see a digit next.
    ExpSign,
    /// Accumulating exponent digits.
    ExpCont,
}

/// Suspendable number-lexer state, owned by `Suspended` across chunk
/// boundaries.
#[derive(Debug, Clone)]
pub struct NumberState {
    sub: NumSub,
    /// The exact source text of the token accumulated so far, used both for
    /// the final numeric conversion and, verbatim, as the token in any
    /// "invalid token" error.
    buf: String,
    /// Absolute position of the token's first byte, for token-error
    /// reporting.
    start: usize,
    has_frac: bool,
    has_exp: bool,
}

/// Outcome of one call to [`NumberState::step`] / [`NumberState::begin`].
pub enum Step {
    /// The number is complete. The terminating byte (if any) was *not*
    /// consumed; it is left at the current position for the driver to
    /// re-dispatch.
    Done(Leaf),
    /// Input ran out mid-token; state is saved in `self` for `resume`.
    Pending,
    /// A byte was encountered that the grammar does not allow here.
    BadByte(u8),
    /// The token was syntactically valid but failed semantic conversion
    /// (float literal overflowed to infinity).
    BadToken,
}

impl NumberState {
    /// Starts lexing a number whose first byte (`-`, `0`, or `1`-`9`) was
    /// already classified by the dispatch table at absolute position
    /// `start`. `first` is that byte.
    #[must_use]
    pub fn begin(start: usize, first: u8) -> Self {
        let sub = match first {
            b'-' => NumSub::Minus,
            b'0' => NumSub::Zero,
            b'1'..=b'9' => NumSub::Int,
            _ => unreachable!("dispatch table only enters number lexer on -, 0-9"),
        };
        let mut buf = String::with_capacity(8);
        buf.push(first as char);
        NumberState {
            sub,
            buf,
            start,
            has_frac: false,
            has_exp: false,
        }
    }

    /// Absolute position of the token's first byte.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Feeds bytes from `chunk[*pos..]`, advancing `*pos` past every byte
    /// consumed.
    pub fn step(&mut self, chunk: &[u8], pos: &mut usize) -> Step {
        loop {
            let Some(&b) = chunk.get(*pos) else {
                return Step::Pending;
            };
            match self.sub {
                NumSub::Minus => match b {
                    b'0' => {
                        self.buf.push('0');
                        self.sub = NumSub::Zero;
                        *pos += 1;
                    }
                    b'1'..=b'9' => {
                        self.buf.push(b as char);
                        self.sub = NumSub::Int;
                        *pos += 1;
                    }
                    _ => return Step::BadByte(b),
                },
                NumSub::Zero => match b {
                    b'.' => {
                        self.buf.push('.');
                        self.has_frac = true;
                        self.sub = NumSub::Frac;
                        *pos += 1;
                    }
                    b'e' | b'E' => {
                        self.buf.push(b as char);
                        self.has_exp = true;
                        self.sub = NumSub::Exp;
                        *pos += 1;
                    }
                    _ => return self.finish_step(),
                },
                NumSub::Int => match b {
                    b'0'..=b'9' => {
                        self.buf.push(b as char);
                        *pos += 1;
                    }
                    b'.' => {
                        self.buf.push('.');
                        self.has_frac = true;
                        self.sub = NumSub::Frac;
                        *pos += 1;
                    }
                    b'e' | b'E' => {
                        self.buf.push(b as char);
                        self.has_exp = true;
                        self.sub = NumSub::Exp;
                        *pos += 1;
                    }
                    _ => return self.finish_step(),
                },
                NumSub::Frac => match b {
                    b'0'..=b'9' => {
                        self.buf.push(b as char);
                        self.sub = NumSub::FracCont;
                        *pos += 1;
                    }
                    _ => return Step::BadByte(b),
                },
                NumSub::FracCont => match b {
                    b'0'..=b'9' => {
                        self.buf.push(b as char);
                        *pos += 1;
                    }
                    b'e' | b'E' => {
                        self.buf.push(b as char);
                        self.has_exp = true;
                        self.sub = NumSub::Exp;
                        *pos += 1;
                    }
                    _ => return self.finish_step(),
                },
                NumSub::Exp => match b {
                    b'+' | b'-' => {
                        self.buf.push(b as char);
                        self.sub = NumSub::ExpSign;
                        *pos += 1;
                    }
                    b'0'..=b'9' => {
                        self.buf.push(b as char);
                        self.sub = NumSub::ExpCont;
                        *pos += 1;
                    }
                    _ => return Step::BadByte(b),
                },
                NumSub::ExpSign => match b {
                    b'0'..=b'9' => {
                        self.buf.push(b as char);
                        self.sub = NumSub::ExpCont;
                        *pos += 1;
                    }
                    _ => return Step::BadByte(b),
                },
                NumSub::ExpCont => match b {
                    b'0'..=b'9' => {
                        self.buf.push(b as char);
                        *pos += 1;
                    }
                    _ => return self.finish_step(),
                },
            }
        }
    }

    /// Called by the driver when the logical input ends with the number
    /// still in a terminal-acceptable sub-state (`Zero`, `Int`, `FracCont`,
    /// `ExpCont`): converts the accumulated buffer into a `Leaf`.
    ///
    /// Returns `None` if the sub-state cannot legally end a number at all
    /// (e.g. a bare `-`, or a `.`/`e` with no digits yet); the caller should
    /// raise an EOF error in that case. Returns `Some(Err(()))` if the
    /// sub-state was terminal but the literal failed semantic conversion
    /// (float overflow); the caller should raise a token error instead.
    #[must_use]
    pub fn finish_at_eof(&mut self) -> Option<Result<Leaf, ()>> {
        match self.sub {
            NumSub::Zero | NumSub::Int | NumSub::FracCont | NumSub::ExpCont => {
                Some(self.finish_checked())
            }
            NumSub::Minus | NumSub::Frac | NumSub::Exp | NumSub::ExpSign => None,
        }
    }

    fn finish_step(&self) -> Step {
        match self.finish_checked() {
            Ok(leaf) => Step::Done(leaf),
            Err(()) => Step::BadToken,
        }
    }

    /// Converts the accumulated buffer into a `Leaf`, reporting float
    /// overflow-to-infinity as `Err(())` rather than silently returning
    /// `inf`.
    fn finish_checked(&self) -> Result<Leaf, ()> {
        if !self.has_frac && !self.has_exp {
            if let Ok(n) = self.buf.parse::<i64>() {
                return Ok(Leaf::Integer(n));
            }
            if let Ok(n) = self.buf.parse::<i128>() {
                if let Ok(n) = i64::try_from(n) {
                    return Ok(Leaf::Integer(n));
                }
                return Ok(Leaf::Float(n as f64));
            }
        }
        let f: f64 = self.buf.parse().map_err(|_| ())?;
        if f.is_infinite() {
            Err(())
        } else {
            Ok(Leaf::Float(f))
        }
    }

    /// The exact source text lexed so far; used as the token in error
    /// messages.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(s: &str) -> (Step, usize) {
        let mut st = NumberState::begin(0, s.as_bytes()[0]);
        let mut pos = 1;
        let step = st.step(s.as_bytes(), &mut pos);
        (step, pos)
    }

    #[test]
    fn integer_terminates_at_non_digit() {
        let (step, pos) = lex("123,");
        match step {
            Step::Done(Leaf::Integer(123)) => {}
            other => panic!("unexpected: {other:?}", other = debug_step(&other)),
        }
        assert_eq!(pos, 3);
    }

    #[test]
    fn leading_zero_terminates_without_error() {
        let (step, pos) = lex("01");
        match step {
            Step::Done(Leaf::Integer(0)) => {}
            other => panic!("unexpected: {other:?}", other = debug_step(&other)),
        }
        assert_eq!(pos, 1);
    }

    #[test]
    fn float_with_fraction() {
        let (step, pos) = lex("1.5,");
        match step {
            Step::Done(Leaf::Float(n)) => assert!((n - 1.5).abs() < f64::EPSILON),
            other => panic!("unexpected: {other:?}", other = debug_step(&other)),
        }
        assert_eq!(pos, 3);
    }

    #[test]
    fn minus_without_digit_errors() {
        let mut st = NumberState::begin(0, b'-');
        let mut pos = 1;
        match st.step(b"-a", &mut pos) {
            Step::BadByte(b'a') => {}
            other => panic!("unexpected: {other:?}", other = debug_step(&other)),
        }
    }

    #[test]
    fn exponent_overflow_is_bad_token() {
        let mut st = NumberState::begin(0, b'1');
        let mut pos = 1;
        match st.step(b"1e999,", &mut pos) {
            Step::BadToken => {}
            other => panic!("unexpected: {other:?}", other = debug_step(&other)),
        }
        assert_eq!(st.token(), "1e999");
    }

    fn debug_step(step: &Step) -> &'static str {
        match step {
            Step::Done(_) => "Done",
            Step::Pending => "Pending",
            Step::BadByte(_) => "BadByte",
            Step::BadToken => "BadToken",
        }
    }
}
