//! Keyword matcher: `true`, `false`, and `null`.

use crate::sink::Leaf;

/// Which literal is being matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    True,
    False,
    Null,
}

impl Kind {
    fn literal(self) -> &'static [u8] {
        match self {
            Kind::True => b"true",
            Kind::False => b"false",
            Kind::Null => b"null",
        }
    }

    fn leaf(self) -> Leaf {
        match self {
            Kind::True => Leaf::Bool(true),
            Kind::False => Leaf::Bool(false),
            Kind::Null => Leaf::Null,
        }
    }
}

/// Suspendable keyword-lexer state.
#[derive(Debug, Clone)]
pub struct KeywordState {
    kind: Kind,
    /// Bytes of the literal matched so far, including the one the dispatch
    /// table already classified.
    matched: usize,
}

/// Outcome of one call to [`KeywordState::step`].
pub enum Step {
    Done(Leaf),
    Pending,
    /// The byte at the returned index within the literal did not match.
    BadByte(u8),
}

impl KeywordState {
    /// Starts matching the keyword selected by `first` (`t`, `f`, or `n`),
    /// which has already been consumed by the caller.
    #[must_use]
    pub fn begin(first: u8) -> Self {
        let kind = match first {
            b't' => Kind::True,
            b'f' => Kind::False,
            b'n' => Kind::Null,
            _ => unreachable!("dispatch table only enters keyword lexer on t, f, n"),
        };
        KeywordState { kind, matched: 1 }
    }

    /// Fast path: if the whole literal (minus the already-consumed first
    /// byte) is present in `chunk[*pos..]`, matches it in one slice compare
    /// and returns `Some` without going through the byte-at-a-time loop.
    #[must_use]
    pub fn try_match_whole(first: u8, chunk: &[u8], pos: &mut usize) -> Option<Leaf> {
        let kind = match first {
            b't' => Kind::True,
            b'f' => Kind::False,
            b'n' => Kind::Null,
            _ => return None,
        };
        let rest = &kind.literal()[1..];
        if chunk.get(*pos..*pos + rest.len()) == Some(rest) {
            *pos += rest.len();
            Some(kind.leaf())
        } else {
            None
        }
    }

    pub fn step(&mut self, chunk: &[u8], pos: &mut usize) -> Step {
        let literal = self.kind.literal();
        while self.matched < literal.len() {
            let Some(&b) = chunk.get(*pos) else {
                return Step::Pending;
            };
            if b != literal[self.matched] {
                return Step::BadByte(b);
            }
            self.matched += 1;
            *pos += 1;
        }
        Step::Done(self.kind.leaf())
    }
}
