//! Process-wide string interner backing the `atoms` key-decoding policy
//! (`crate::keys::AtomKeys`).
//!
//! Grounded on the Fax compiler's `faxc_util::symbol` module: a `DashMap` for
//! lock-free concurrent interning, behind a `LazyLock` so the table is built
//! on first use rather than at crate load. Interned strings are leaked to
//! obtain `'static` string slices, acceptable here for the same reason it is
//! in the compiler this is grounded on: the table is additive for the
//! process lifetime and never shrinks, so the leaked bytes are bounded by the
//! set of distinct object keys ever seen, not by how many times a document is
//! decoded.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

use dashmap::DashMap;

static INTERNER: LazyLock<Interner> = LazyLock::new(Interner::new);

struct Interner {
    by_text: DashMap<&'static str, u32>,
    by_index: DashMap<u32, &'static str>,
    next: AtomicU32,
}

impl Interner {
    fn new() -> Self {
        Interner {
            by_text: DashMap::new(),
            by_index: DashMap::new(),
            next: AtomicU32::new(0),
        }
    }

    fn intern(&self, s: &str) -> u32 {
        if let Some(existing) = self.by_text.get(s) {
            return *existing;
        }
        // A racing concurrent miss for the same text must not be allowed to
        // allocate two different indices for it: `entry().or_insert_with`
        // holds the shard lock for the whole check-then-insert, so only the
        // thread that actually inserts the entry runs the closure and
        // allocates an index. A losing racer's leaked copy of `s` is simply
        // never looked at again, wasted but harmless; what matters is that
        // every thread that interns this text ends up with the same index.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        *self.by_text.entry(leaked).or_insert_with(|| {
            let index = self.next.fetch_add(1, Ordering::Relaxed);
            self.by_index.insert(index, leaked);
            index
        })
    }

    fn try_existing(&self, s: &str) -> Option<u32> {
        self.by_text.get(s).map(|r| *r)
    }

    fn resolve(&self, index: u32) -> &'static str {
        *self
            .by_index
            .get(&index)
            .expect("Symbol indices are only ever produced by Interner::intern")
    }
}

/// A compact, `Copy` handle to an interned string. Two `Symbol`s compare
/// equal iff they were interned from equal strings; comparison never touches
/// the string table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    /// Interns `s`, returning the existing symbol if this text was seen
    /// before, or allocating a new one.
    #[must_use]
    pub fn intern(s: &str) -> Symbol {
        Symbol(INTERNER.intern(s))
    }

    /// Returns the symbol for `s` only if it was already interned, without
    /// allocating. Backs `crate::keys::AtomKeysExisting`.
    #[must_use]
    pub fn try_existing(s: &str) -> Option<Symbol> {
        INTERNER.try_existing(s).map(Symbol)
    }

    /// The interned text.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        INTERNER.resolve(self.0)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_interns_to_same_symbol() {
        let a = Symbol::intern("object_key");
        let b = Symbol::intern("object_key");
        assert_eq!(a, b);
    }

    #[test]
    fn different_text_interns_to_different_symbols() {
        let a = Symbol::intern("alpha_key_unique_1");
        let b = Symbol::intern("beta_key_unique_1");
        assert_ne!(a, b);
    }

    #[test]
    fn try_existing_fails_for_unseen_text() {
        assert!(Symbol::try_existing("never_interned_anywhere_xyz").is_none());
    }

    #[test]
    fn try_existing_succeeds_after_intern() {
        let sym = Symbol::intern("round_trip_key_1");
        assert_eq!(Symbol::try_existing("round_trip_key_1"), Some(sym));
    }

    #[test]
    fn as_str_round_trips() {
        let sym = Symbol::intern("echo_key_1");
        assert_eq!(sym.as_str(), "echo_key_1");
    }
}
