//! The explicit work stack: the only heap structure the structural driver
//! needs to track arbitrarily nested objects/arrays without recursion, so
//! parse depth is bounded by available memory rather than by the host's
//! call stack.

/// One entry of the parse-frame stack. The topmost frame dictates what
/// "completing a value" means to [`crate::state::Parser::complete_value`].
#[derive(Debug)]
pub enum Frame<K, Out> {
    /// Sentinel at the bottom of the stack: completing a value here means
    /// the whole document is done.
    Terminate,
    /// Inside `[ ... ]`; `acc` holds elements completed so far, in source
    /// order.
    Array { acc: Vec<Out> },
    /// A key string was just completed and is waiting for its value; pushed
    /// between reading the key and reading the `:`-introduced value, then
    /// immediately popped and folded into the enclosing `Object` frame.
    Key { key: K },
    /// Inside `{ ... }`; `acc` holds completed `(key, value)` pairs in
    /// source order. Duplicate keys are not deduplicated here; that happens
    /// in `Sink::finish_object` (last-write-wins via `HashMap` insert).
    Object { acc: Vec<(K, Out)> },
}
