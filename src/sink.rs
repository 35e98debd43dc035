//! The materialization seam the structural driver depends on. Kept separate
//! from [`crate::value`] so the bare decoding state machine
//! (`crate::state::Parser`, generic over any [`Sink`]) compiles without the
//! `values` feature that gates the concrete [`crate::value::Value`] tree and
//! its [`crate::value::TreeSink`] implementation.

/// A fully-decoded scalar: everything a materialized value can be except
/// array and object containers. Handed to [`Sink::leaf`] by the structural
/// driver the moment a number, string, boolean, or null literal completes.
#[derive(Clone, Debug, PartialEq)]
pub enum Leaf {
    /// `null`.
    Null,
    /// `true` / `false`.
    Bool(bool),
    /// An integer literal that fit in `i64`.
    Integer(i64),
    /// A float literal, or an integer literal too wide for `i64`.
    Float(f64),
    /// A decoded, escaped string.
    String(String),
}

/// Materializes completed arrays and objects into some output representation
/// `Out`.
///
/// The structural driver (`crate::state`) never builds a `Vec`/`HashMap`
/// itself; it calls `Sink::finish_array`/`finish_object` on the accumulators
/// it has built during the parse, and `Sink::leaf` on every completed scalar.
/// This keeps "container factories are external" visible in the type
/// system: a host that wants a representation other
/// than [`crate::value::Value`] implements this trait directly and never
/// needs the `values` feature at all.
pub trait Sink<K> {
    /// The materialized representation of both arrays and objects, and of
    /// every scalar leaf.
    type Out;

    /// Turns a completed, source-ordered list of array elements into `Out`.
    fn finish_array(&mut self, items: Vec<Self::Out>) -> Self::Out;

    /// Turns a completed, source-ordered list of object pairs into `Out`.
    /// Duplicate keys have already survived as separate entries; last-write-
    /// wins collapsing is the sink's responsibility (`TreeSink` gets this for
    /// free from `HashMap::insert`).
    fn finish_object(&mut self, pairs: Vec<(K, Self::Out)>) -> Self::Out;

    /// Lifts a scalar leaf value into `Out`.
    fn leaf(&mut self, value: Leaf) -> Self::Out;
}
