//! Field-projection support for [`Streamable::tuples`](crate::Streamable::tuples).

/// A record type that can be viewed as a keyed mapping from field name to a
/// value, so that [`crate::Streamable::tuples`] can project it down to the
/// fields a caller actually wants.
///
/// This crate never assumes a concrete record type; callers implement
/// `Fields` for whatever type their sources actually produce.
pub trait Fields {
    /// The projected value type yielded for each requested key.
    type Value;

    /// Look up a single field by name, returning `None` if the record has
    /// no such key.
    fn field(&self, key: &str) -> Option<Self::Value>;
}
