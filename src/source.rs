//! The factory abstraction a [`crate::Streamer`] wraps.

use crate::error::{Error, Result};

/// A boxed, owned, `Send` iterator over fallible records.
///
/// Exhaustion is represented by a plain `None`; an `Err` item indicates a
/// genuine failure ([`Error::BadSource`] or [`Error::BadFields`]) and is
/// never followed by further items from a well-behaved source.
pub type BoxIter<T> = Box<dyn Iterator<Item = Result<T>> + Send>;

/// A factory that produces a fresh lazy sequence of records each time it is
/// invoked.
///
/// This is the single abstraction behind the specification's three source
/// shapes (a zero-argument producer, a producer with arguments bound at
/// construction, and a concrete re-iterable value): each is implemented as a
/// small adapter over this trait. Implement it directly only when wrapping a
/// source that can fail to open (e.g. a file or subprocess); in that case,
/// return `Err(Error::BadSource)` from the first item of the returned
/// iterator rather than from `create` itself, since `create`'s own job is
/// just to hand back a fresh iterator, not to eagerly run it.
pub trait Source<T>: Send {
    /// Construct a fresh lazy sequence, starting from the beginning of the
    /// underlying source.
    fn create(&mut self) -> BoxIter<T>;
}

/// Wraps any `Source<T>` so that failures which only become apparent once
/// the caller invokes the factory (rather than while iterating) surface as
/// an `Err(Error::BadSource)` first item instead of panicking.
///
/// Most [`Source`] implementations never need this: `create` already
/// returns a ready-to-use iterator. It exists for adapters which open an
/// external resource lazily and want a single place to turn "failed to
/// open" into the documented error.
pub fn fallible_open<T: Send + 'static>(
    opened: std::result::Result<BoxIter<T>, Error>,
) -> BoxIter<T> {
    match opened {
        Ok(iter) => iter,
        Err(e) => Box::new(std::iter::once(Err(e))),
    }
}
