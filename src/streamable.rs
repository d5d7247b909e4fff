//! The shared contract implemented by [`crate::Streamer`] and [`crate::Mux`].

use crate::source::BoxIter;

/// The capability shared by [`crate::Streamer`] and [`crate::Mux`]: produce
/// a fresh, optionally-capped, optionally-cycling lazy sequence on demand.
///
/// Because [`crate::Mux`] implements `Streamable` just like [`crate::Streamer`]
/// does, a Mux can be used as a child of another Mux with no extra wrapper
/// type — multiplexers nest directly.
pub trait Streamable<T>: Send {
    /// Produce a fresh lazy sequence.
    ///
    /// If `cycle` is `false`, the sequence yields up to `max_iter` records
    /// (or until the underlying source exhausts, whichever comes first); if
    /// `max_iter` is `None`, it yields until exhaustion. If `cycle` is
    /// `true`, the source is restarted from scratch on exhaustion and
    /// iteration continues — bounded if `max_iter` is set, infinite
    /// otherwise.
    fn iterate(&mut self, max_iter: Option<usize>, cycle: bool) -> BoxIter<T>;
}

/// Applies a `max_iter` cap and, if requested, cycling-on-exhaustion to a
/// sequence of fresh-iterator calls.
///
/// Shared by [`crate::Streamer`] and [`crate::Mux`] so that both cap/cycle
/// identically without duplicating the bookkeeping.
pub(crate) fn capped_cycle<T: 'static>(
    mut fresh: impl FnMut() -> BoxIter<T> + Send + 'static,
    max_iter: Option<usize>,
    cycle: bool,
) -> BoxIter<T> {
    let mut remaining = max_iter;
    // `fresh` is not called here: the underlying sequence is built lazily,
    // on the first poll below, not at the moment `iterate` hands this back.
    let mut current: Option<BoxIter<T>> = None;
    Box::new(std::iter::from_fn(move || loop {
        if let Some(0) = remaining {
            return None;
        }

        if current.is_none() {
            current = Some(fresh());
        }
        let iter = current.as_mut().expect("populated above");

        match iter.next() {
            Some(item) => {
                if let Some(n) = remaining.as_mut() {
                    *n -= 1;
                }
                return Some(item);
            },
            None if cycle => {
                current = None;
            },
            None => return None,
        }
    }))
}
