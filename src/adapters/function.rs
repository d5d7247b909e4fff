//! Wraps a zero-argument producer closure as a [`crate::Source`].
//!
//! Covers both of the specification's closure-based source shapes: a plain
//! zero-argument producer, and a producer with arguments bound at
//! construction (the bound arguments are simply captured by the closure
//! itself before it is handed to [`FnSource`]).

use crate::source::{BoxIter, Source};

pub(crate) struct FnSource<F> {
    factory: F,
}

impl<F> FnSource<F> {
    pub(crate) fn new(factory: F) -> Self {
        Self { factory }
    }
}

impl<T, I, F> Source<T> for FnSource<F>
where
    T: Send + 'static,
    I: IntoIterator<Item = T>,
    I::IntoIter: Send + 'static,
    F: FnMut() -> I + Send,
{
    fn create(&mut self) -> BoxIter<T> {
        Box::new((self.factory)().into_iter().map(Ok))
    }
}
