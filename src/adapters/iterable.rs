//! Wraps a concrete, re-iterable value (e.g. a `Vec<T>`) as a [`crate::Source`].

use crate::source::{BoxIter, Source};

pub(crate) struct IterableSource<C> {
    value: C,
}

impl<C> IterableSource<C> {
    pub(crate) fn new(value: C) -> Self {
        Self { value }
    }
}

impl<T, C> Source<T> for IterableSource<C>
where
    T: Send + 'static,
    C: Clone + IntoIterator<Item = T> + Send,
    C::IntoIter: Send + 'static,
{
    fn create(&mut self) -> BoxIter<T> {
        Box::new(self.value.clone().into_iter().map(Ok))
    }
}
