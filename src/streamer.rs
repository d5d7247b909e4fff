//! A reusable wrapper around a single [`Source`].

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    adapters::{FnSource, IterableSource},
    error::{Error, Result},
    fields::Fields,
    source::{BoxIter, Source},
    streamable::{capped_cycle, Streamable},
};

/// A reusable wrapper around a [`Source`], so that the same source can be
/// iterated repeatedly — each call to [`Streamer::iterate`] starts a fresh,
/// independent traversal, with no state leaking from the previous one.
///
/// Because the adapters this crate provides (`from_fn`, `from_fn_with_args`,
/// `from_iterable`) are statically typed, construction can never fail: the
/// type system already rules out "a source that doesn't produce a
/// sequence". [`Error::BadSource`] is reserved for custom [`Source`] impls
/// that open an external resource lazily and can fail to do so; that
/// failure surfaces from the first `next()` call of the returned iterator,
/// not from construction.
pub struct Streamer<T> {
    source: Arc<Mutex<Box<dyn Source<T>>>>,
}

impl<T> Streamer<T>
where
    T: Send + 'static,
{
    /// Wrap any [`Source`] implementation.
    pub fn new(source: impl Source<T> + 'static) -> Self {
        Self {
            source: Arc::new(Mutex::new(Box::new(source))),
        }
    }

    /// Wrap a zero-argument producer closure, invoked afresh on every
    /// activation.
    pub fn from_fn<I, F>(factory: F) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
        F: FnMut() -> I + Send + 'static,
    {
        Self::new(FnSource::new(factory))
    }

    /// Wrap a factory together with a fixed argument value, captured once at
    /// construction and passed identically on every restart.
    pub fn from_fn_with_args<A, I, F>(mut factory: F, args: A) -> Self
    where
        A: Clone + Send + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
        F: FnMut(&A) -> I + Send + 'static,
    {
        Self::new(FnSource::new(move || factory(&args)))
    }

    /// Wrap a concrete, re-iterable value (e.g. a `Vec<T>` or `String`);
    /// each restart re-iterates a fresh clone of it from the beginning.
    pub fn from_iterable<C>(value: C) -> Self
    where
        C: Clone + IntoIterator<Item = T> + Send + 'static,
        C::IntoIter: Send + 'static,
    {
        Self::new(IterableSource::new(value))
    }
}

impl<T> Streamer<T>
where
    T: Fields + Send + 'static,
{
    /// Project each record yielded by `iterate(max_iter, cycle)` down to an
    /// ordered `Vec` of the named fields.
    ///
    /// Fails immediately with [`Error::BadFields`] if `keys` is empty.
    /// Otherwise, yields `Err(Error::BadFields)` as the first item if the
    /// first record produced lacks one of the requested keys.
    pub fn tuples(
        &mut self,
        keys: &[&str],
        max_iter: Option<usize>,
        cycle: bool,
    ) -> Result<BoxIter<Vec<T::Value>>> {
        if keys.is_empty() {
            return Err(Error::BadFields { key: None });
        }
        Ok(project_tuples(self.iterate(max_iter, cycle), keys))
    }
}

impl<T> Streamable<T> for Streamer<T>
where
    T: Send + 'static,
{
    fn iterate(&mut self, max_iter: Option<usize>, cycle: bool) -> BoxIter<T> {
        let source = Arc::clone(&self.source);
        capped_cycle(move || source.lock().create(), max_iter, cycle)
    }
}

impl<'a, T: Send + 'static> IntoIterator for &'a mut Streamer<T> {
    type Item = Result<T>;
    type IntoIter = BoxIter<T>;

    /// Equivalent to `iterate(None, false)`.
    fn into_iter(self) -> Self::IntoIter {
        self.iterate(None, false)
    }
}

/// Shared by [`Streamer::tuples`] and [`crate::Mux::tuples`]: projects each
/// record lazily as it's pulled. Callers are responsible for rejecting an
/// empty `keys` list before ever constructing `records`, so that
/// `BadFields` fires at call time instead of on first poll.
pub(crate) fn project_tuples<T>(mut records: BoxIter<T>, keys: &[&str]) -> BoxIter<Vec<T::Value>>
where
    T: Fields + 'static,
{
    let keys: Vec<String> = keys.iter().map(|k| (*k).to_owned()).collect();

    Box::new(std::iter::from_fn(move || {
        let record = match records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e)),
        };

        let mut projected = Vec::with_capacity(keys.len());
        for key in &keys {
            match record.field(key) {
                Some(value) => projected.push(value),
                None => {
                    let err = Error::BadFields {
                        key: Some(key.clone()),
                    };
                    return Some(Err(err));
                },
            }
        }
        Some(Ok(projected))
    }))
}

#[cfg(test)]
mod test {
    use super::*;

    struct Record {
        a: i64,
        b: i64,
    }

    impl Fields for Record {
        type Value = i64;

        fn field(&self, key: &str) -> Option<i64> {
            match key {
                "a" => Some(self.a),
                "b" => Some(self.b),
                _ => None,
            }
        }
    }

    #[test]
    fn iterate_exhausts_a_finite_source() {
        let mut s = Streamer::from_iterable(vec![1, 2, 3]);
        let drawn: Vec<_> = s.iterate(None, false).collect::<Result<_>>().unwrap();
        assert_eq!(drawn, vec![1, 2, 3]);
    }

    #[test]
    fn iterate_restarts_independently_each_call() {
        let mut s = Streamer::from_iterable(vec![1, 2, 3]);
        let first: Vec<_> = s.iterate(None, false).collect::<Result<_>>().unwrap();
        let second: Vec<_> = s.iterate(None, false).collect::<Result<_>>().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn max_iter_caps_an_infinite_source() {
        let mut s = Streamer::from_fn(|| 0..);
        let drawn: Vec<_> = s
            .iterate(Some(5), false)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(drawn, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn cycle_restarts_a_finite_source_past_its_own_length() {
        let mut s = Streamer::from_iterable(vec![1, 2, 3]);
        let drawn: Vec<_> = s.iterate(Some(7), true).collect::<Result<_>>().unwrap();
        assert_eq!(drawn, vec![1, 2, 3, 1, 2, 3, 1]);
    }

    #[test]
    fn from_fn_with_args_rebinds_the_same_argument_on_restart() {
        let mut s = Streamer::from_fn_with_args(|base: &i64| (*base..*base + 2), 10i64);
        let first: Vec<_> = s.iterate(None, false).collect::<Result<_>>().unwrap();
        let second: Vec<_> = s.iterate(None, false).collect::<Result<_>>().unwrap();
        assert_eq!(first, vec![10, 11]);
        assert_eq!(second, vec![10, 11]);
    }

    #[test]
    fn tuples_projects_requested_fields_in_order() {
        let mut s = Streamer::from_fn(|| {
            vec![Record { a: 1, b: 2 }, Record { a: 3, b: 4 }]
        });
        let rows: Vec<_> = s
            .tuples(&["b", "a"], None, false)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(rows, vec![vec![2, 1], vec![4, 3]]);
    }

    #[test]
    fn tuples_rejects_an_empty_key_list() {
        let mut s = Streamer::from_fn(|| vec![Record { a: 1, b: 2 }]);
        assert!(matches!(
            s.tuples(&[], None, false),
            Err(Error::BadFields { key: None })
        ));
    }

    #[test]
    fn tuples_reports_a_missing_key() {
        let mut s = Streamer::from_fn(|| vec![Record { a: 1, b: 2 }]);
        let mut rows = s.tuples(&["missing"], None, false).unwrap();
        assert!(matches!(
            rows.next(),
            Some(Err(Error::BadFields { key: Some(ref k) })) if k == "missing"
        ));
    }
}
