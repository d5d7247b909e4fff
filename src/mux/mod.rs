//! Composes many [`Streamable`] children into one weighted, rate-limited
//! sample stream.

mod config;
mod pool;
pub mod random;
mod rate;

use std::sync::Arc;

use parking_lot::Mutex;
pub use rate::Rate;
use tracing::Span;

pub use self::config::MuxConfig;
use self::pool::MuxState;
use crate::{
    error::{Error, Result},
    fields::Fields,
    source::BoxIter,
    streamable::{capped_cycle, Streamable},
    streamer::project_tuples,
};

/// Composes many [`Streamable`] children — each either a [`crate::Streamer`]
/// or another `Mux` — into a single derived sample stream.
///
/// At any time, up to `k` children are "active", each occupying a slot in
/// the pool. Every pull weighs the active slots by their child's weight and
/// draws from one; when a slot's budget runs out, or its child's sequence
/// itself ends, the slot is retired and a fresh child is activated into its
/// place (unless no eligible child remains). Because `Mux` implements
/// [`Streamable`] just like [`crate::Streamer`], a `Mux` can be used as a
/// child of another `Mux` with no extra wrapper type.
pub struct Mux<T> {
    state: Arc<Mutex<MuxState<T>>>,
    span: Span,
}

impl<T> Mux<T>
where
    T: Send + 'static,
{
    /// Build a Mux over `children`, consuming `config`.
    ///
    /// Fails with [`Error::EmptyMux`] if `children` is empty, with
    /// [`Error::ShapeMismatch`] if `config` carries explicit weights whose
    /// length doesn't match `children`, or with [`Error::DegenerateWeights`]
    /// if every resolved weight is non-positive.
    pub fn new(children: Vec<Box<dyn Streamable<T>>>, config: MuxConfig) -> Result<Self> {
        if children.is_empty() {
            return Err(Error::EmptyMux);
        }

        let weights = match config.weights {
            Some(weights) => {
                if weights.len() != children.len() {
                    return Err(Error::ShapeMismatch {
                        children: children.len(),
                        weights: weights.len(),
                    });
                }
                weights
            },
            None => vec![1.0; children.len()],
        };

        if weights.iter().any(|&w| w < 0.0) || weights.iter().all(|&w| w <= 0.0) {
            return Err(Error::DegenerateWeights);
        }

        let k = if config.with_replacement {
            config.k
        } else {
            config.k.min(children.len())
        };

        let rng = config.random_state.into_rng();
        let state = MuxState::new(
            children,
            weights,
            k,
            config.rate,
            config.with_replacement,
            config.revive,
            config.prune_empty_streams,
            rng,
        );

        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            span: tracing::info_span!("mux"),
        })
    }
}

impl<T> Mux<T>
where
    T: Fields + Send + 'static,
{
    /// Project each record yielded by `iterate(max_iter, cycle)` down to an
    /// ordered `Vec` of the named fields. See
    /// [`crate::Streamer::tuples`] for the exact contract.
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

impl<T> Streamable<T> for Mux<T>
where
    T: Send + 'static,
{
    /// Start a fresh traversal of the active pool.
    ///
    /// Each call resets which children are currently occupying a slot and
    /// which have been retired, then pulls records one at a time, capped at
    /// `max_iter` and cycling on exhaustion exactly as
    /// [`crate::Streamer::iterate`] does. "Exhaustion" for a Mux means no
    /// eligible child remains to refill the active pool — every child is
    /// either permanently retired or out of budget with revival disabled.
    fn iterate(&mut self, max_iter: Option<usize>, cycle: bool) -> BoxIter<T> {
        let state = Arc::clone(&self.state);
        let span = self.span.clone();

        capped_cycle(
            move || {
                state.lock().reset_pool();
                pull_iter(Arc::clone(&state), span.clone())
            },
            max_iter,
            cycle,
        )
    }
}

/// A single pass over the active pool, pulling one record per `next()`
/// call until no eligible child remains to refill it.
fn pull_iter<T: Send + 'static>(state: Arc<Mutex<MuxState<T>>>, span: Span) -> BoxIter<T> {
    Box::new(std::iter::from_fn(move || {
        let _entered = span.enter();
        state.lock().pull_one()
    }))
}

impl<'a, T: Send + 'static> IntoIterator for &'a mut Mux<T> {
    type Item = Result<T>;
    type IntoIter = BoxIter<T>;

    /// Equivalent to `iterate(None, false)`.
    fn into_iter(self) -> Self::IntoIter {
        self.iterate(None, false)
    }
}
