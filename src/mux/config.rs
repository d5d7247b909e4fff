//! Builder for the knobs that govern a [`crate::Mux`]'s sampling behaviour.

use crate::{
    constants::DEFAULT_RATE,
    mux::{random::RandomState, rate::Rate},
};

/// Configuration consumed by [`crate::Mux::new`].
///
/// Every field has a default matching the one the multiplexer has used
/// historically: an active pool of size `k`, finite rate
/// [`DEFAULT_RATE`], sampling with replacement, no revival of children
/// that run dry, and pruning of children that turn out to be empty.
#[derive(Debug, Clone)]
pub struct MuxConfig {
    pub(crate) k: usize,
    pub(crate) weights: Option<Vec<f64>>,
    pub(crate) rate: Rate,
    pub(crate) with_replacement: bool,
    pub(crate) revive: bool,
    pub(crate) prune_empty_streams: bool,
    pub(crate) random_state: RandomState,
}

impl MuxConfig {
    /// Build a config with an active pool of `k` simultaneously-live
    /// children. `k` is clamped to at least `1`.
    pub fn new(k: usize) -> Self {
        Self {
            k: k.max(1),
            weights: None,
            rate: Rate::Finite(DEFAULT_RATE),
            with_replacement: true,
            revive: false,
            prune_empty_streams: true,
            random_state: RandomState::Default,
        }
    }

    /// Sample children proportionally to these weights instead of
    /// uniformly. The number of weights must equal the number of children
    /// passed to [`crate::Mux::new`], or construction fails with
    /// [`crate::Error::ShapeMismatch`].
    #[must_use]
    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Set the mean number of pulls an active slot survives before being
    /// retired and refilled.
    #[must_use]
    pub fn with_rate(mut self, rate: Rate) -> Self {
        self.rate = rate;
        self
    }

    /// Whether a child may be activated into more than one slot at once.
    /// Defaults to `true`; set to `false` to require distinct children per
    /// slot (`k` is then capped at the number of children).
    #[must_use]
    pub fn with_replacement(mut self, with_replacement: bool) -> Self {
        self.with_replacement = with_replacement;
        self
    }

    /// Whether a child that has been exhausted (every slot it ever held
    /// has run dry) may be reactivated into a later slot. Defaults to
    /// `false`.
    #[must_use]
    pub fn with_revive(mut self, revive: bool) -> Self {
        self.revive = revive;
        self
    }

    /// Whether a child whose very first activation yields nothing is
    /// dropped permanently from the sampling pool. Defaults to `true`.
    #[must_use]
    pub fn with_prune_empty_streams(mut self, prune_empty_streams: bool) -> Self {
        self.prune_empty_streams = prune_empty_streams;
        self
    }

    /// Seed the Mux's random generator from this integer.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_state = RandomState::Seed(seed);
        self
    }

    /// Supply an already-built random generator directly.
    #[must_use]
    pub fn with_random_state(mut self, random_state: RandomState) -> Self {
        self.random_state = random_state;
        self
    }
}
