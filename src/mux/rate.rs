//! Per-slot sample budgets and the rate that governs them.

use rand::Rng;
use rand_distr::{Distribution, Exp};

/// How many more successful pulls an active slot has before it is retired
/// and a fresh child is activated in its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Budget {
    /// This many more pulls remain.
    Remaining(u64),
    /// Never retire this slot on budget alone.
    Unlimited,
}

impl Budget {
    pub(crate) fn decrement(self) -> Self {
        match self {
            Budget::Remaining(n) => Budget::Remaining(n.saturating_sub(1)),
            Budget::Unlimited => Budget::Unlimited,
        }
    }

    pub(crate) fn is_exhausted(self) -> bool {
        matches!(self, Budget::Remaining(0))
    }
}

/// The mean number of records drawn from one active slot before that slot
/// is retired and replaced, shaping how often the active pool turns over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rate {
    /// Draw a per-slot budget from `1 + floor(Exp(1 / r))`, so that `r` is
    /// the mean number of pulls a slot survives.
    Finite(f64),
    /// Slots are never retired for budget reasons; they run until their
    /// source itself is exhausted (and, depending on configuration, pruned
    /// or revived).
    Unlimited,
}

impl Rate {
    pub(crate) fn sample_budget(self, rng: &mut impl Rng) -> Budget {
        match self {
            Rate::Unlimited => Budget::Unlimited,
            Rate::Finite(r) => {
                debug_assert!(r > 0.0, "rate must be positive");
                let exp = Exp::new(1.0 / r).unwrap_or_else(|_| {
                    Exp::new(1.0 / crate::constants::DEFAULT_RATE).expect("default rate is valid")
                });
                let draw: f64 = exp.sample(rng);
                Budget::Remaining(1 + draw.floor() as u64)
            },
        }
    }
}
