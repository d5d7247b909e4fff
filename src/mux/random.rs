//! The pluggable random source behind a [`crate::Mux`].

use core::fmt;

use rand::{rngs::StdRng, SeedableRng};

use crate::error::{Error, Result};

/// How a [`crate::Mux`]'s random generator is seeded.
///
/// A Mux owns exactly one [`StdRng`], built from this value at construction
/// time, and routes every draw (slot selection, child activation, budget
/// sampling) through it. Nested Muxes each get an independent generator.
#[derive(Clone)]
pub enum RandomState {
    /// Seed a fresh generator from this integer.
    Seed(u64),
    /// Use an already-seeded generator directly.
    Rng(StdRng),
    /// Seed a fresh generator from OS entropy.
    Default,
}

impl Default for RandomState {
    fn default() -> Self {
        RandomState::Default
    }
}

impl fmt::Debug for RandomState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RandomState::Seed(seed) => f.debug_tuple("Seed").field(seed).finish(),
            RandomState::Rng(_) => f.write_str("Rng(..)"),
            RandomState::Default => f.write_str("Default"),
        }
    }
}

impl RandomState {
    /// Parse a textual `random_state` — `"default"` or a base-10 `u64`
    /// seed — as accepted by config files or CLIs that serialize this field
    /// as text. This is the one dynamic entry point where an
    /// [`Error::BadRandomState`] is actually reachable: every other
    /// constructor on this type is statically typed.
    pub fn try_from_str(text: &str) -> Result<Self> {
        if text.eq_ignore_ascii_case("default") {
            return Ok(RandomState::Default);
        }

        text.parse::<u64>()
            .map(RandomState::Seed)
            .map_err(|_| Error::BadRandomState {
                text: text.to_owned(),
            })
    }

    pub(crate) fn into_rng(self) -> StdRng {
        match self {
            RandomState::Seed(seed) => StdRng::seed_from_u64(seed),
            RandomState::Rng(rng) => rng,
            RandomState::Default => StdRng::from_entropy(),
        }
    }
}
