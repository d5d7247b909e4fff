//! The active pool: which children currently occupy a slot, and the
//! weighted selection and retirement rules that govern turnover.

use rand::{distributions::WeightedIndex, prelude::Distribution, rngs::StdRng, Rng};
use tracing::{debug, trace, warn};

use crate::{
    constants::RETRY_BOUND_FACTOR,
    error::Result,
    mux::rate::{Budget, Rate},
    source::BoxIter,
    streamable::Streamable,
};

struct Slot<T> {
    child: usize,
    iter: BoxIter<T>,
    pending: Option<Result<T>>,
    budget: Budget,
}

impl<T> Slot<T> {
    fn next(&mut self) -> Option<Result<T>> {
        self.pending.take().or_else(|| self.iter.next())
    }
}

enum Activation<T> {
    Slot(Slot<T>),
    Empty,
    NoEligibleChild,
}

/// The mutable state shared, via `Arc<Mutex<_>>`, by every in-flight
/// iterator a [`crate::Mux`] has handed out.
pub(crate) struct MuxState<T> {
    children: Vec<Box<dyn Streamable<T>>>,
    weights: Vec<f64>,
    k: usize,
    rate: Rate,
    with_replacement: bool,
    revive: bool,
    prune_empty_streams: bool,
    rng: StdRng,
    occupied: Vec<usize>,
    retired: Vec<bool>,
    pool: Vec<Slot<T>>,
}

impl<T: Send + 'static> MuxState<T> {
    pub(crate) fn new(
        children: Vec<Box<dyn Streamable<T>>>,
        weights: Vec<f64>,
        k: usize,
        rate: Rate,
        with_replacement: bool,
        revive: bool,
        prune_empty_streams: bool,
        rng: StdRng,
    ) -> Self {
        let occupied = vec![0; children.len()];
        let retired = vec![false; children.len()];
        Self {
            children,
            weights,
            k,
            rate,
            with_replacement,
            revive,
            prune_empty_streams,
            rng,
            occupied,
            retired,
            pool: Vec::new(),
        }
    }

    /// Discard whatever the active pool looked like after the previous
    /// traversal and start a new one from scratch. Children, weights, and
    /// the random generator all carry over unchanged.
    pub(crate) fn reset_pool(&mut self) {
        self.pool.clear();
        self.occupied.iter_mut().for_each(|o| *o = 0);
        self.retired.iter_mut().for_each(|r| *r = false);
    }

    /// Draw the next record from the active pool, refilling and retiring
    /// slots as needed. Returns `None` once no eligible child remains to
    /// refill an empty pool, or once the per-pull retry bound is spent on
    /// children that keep producing nothing.
    pub(crate) fn pull_one(&mut self) -> Option<Result<T>> {
        loop {
            if self.pool.len() < self.k && !self.try_refill() && self.pool.is_empty() {
                return None;
            }
            if self.pool.is_empty() {
                return None;
            }

            let slot_idx = self.choose_active_slot()?;
            match self.pool[slot_idx].next() {
                Some(item) => {
                    self.pool[slot_idx].budget = self.pool[slot_idx].budget.decrement();
                    if self.pool[slot_idx].budget.is_exhausted() {
                        self.retire_slot(slot_idx, false);
                    }
                    return Some(item);
                },
                None => {
                    self.retire_slot(slot_idx, true);
                },
            }
        }
    }

    /// Bring the pool back up to `k` slots, bounded to `2k` consecutive
    /// empty activations so that a pool of all-empty, revivable children
    /// cannot spin forever. Returns `false` if the pool could not be
    /// brought up to size (either no eligible child remained, or the retry
    /// bound was spent).
    fn try_refill(&mut self) -> bool {
        let retry_bound = RETRY_BOUND_FACTOR * self.k.max(1);
        let mut empty_in_a_row = 0usize;
        while self.pool.len() < self.k {
            match self.activate_one() {
                Activation::Slot(slot) => {
                    debug!(child = slot.child, "activated slot");
                    self.pool.push(slot);
                    empty_in_a_row = 0;
                },
                Activation::Empty => {
                    empty_in_a_row += 1;
                    if empty_in_a_row >= retry_bound {
                        warn!(
                            retry_bound,
                            "exceeded retry bound on empty activations; giving up on refill"
                        );
                        return false;
                    }
                },
                Activation::NoEligibleChild => return false,
            }
        }
        true
    }

    /// Weight of child `idx` as a candidate for a *new* activation: zero if
    /// it's permanently retired, or if it's already occupying a slot and
    /// sampling is configured without replacement.
    fn eligible_weight(&self, idx: usize) -> f64 {
        if self.retired[idx] {
            return 0.0;
        }
        if !self.with_replacement && self.occupied[idx] > 0 {
            return 0.0;
        }
        self.weights[idx]
    }

    fn activate_one(&mut self) -> Activation<T> {
        let weights: Vec<f64> = (0..self.children.len())
            .map(|i| self.eligible_weight(i))
            .collect();
        let dist = match WeightedIndex::new(&weights) {
            Ok(dist) => dist,
            Err(_) => return Activation::NoEligibleChild,
        };
        let idx = dist.sample(&mut self.rng);
        self.occupied[idx] += 1;

        let mut iter = self.children[idx].iterate(None, false);
        match iter.next() {
            None => {
                self.occupied[idx] -= 1;
                if self.prune_empty_streams {
                    trace!(child = idx, "pruning child empty on first activation");
                    self.retired[idx] = true;
                }
                Activation::Empty
            },
            Some(first) => {
                let budget = self.rate.sample_budget(&mut self.rng);
                Activation::Slot(Slot {
                    child: idx,
                    iter,
                    pending: Some(first),
                    budget,
                })
            },
        }
    }

    fn retire_slot(&mut self, slot_idx: usize, exhausted: bool) {
        let slot = self.pool.remove(slot_idx);
        self.occupied[slot.child] -= 1;
        if exhausted {
            trace!(child = slot.child, revive = self.revive, "slot exhausted");
        } else {
            trace!(child = slot.child, "slot budget exhausted");
        }
        // A retirement for any reason — the source itself running dry, or
        // the sampled budget reaching zero first — is the same "retired"
        // transition for a child sampled without replacement: it must not
        // be re-activated unless revive allows it.
        if !self.with_replacement && !self.revive {
            self.retired[slot.child] = true;
        }
    }

    fn choose_active_slot(&mut self) -> Option<usize> {
        if self.pool.is_empty() {
            return None;
        }
        let weights: Vec<f64> = self.pool.iter().map(|s| self.weights[s.child]).collect();
        match WeightedIndex::new(&weights) {
            Ok(dist) => Some(dist.sample(&mut self.rng)),
            Err(_) => Some(self.rng.gen_range(0..self.pool.len())),
        }
    }
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;

    use super::*;
    use crate::Streamer;

    fn state(
        children: Vec<Box<dyn Streamable<i64>>>,
        weights: Vec<f64>,
        k: usize,
        rate: Rate,
        with_replacement: bool,
        revive: bool,
    ) -> MuxState<i64> {
        MuxState::new(
            children,
            weights,
            k,
            rate,
            with_replacement,
            revive,
            true,
            StdRng::seed_from_u64(9),
        )
    }

    /// A slot retired because its sampled budget ran out must not be
    /// reactivated when sampling without replacement and without revival —
    /// only the cause of retirement used to differ (source exhaustion vs.
    /// budget exhaustion), silently allowing the latter to restart the
    /// same child from scratch.
    #[test]
    fn budget_exhaustion_without_replacement_does_not_reactivate_the_same_child() {
        let reference: Vec<i64> = (0..50).collect();
        let children: Vec<Box<dyn Streamable<i64>>> =
            vec![Box::new(Streamer::from_iterable(reference.clone()))];
        let mut mux_state = state(children, vec![1.0], 1, Rate::Finite(1.0), false, false);

        let mut drawn = Vec::new();
        while let Some(item) = mux_state.pull_one() {
            drawn.push(item.unwrap());
        }

        assert!(drawn.len() <= reference.len());
        assert_eq!(drawn, reference[..drawn.len()]);
    }

    /// With replacement, a slot retired on budget exhaustion is free to
    /// reactivate the same child from the beginning.
    #[test]
    fn budget_exhaustion_with_replacement_reactivates_the_child() {
        let reference: Vec<i64> = (0..5).collect();
        let children: Vec<Box<dyn Streamable<i64>>> =
            vec![Box::new(Streamer::from_iterable(reference))];
        let mut mux_state = state(children, vec![1.0], 1, Rate::Finite(1.0), true, false);

        let mut drawn = Vec::new();
        for _ in 0..20 {
            match mux_state.pull_one() {
                Some(item) => drawn.push(item.unwrap()),
                None => break,
            }
        }

        assert_eq!(drawn.len(), 20);
        assert_eq!(drawn[0], 0);
    }

    /// Once both children occupy the pool, neither is an eligible
    /// candidate for a *further* activation while sampling without
    /// replacement.
    #[test]
    fn eligible_weight_excludes_occupied_children_without_replacement() {
        let children: Vec<Box<dyn Streamable<i64>>> = vec![
            Box::new(Streamer::from_iterable(vec![1i64, 2])),
            Box::new(Streamer::from_iterable(vec![3i64, 4])),
        ];
        let mut mux_state = state(children, vec![1.0, 1.0], 2, Rate::Unlimited, false, false);
        mux_state.reset_pool();
        assert!(mux_state.try_refill());
        assert_eq!(mux_state.pool.len(), 2);
        assert_eq!(mux_state.eligible_weight(0), 0.0);
        assert_eq!(mux_state.eligible_weight(1), 0.0);
    }

    /// A child pruned for yielding nothing on its first activation stays
    /// permanently ineligible even though it was never truly "occupied".
    #[test]
    fn pruned_child_is_permanently_ineligible() {
        let empty: Vec<i64> = vec![];
        let children: Vec<Box<dyn Streamable<i64>>> = vec![
            Box::new(Streamer::from_iterable(empty)),
            Box::new(Streamer::from_iterable(vec![1i64])),
        ];
        // Weighted overwhelmingly toward the empty child so it is always
        // the first (and only) one offered a chance to prune.
        let mut mux_state = state(
            children,
            vec![1e10, 1e-10],
            1,
            Rate::Unlimited,
            true,
            false,
        );
        mux_state.reset_pool();
        assert!(mux_state.try_refill());
        assert_eq!(mux_state.eligible_weight(0), 0.0);
    }
}
