//! Constants governing default Mux behaviour.

/// Default mean number of samples drawn from a slot before it is retired,
/// used when a [`crate::Mux`] is built without an explicit rate.
pub const DEFAULT_RATE: f64 = 256.0;

/// Multiplier applied to a Mux's pool size *k* to bound the number of
/// consecutive empty-activation retries a single pull may spend before
/// giving up and terminating iteration.
///
/// Without this bound, a Mux over all-empty children with `revive = true`
/// and no pruning could spin forever trying to refill its pool.
pub const RETRY_BOUND_FACTOR: usize = 2;
