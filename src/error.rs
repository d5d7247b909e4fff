//! Errors surfaced by [`crate::Streamer`] and [`crate::Mux`].

use core::fmt;
use std::error::Error as StdError;

/// An error returned while constructing or iterating a [`crate::Streamer`]
/// or [`crate::Mux`].
///
/// Construction-time variants ([`Error::EmptyMux`], [`Error::ShapeMismatch`],
/// [`Error::DegenerateWeights`], [`Error::BadRandomState`]) are returned
/// directly from the relevant constructor. Iteration-time variants
/// ([`Error::BadSource`], [`Error::BadFields`]) are yielded as `Some(Err(..))`
/// from the returned iterator; exhaustion is never an error and is always a
/// plain `None`.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A [`crate::Source`] was invoked but failed to produce a sequence.
    BadSource,
    /// A [`crate::Mux`] was constructed with no children.
    EmptyMux,
    /// The number of weights did not match the number of children.
    ShapeMismatch {
        /// Number of children the Mux was given.
        children: usize,
        /// Number of weights the Mux was given.
        weights: usize,
    },
    /// Every weight was zero, or some weight was negative.
    DegenerateWeights,
    /// The textual `random_state` supplied was neither `"default"` nor a
    /// valid base-10 `u64` seed.
    BadRandomState {
        /// The text that failed to parse.
        text: String,
    },
    /// `tuples` was called with no keys, or the first record produced by a
    /// stream lacked one of the requested keys.
    BadFields {
        /// The key that was missing, if the failure was a missing-key
        /// lookup rather than an empty key list.
        key: Option<String>,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BadSource => write!(f, "source did not produce a lazy sequence"),
            Error::EmptyMux => write!(f, "mux must have at least one child stream"),
            Error::ShapeMismatch { children, weights } => write!(
                f,
                "expected {} weights for {} children, got {}",
                children, children, weights
            ),
            Error::DegenerateWeights => write!(
                f,
                "weights must be non-negative with at least one positive entry"
            ),
            Error::BadRandomState { text } => write!(f, "unsupported random_state: {:?}", text),
            Error::BadFields { key: None } => write!(f, "tuples() requires at least one key"),
            Error::BadFields { key: Some(key) } => {
                write!(f, "record is missing requested field {:?}", key)
            },
        }
    }
}

impl StdError for Error {}

/// Convenience alias for fallible return of streamux values.
pub type Result<T> = std::result::Result<T, Error>;
