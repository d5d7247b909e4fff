#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
//! Streamux composes many finite or infinite sample sources into a single
//! derived sample stream whose statistics are controlled by the caller: how
//! many sources are simultaneously "live", how often each is drained before
//! being refreshed, whether exhausted sources are replaced, and with what
//! weights sources are sampled.
//!
//! The crate has two layers:
//!  * [`Streamer`] wraps a single [`Source`] so that it can be iterated
//!    repeatedly, restarted from scratch, cycled, or capped.
//!  * [`Mux`] composes many [`Streamable`] children (each either a
//!    [`Streamer`] or another [`Mux`]) into one weighted, rate-limited
//!    sample stream. Because [`Mux`] itself implements [`Streamable`],
//!    multiplexers nest without any extra wrapping.
//!
//! ## Example
//!
//! ```
//! use streamux::{Mux, MuxConfig, Streamable, Streamer};
//!
//! let evens = Streamer::from_iterable((0..).step_by(2).take(3).collect::<Vec<_>>());
//! let odds = Streamer::from_iterable((1..).step_by(2).take(3).collect::<Vec<_>>());
//!
//! let mut mux = Mux::new(
//!     vec![Box::new(evens), Box::new(odds)],
//!     MuxConfig::new(2).with_seed(1234),
//! )
//! .unwrap();
//!
//! let drawn: Vec<_> = mux
//!     .iterate(Some(6), false)
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(drawn.len(), 6);
//! ```
//!
//! ## Scope
//!
//! This crate is deliberately narrow: it has no opinion on what a "record"
//! is, how sources are parallelized, or how to buffer/shuffle/zip the
//! resulting stream. Those are caller concerns layered on top of
//! [`Streamable`].

#![warn(clippy::pedantic, rust_2018_idioms)]
#![allow(
    // Allowed as they are too pedantic
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::too_many_lines,
    clippy::cast_lossless,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
)]

mod adapters;
pub mod constants;
pub mod error;
mod fields;
mod mux;
mod source;
mod streamable;
mod streamer;

pub use crate::{
    error::{Error, Result},
    fields::Fields,
    mux::{random::RandomState, Mux, MuxConfig, Rate},
    source::{BoxIter, Source},
    streamable::Streamable,
    streamer::Streamer,
};
