//! qsearch
//!
//! Instant multi-term filter over a fixed list of quotations, with a
//! deferred, latency-injected match count and single-observer event hooks.
//!
//! The engine lives in [`state`]; [`model`] holds the pure value types;
//! [`host`] is the headless stand-in for a view layer used by the binary.

pub mod config;
pub mod host;
pub mod logging;
pub mod model;
pub mod state;

pub use model::{Corpus, SearchQuery, SearchTerms};
pub use state::{SearchEvent, SearchFilterEngine, SearchObserver};
