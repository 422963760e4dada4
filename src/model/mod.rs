//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod corpus;
pub mod error;
pub mod query;

// Re-export for convenience
pub use corpus::{Corpus, SHAKESPEARE_QUOTES};
pub use error::AppError;
pub use query::{SearchQuery, SearchTerms};
