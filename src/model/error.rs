//! Error types for the qsearch application.
//!
//! Errors follow a small hierarchy built with `thiserror`, composing via `?`
//! and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from the host loop
//!   - [`ConfigError`] - Config file lookup, read and parse failures
//!   - [`LoggingError`] - Tracing subscriber setup failures
//!   - `std::io::Error` - stdin/stdout failures in the CLI host
//!   - `serde_json::Error` - JSON report rendering failures
//!
//! The search engine itself has no error type: every engine operation is a
//! total function. A count completion that arrives for a superseded query is
//! discarded inside the engine, never surfaced here.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// All of these are fatal for the CLI host: they propagate to `main`, which
/// prints them to stderr and exits non-zero.
///
/// # Examples
///
/// ```
/// use qsearch::config::ConfigError;
/// use qsearch::model::error::AppError;
///
/// let err: AppError = ConfigError::InvalidPath("???".to_string()).into();
/// assert!(err.to_string().contains("Invalid config path"));
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Reading queries from stdin or writing results to stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON report could not be serialized.
    #[error("Failed to render JSON output: {0}")]
    Json(#[from] serde_json::Error),
}
