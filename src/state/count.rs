//! Deferred count state machine.
//!
//! CountState is a sum type representing the three possible count states:
//! - Cleared: No count displayed, nothing in flight
//! - Pending: A count was submitted and its timer has not fired
//! - Ready: The count for the active query is available

use crate::model::SearchQuery;
use std::fmt;
use std::time::Instant;

// ===== RequestId =====

/// Token identifying one submitted deferred count.
///
/// Allocated in increasing order; only the most recent request can complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub(crate) const FIRST: Self = Self(1);

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw token value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ===== CountState =====

/// Deferred count state machine.
/// Sum type enforces exactly one state at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CountState {
    /// No count shown.
    #[default]
    Cleared,
    /// Waiting for the timer of `request` to fire.
    Pending {
        /// Token the firing timer must carry.
        request: RequestId,
        /// Query captured at submit time.
        query: SearchQuery,
        /// When the timer fires.
        due: Instant,
    },
    /// Count computed for `query`.
    Ready {
        /// Request that produced the count.
        request: RequestId,
        /// Query the count was computed for.
        query: SearchQuery,
        /// Number of matching entries.
        count: usize,
    },
}

impl CountState {
    /// The request whose completion is still wanted, if any.
    pub fn active_request(&self) -> Option<RequestId> {
        match self {
            CountState::Pending { request, .. } => Some(*request),
            CountState::Cleared | CountState::Ready { .. } => None,
        }
    }

    /// True while a count is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, CountState::Pending { .. })
    }

    /// The ready count, if any.
    pub fn count(&self) -> Option<usize> {
        match self {
            CountState::Ready { count, .. } => Some(*count),
            CountState::Cleared | CountState::Pending { .. } => None,
        }
    }
}

// ===== CountMessage =====

/// Display text for a ready count, e.g. "2 verses found!".
///
/// Plural only for counts above one, so zero reads "0 verse found!".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountMessage(pub usize);

impl fmt::Display for CountMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.0 > 1 { "s" } else { "" };
        write!(f, "{} verse{} found!", self.0, suffix)
    }
}
