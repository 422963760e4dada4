//! Search filter engine.
//!
//! Owns the corpus and the current query, answers the instant filter and
//! drives the submit-triggered deferred count.
//!
//! The deferred count is not run on another thread. `submit_search` only
//! schedules a timer; the host event loop calls [`SearchFilterEngine::poll`]
//! and the count is computed when its timer fires. A fired timer whose
//! request is no longer the active one is discarded.

use super::count::{CountMessage, CountState, RequestId};
use super::observer::SearchObserver;
use super::timer::{ScheduledCount, TimerQueue};
use crate::model::{Corpus, SearchQuery, SearchTerms};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Delay before a submitted count completes, mocking a slow backend.
pub const DEFAULT_COUNT_DELAY: Duration = Duration::from_secs(1);

/// Search engine over a fixed corpus with a single observer.
pub struct SearchFilterEngine {
    corpus: Corpus,
    query: String,
    count_state: CountState,
    timers: TimerQueue,
    next_request: RequestId,
    delay: Duration,
    observer: Option<Box<dyn SearchObserver>>,
}

/// Create operations.
impl SearchFilterEngine {
    /// Creates an engine with an empty query and the default delay.
    pub fn new(corpus: Corpus) -> Self {
        Self {
            corpus,
            query: String::new(),
            count_state: CountState::Cleared,
            timers: TimerQueue::new(),
            next_request: RequestId::FIRST,
            delay: DEFAULT_COUNT_DELAY,
            observer: None,
        }
    }

    /// Sets the deferred count delay. Zero makes counts due immediately.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Observer registration.
impl SearchFilterEngine {
    /// Registers `observer`, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl SearchObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Unregisters and returns the current observer.
    pub fn take_observer(&mut self) -> Option<Box<dyn SearchObserver>> {
        self.observer.take()
    }

    /// True if an observer is registered.
    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }
}

/// Query operations.
impl SearchFilterEngine {
    /// Replaces the query.
    ///
    /// Notifies `on_query_changed` and clears any pending or ready count, so
    /// a timer still in flight for the previous query can no longer deliver.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        debug!(query = %self.query, "Query changed");

        if let Some(observer) = self.observer.as_mut() {
            observer.on_query_changed(&self.query);
        }
        self.clear_count();
    }

    /// Clears the query and any count.
    pub fn reset(&mut self) {
        self.set_query(String::new());
    }

    /// Entries matching the current query, in corpus order.
    ///
    /// An empty or whitespace-only query returns the whole corpus.
    pub fn instant_filter(&self) -> Vec<&str> {
        self.corpus.filter(&self.terms())
    }

    /// Submits the current query using the real clock.
    pub fn submit_search(&mut self) {
        self.submit_search_at(Instant::now());
    }

    /// Submits the current query as if the button were clicked at `now`.
    ///
    /// Notifies `on_search_submitted`. A non-empty query schedules a count
    /// due at `now + delay` and supersedes any earlier request. An empty
    /// query schedules nothing and clears the count immediately.
    ///
    /// `on_search_submitted` also marks any count already shown as stale: a
    /// ready count goes back to pending and [`Self::count`] returns `None`
    /// until the new completion arrives through `on_count_ready`.
    pub fn submit_search_at(&mut self, now: Instant) {
        debug!(query = %self.query, "Search submitted");
        if let Some(observer) = self.observer.as_mut() {
            observer.on_search_submitted(&self.query);
        }

        let Some(query) = SearchQuery::new(self.query.clone()) else {
            debug!("Blank query, no count scheduled");
            self.clear_count();
            return;
        };

        let request = self.next_request;
        self.next_request = request.next();
        let due = now + self.delay;

        self.timers.schedule(ScheduledCount { request, due });
        debug!(%request, delay = ?self.delay, "Count scheduled");
        self.count_state = CountState::Pending {
            request,
            query,
            due,
        };
    }

    fn terms(&self) -> SearchTerms {
        SearchTerms::parse(&self.query)
    }

    fn clear_count(&mut self) {
        if let Some(request) = self.count_state.active_request() {
            debug!(%request, "Pending count invalidated");
        }
        self.count_state = CountState::Cleared;
    }
}

/// Event loop operations.
impl SearchFilterEngine {
    /// Fires all timers due by the real clock.
    ///
    /// Returns the number of counts delivered to the observer.
    pub fn poll(&mut self) -> usize {
        self.poll_at(Instant::now())
    }

    /// Fires all timers due at or before `now`.
    ///
    /// Returns the number of counts delivered; stale completions are not
    /// counted.
    pub fn poll_at(&mut self, now: Instant) -> usize {
        let mut delivered = 0;
        for timer in self.timers.pop_due(now) {
            if self.complete(timer.request) {
                delivered += 1;
            }
        }
        delivered
    }

    /// Earliest scheduled timer, stale or not.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Whether any timer is still scheduled.
    pub fn has_scheduled(&self) -> bool {
        !self.timers.is_empty()
    }

    fn complete(&mut self, request: RequestId) -> bool {
        let query = match &self.count_state {
            CountState::Pending {
                request: active,
                query,
                ..
            } if *active == request => query.clone(),
            _ => {
                debug!(%request, "Discarding stale count completion");
                return false;
            }
        };

        let count = self.corpus.count(&query.terms());
        info!(%request, query = %query, count, "Deferred count ready");

        self.count_state = CountState::Ready {
            request,
            query,
            count,
        };
        if let Some(observer) = self.observer.as_mut() {
            observer.on_count_ready(count);
        }
        true
    }
}

/// Accessors.
impl SearchFilterEngine {
    /// The searched corpus.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The current raw query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Delay applied to each submitted count.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Current deferred count state.
    pub fn count_state(&self) -> &CountState {
        &self.count_state
    }

    /// The ready count for the current query, if any.
    pub fn count(&self) -> Option<usize> {
        self.count_state.count()
    }

    /// The ready count as display text, e.g. "2 verses found!".
    pub fn count_message(&self) -> Option<CountMessage> {
        self.count().map(CountMessage)
    }
}

impl Default for SearchFilterEngine {
    fn default() -> Self {
        Self::new(Corpus::default())
    }
}

impl fmt::Debug for SearchFilterEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchFilterEngine")
            .field("corpus_len", &self.corpus.len())
            .field("query", &self.query)
            .field("count_state", &self.count_state)
            .field("scheduled", &self.timers.len())
            .field("delay", &self.delay)
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
