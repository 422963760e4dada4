//! Single-subscriber event delegation.
//!
//! The engine notifies at most one observer. Hooks default to no-ops so an
//! observer only implements what it cares about.

use std::sync::mpsc::{self, Receiver, Sender};
use tracing::trace;

/// Receiver of search-box lifecycle events.
pub trait SearchObserver {
    /// The query text was replaced (every keystroke, and on reset).
    fn on_query_changed(&mut self, _query: &str) {}

    /// The search button was clicked with the current query.
    fn on_search_submitted(&mut self, _query: &str) {}

    /// A deferred count for the active query completed.
    fn on_count_ready(&mut self, _count: usize) {}
}

/// Owned form of one observer notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// See [`SearchObserver::on_query_changed`].
    QueryChanged(String),
    /// See [`SearchObserver::on_search_submitted`].
    SearchSubmitted(String),
    /// See [`SearchObserver::on_count_ready`].
    CountReady(usize),
}

/// Observer that forwards every hook as a [`SearchEvent`] over a channel.
///
/// A dropped receiver is not an error; events are then discarded.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: Sender<SearchEvent>,
}

impl ChannelObserver {
    /// Create an observer and the receiving end of its channel.
    pub fn new() -> (Self, Receiver<SearchEvent>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }

    fn send(&self, event: SearchEvent) {
        if let Err(mpsc::SendError(event)) = self.sender.send(event) {
            trace!(?event, "Observer channel closed, dropping event");
        }
    }
}

impl SearchObserver for ChannelObserver {
    fn on_query_changed(&mut self, query: &str) {
        self.send(SearchEvent::QueryChanged(query.to_string()));
    }

    fn on_search_submitted(&mut self, query: &str) {
        self.send(SearchEvent::SearchSubmitted(query.to_string()));
    }

    fn on_count_ready(&mut self, count: usize) {
        self.send(SearchEvent::CountReady(count));
    }
}
