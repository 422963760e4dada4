//! Timer queue standing in for the host event loop's delayed dispatch.
//!
//! Timers are never cancelled. Whoever drains the queue decides whether a
//! fired timer is still relevant.

use super::count::RequestId;
use std::time::Instant;

/// One scheduled count completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledCount {
    /// Request this timer completes.
    pub request: RequestId,
    /// When the timer fires.
    pub due: Instant,
}

/// Timers ordered by deadline. Equal deadlines keep scheduling order.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    timers: Vec<ScheduledCount>,
}

impl TimerQueue {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `timer`, keeping deadline order.
    pub fn schedule(&mut self, timer: ScheduledCount) {
        let at = self.timers.partition_point(|t| t.due <= timer.due);
        self.timers.insert(at, timer);
    }

    /// Remove and return every timer due at or before `now`, earliest first.
    pub fn pop_due(&mut self, now: Instant) -> Vec<ScheduledCount> {
        let split = self.timers.partition_point(|t| t.due <= now);
        self.timers.drain(..split).collect()
    }

    /// Deadline of the earliest timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.first().map(|t| t.due)
    }

    /// Number of scheduled timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// True if nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn timer(id: RequestId, due: Instant) -> ScheduledCount {
        ScheduledCount { request: id, due }
    }

    #[test]
    fn empty_queue_has_no_deadline() {
        let queue = TimerQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn pop_due_returns_only_expired_timers_in_deadline_order() {
        let base = Instant::now();
        let a = RequestId::FIRST;
        let b = a.next();
        let c = b.next();

        let mut queue = TimerQueue::new();
        queue.schedule(timer(c, base + Duration::from_millis(300)));
        queue.schedule(timer(a, base + Duration::from_millis(100)));
        queue.schedule(timer(b, base + Duration::from_millis(200)));

        assert_eq!(queue.next_deadline(), Some(base + Duration::from_millis(100)));

        let fired = queue.pop_due(base + Duration::from_millis(200));
        let ids: Vec<_> = fired.iter().map(|t| t.request).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_deadline(), Some(base + Duration::from_millis(300)));
    }

    #[test]
    fn equal_deadlines_fire_in_scheduling_order() {
        let due = Instant::now();
        let a = RequestId::FIRST;
        let b = a.next();

        let mut queue = TimerQueue::new();
        queue.schedule(timer(a, due));
        queue.schedule(timer(b, due));

        let ids: Vec<_> = queue.pop_due(due).iter().map(|t| t.request).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn pop_due_before_any_deadline_is_empty() {
        let base = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(timer(RequestId::FIRST, base + Duration::from_secs(1)));

        assert!(queue.pop_due(base).is_empty());
        assert_eq!(queue.len(), 1);
    }
}
