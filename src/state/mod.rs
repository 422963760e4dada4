//! Search state (pure, single-threaded).
//!
//! The engine, its deferred count state machine, the timer queue standing
//! in for the host event loop, and the observer hooks.

pub mod count;
pub mod engine;
pub mod observer;
pub mod timer;

// Re-export for convenience
pub use count::{CountMessage, CountState, RequestId};
pub use engine::{SearchFilterEngine, DEFAULT_COUNT_DELAY};
pub use observer::{ChannelObserver, SearchEvent, SearchObserver};
pub use timer::{ScheduledCount, TimerQueue};
