//! Last-write-wins coalescing with a quiescence window.
//!
//! A [`Coalescer`] holds at most one pending value; each `set` replaces
//! the previous value and restarts the window. The value becomes due
//! once the window elapses without another write. Timing is explicit:
//! callers pass `Instant`s in and poll for due values, so there is no
//! internal timer thread and tests control the clock.

use std::time::{Duration, Instant};

/// Commit window for rich-text edits. Long enough to ride out a typing
/// burst.
pub const RICH_TEXT_COMMIT_WINDOW: Duration = Duration::from_millis(900);

/// Settle window for hover-target changes, so sweeping the pointer
/// across the page does not thrash the highlighted node.
pub const HOVER_TOGGLE_WINDOW: Duration = Duration::from_millis(500);

/// Single-slot debouncer: last write wins, due after `window` of quiet.
#[derive(Debug, Clone)]
pub struct Coalescer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Coalescer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Replace any pending value and restart the window from now.
    pub fn set(&mut self, value: T) {
        self.set_at(value, Instant::now());
    }

    /// Replace any pending value and restart the window from `now`.
    pub fn set_at(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Take the pending value if its window has elapsed by `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, written)) if now.saturating_duration_since(*written) >= self.window => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Take the pending value immediately, window or not. Used when the
    /// caller needs everything committed (shutdown, explicit save).
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop the pending value without delivering it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
