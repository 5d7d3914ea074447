//! Cancellable one-shot deadline.
//!
//! Time is host monotonic time expressed as a [`Duration`] since an arbitrary
//! origin (`performance.now()` in browsers). The timer never fires on its own;
//! the owner polls it from its update loop.

use std::time::Duration;

/// One-shot timer with at most one pending deadline.
#[derive(Debug, Default, Clone)]
pub struct HideTimer {
    deadline: Option<Duration>,
}

impl HideTimer {
    /// Creates an idle timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer `delay` after `now`, replacing any pending deadline.
    pub fn arm(&mut self, now: Duration, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Cancels the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true if a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once, on the first poll at or past the deadline.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
