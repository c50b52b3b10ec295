//! Detector for the hidden-login gesture: two quick clicks on the
//! landing logo.

use std::time::{Duration, Instant};

/// Rolling window within which consecutive clicks count toward the
/// gesture.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

/// Counter plus a single pending reset deadline. The deadline stands in
/// for the cancellable reset timer: every click replaces it, so it never
/// stacks. Reaching exactly 2 fires once and resets immediately, which
/// keeps a third rapid click from re-firing.
#[derive(Debug, Default)]
pub struct ClickGesture {
    count: u32,
    reset_at: Option<Instant>,
}

impl ClickGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one click at `now`; returns true when the reveal signal
    /// fires.
    pub fn click(&mut self, now: Instant) -> bool {
        if let Some(reset_at) = self.reset_at {
            if now >= reset_at {
                self.count = 0;
            }
        }
        self.count += 1;
        self.reset_at = Some(now + DOUBLE_CLICK_WINDOW);

        if self.count == 2 {
            self.count = 0;
            self.reset_at = None;
            true
        } else {
            false
        }
    }
}
