use std::time::Duration;

use tokio::time::Instant;

/// Trailing-edge debouncer: pure timing, no business logic.
///
/// Every [`arm`](Self::arm) moves the deadline to `now + quiet_period`, so
/// the deadline is always measured from the latest qualifying event.
#[derive(Debug)]
pub(super) struct Debouncer {
    quiet_period: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub(super) fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
        }
    }

    /// Start or restart the quiet period.
    pub(super) fn arm(&mut self) {
        self.deadline = Some(Instant::now() + self.quiet_period);
    }

    pub(super) fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Pending deadline, if armed.
    pub(super) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Disarm if the deadline has passed. Returns whether it fired.
    pub(super) fn take_if_ready(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
