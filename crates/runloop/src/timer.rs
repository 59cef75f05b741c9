use geoprim::Time;

/// Single-slot cancelable delay timer.
///
/// Scheduling while a deadline is already pending replaces it, so at most one
/// deadline exists at any time (trailing-debounce discipline). Firing is
/// explicit: the owner polls with the current time and the deadline is
/// consumed at most once.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct DelayTimer {
    deadline: Option<Time>,
}

impl DelayTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules the deadline `delay_s` seconds after `now`, replacing any
    /// pending deadline.
    pub fn schedule(&mut self, now: Time, delay_s: f64) {
        self.deadline = Some(now.offset(delay_s));
    }

    /// Clears the pending deadline.
    ///
    /// Returns `true` if a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Time> {
        self.deadline
    }

    /// Consumes the deadline if it has been reached.
    ///
    /// Returns `true` at most once per scheduled deadline.
    pub fn fire_if_due(&mut self, now: Time) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
