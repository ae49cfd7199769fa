//! Inactivity tracking for the floating scroll affordance.
//!
//! The monitor owns a single-shot deadline rather than a real timer. The
//! rendering loop calls [`IdleMonitor::poll`] on every tick; the deadline is
//! checked against the monitor's current state at that moment, so a stale
//! timer can never flip a flag that has since been dismissed.

use std::time::{Duration, Instant};

/// Tracks how long the user has been inactive and exposes the
/// "show affordance" flag.
#[derive(Debug, Clone)]
pub struct IdleMonitor {
    timeout: Duration,
    visible: bool,
    /// Pending single-shot deadline. At most one exists at any time.
    deadline: Option<Instant>,
    torn_down: bool,
}

impl IdleMonitor {
    /// Create a monitor that is armed immediately, as happens at load.
    pub fn start(timeout: Duration, now: Instant) -> Self {
        Self {
            timeout,
            visible: false,
            deadline: Some(now + timeout),
            torn_down: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The instant at which the pending timer fires, if one is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Record an activity signal (pointer movement, key press, click, scroll).
    ///
    /// Restarts the timer while the affordance is hidden. Once shown, activity
    /// is ignored until the affordance is dismissed. Returns whether the timer
    /// was rescheduled.
    pub fn report_activity(&mut self, now: Instant) -> bool {
        if self.torn_down || self.visible {
            return false;
        }
        // Replacing the deadline cancels the previous one.
        self.deadline = Some(now + self.timeout);
        true
    }

    /// Fire the timer if its deadline has passed. Returns `true` only on the
    /// call that made the affordance visible.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if self.torn_down || self.visible {
                    return false;
                }
                self.visible = true;
                tracing::debug!(timeout_ms = self.timeout.as_millis() as u64, "idle: affordance shown");
                true
            }
            _ => false,
        }
    }

    /// Hide the affordance and restart monitoring.
    pub fn dismiss(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }
        self.visible = false;
        self.deadline = Some(now + self.timeout);
        tracing::debug!("idle: affordance dismissed");
    }

    /// Cancel the pending timer. A torn-down monitor never fires again.
    pub fn teardown(&mut self) {
        self.deadline = None;
        self.torn_down = true;
    }
}
