//! Coalescing bursts of change events into one trailing action.
//!
//! The name filter fires on every keystroke; reloading the recipe list on
//! each one would hammer the database. A [`Debouncer`] is a restartable
//! single-shot deadline: every event re-arms it, and it fires at most
//! once per quiescent period, after the configured delay has elapsed
//! since the last event.
//!
//! Time is passed in explicitly so the shell's event loop and the test
//! harness drive the same code path.

use std::time::{Duration, Instant};

/// Default settle delay for the name filter, matching the original
/// application's timer.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// A restartable single-shot deadline.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arms the deadline, or pushes it out if already armed.
    pub fn restart(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Disarms without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, if armed. The event loop uses this to pick a
    /// wake-up time instead of polling.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true when the deadline has passed, disarming it so the
    /// action runs exactly once per burst.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_quiescence() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        // A burst of keystrokes, 100ms apart.
        for i in 0..5 {
            let now = start + Duration::from_millis(i * 100);
            debouncer.restart(now);
            assert!(!debouncer.fire_if_due(now));
        }

        // 400ms after the last keystroke: still inside the window.
        assert!(!debouncer.fire_if_due(start + Duration::from_millis(800)));

        // The window elapses from the LAST change (400ms + 500ms = 900ms).
        assert!(debouncer.fire_if_due(start + Duration::from_millis(900)));

        // Exactly one fire per burst.
        assert!(!debouncer.fire_if_due(start + Duration::from_millis(1000)));
        assert!(!debouncer.is_armed());
    }

    #[test]
    fn test_cancel_disarms() {
        let now = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.restart(now);
        debouncer.cancel();
        assert!(!debouncer.fire_if_due(now + Duration::from_secs(10)));
    }

    #[test]
    fn test_unarmed_never_fires() {
        let mut debouncer = Debouncer::default();
        assert!(!debouncer.fire_if_due(Instant::now()));
    }
}
