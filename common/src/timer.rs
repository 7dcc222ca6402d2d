//! One-shot deadline helper for scroll ticks and timeouts.
//!
//! A [`SimpleTimer`] pairs a start timestamp with a duration. Expiry is
//! checked on demand via [`SimpleTimer::is_timeout`], there is no
//! background ticking: callers poll from their own scheduling cadence,
//! so the timer only has to be calibrated in the same time unit the
//! caller uses. `restart` rearms with the previously configured duration,
//! which is what periodic users (text scrolling, lamp blinking) call on
//! every expiry.

use std::time::{Duration, Instant};

/// Polled one-shot timer.
#[derive(Clone, Debug, Default)]
pub struct SimpleTimer {
    started_at: Option<Instant>,
    duration: Duration,
}

impl SimpleTimer {
    /// Create a stopped timer.
    pub const fn new() -> Self {
        Self {
            started_at: None,
            duration: Duration::ZERO,
        }
    }

    /// Arm the timer for the given duration from now.
    ///
    /// A zero duration means "already expired".
    pub fn start(&mut self, duration: Duration) {
        self.duration = duration;
        self.started_at = Some(Instant::now());
    }

    /// Rearm with the previously configured duration from now.
    pub fn restart(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Disarm the timer; [`SimpleTimer::is_timeout`] reports false while
    /// disarmed.
    pub fn stop(&mut self) {
        self.started_at = None;
    }

    /// Whether the timer is armed (between `start`/`restart` and `stop`).
    pub const fn is_timer_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Whether the armed duration has elapsed.
    pub fn is_timeout(&self) -> bool {
        self.started_at
            .is_some_and(|started| started.elapsed() >= self.duration)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_stopped() {
        let timer = SimpleTimer::new();
        assert!(!timer.is_timer_running());
        assert!(!timer.is_timeout());
    }

    #[test]
    fn test_zero_duration_expires_immediately() {
        let mut timer = SimpleTimer::new();
        timer.start(Duration::ZERO);
        assert!(timer.is_timer_running());
        assert!(timer.is_timeout());
        // Checking the timeout does not disarm it.
        assert!(timer.is_timer_running());
    }

    #[test]
    fn test_stop_disarms() {
        let mut timer = SimpleTimer::new();
        timer.start(Duration::ZERO);
        timer.stop();
        assert!(!timer.is_timer_running());
        assert!(!timer.is_timeout(), "Stopped timer must not report timeout");
    }

    #[test]
    fn test_restart_uses_previous_duration() {
        let mut timer = SimpleTimer::new();
        timer.start(Duration::ZERO);
        timer.stop();

        timer.restart();
        assert!(timer.is_timer_running());
        assert!(timer.is_timeout(), "Restart must rearm with the stored duration");
    }

    #[test]
    fn test_start_replaces_duration() {
        let mut timer = SimpleTimer::new();
        timer.start(Duration::ZERO);
        assert!(timer.is_timeout());

        // A long rearm is clearly not expired right away.
        timer.start(Duration::from_secs(100));
        assert!(!timer.is_timeout());
        timer.stop();
    }
}
