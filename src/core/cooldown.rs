//! Cooldown Timers
//!
//! Polled countdown primitive shared by movement throttling, animation
//! pacing, key debouncing and text display timing.
//!
//! Cooldowns never read the wall clock themselves. The caller passes the
//! current monotonic time in milliseconds, usually taken once per frame
//! from a [`Clock`]. This keeps the simulation replayable.

use std::cell::Cell;
use std::time::Instant;
use serde::{Serialize, Deserialize};

/// Milliseconds on a monotonic timeline.
pub type Millis = u64;

/// Source of monotonic time for the frame loop.
pub trait Clock {
    /// Current time in milliseconds since the clock's origin.
    fn now_ms(&self) -> Millis;
}

/// Real monotonic clock backed by [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is "now".
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Clock that only moves when told to. Used for tests, replay and the demo.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    /// Create a clock starting at `start_ms`.
    pub fn new(start_ms: Millis) -> Self {
        Self { now: Cell::new(start_ms) }
    }

    /// Move time forward.
    pub fn advance(&self, ms: Millis) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Jump to an absolute time. Going backwards is ignored.
    pub fn set(&self, ms: Millis) {
        if ms >= self.now.get() {
            self.now.set(ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

/// A resettable countdown.
///
/// Elapsed once at least `duration_ms` has passed since the last start/reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    duration_ms: Millis,
    started_at: Millis,
}

impl Cooldown {
    /// Start a cooldown at `now`.
    pub const fn new(duration_ms: Millis, now: Millis) -> Self {
        Self { duration_ms, started_at: now }
    }

    /// Has the full duration passed? No side effects.
    #[inline]
    pub fn elapsed(&self, now: Millis) -> bool {
        now.saturating_sub(self.started_at) >= self.duration_ms
    }

    /// Re-base the start time to `now`.
    #[inline]
    pub fn reset(&mut self, now: Millis) {
        self.started_at = now;
    }

    /// Milliseconds left before the cooldown elapses (0 once elapsed).
    pub fn remaining(&self, now: Millis) -> Millis {
        self.duration_ms
            .saturating_sub(now.saturating_sub(self.started_at))
    }

    /// Configured duration.
    pub fn duration_ms(&self) -> Millis {
        self.duration_ms
    }

    /// Change the duration without touching the start time.
    pub fn set_duration(&mut self, duration_ms: Millis) {
        self.duration_ms = duration_ms;
    }

    /// Elapsed check that resets on success. Returns true when it fired.
    pub fn try_fire(&mut self, now: Millis) -> bool {
        if self.elapsed(now) {
            self.reset(now);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_not_elapsed_on_creation() {
        let cd = Cooldown::new(20, 1000);
        assert!(!cd.elapsed(1000));
        assert!(!cd.elapsed(1019));
        assert!(cd.elapsed(1020));
        assert!(cd.elapsed(5000));
    }

    #[test]
    fn test_cooldown_reset_rebases() {
        let mut cd = Cooldown::new(75, 0);
        assert!(cd.elapsed(80));
        cd.reset(80);
        assert!(!cd.elapsed(100));
        assert_eq!(cd.remaining(100), 55);
        assert!(cd.elapsed(155));
        assert_eq!(cd.remaining(200), 0);
    }

    #[test]
    fn test_cooldown_elapsed_has_no_side_effect() {
        let cd = Cooldown::new(10, 0);
        for _ in 0..5 {
            assert!(cd.elapsed(10));
        }
        assert_eq!(cd, Cooldown::new(10, 0));
    }

    #[test]
    fn test_try_fire() {
        let mut cd = Cooldown::new(10, 0);
        assert!(!cd.try_fire(5));
        assert!(cd.try_fire(10));
        assert!(!cd.try_fire(15));
        assert!(cd.try_fire(20));
    }

    #[test]
    fn test_set_duration_keeps_start() {
        let mut cd = Cooldown::new(100, 0);
        cd.set_duration(20);

        assert_eq!(cd.duration_ms(), 20);
        assert!(!cd.elapsed(19));
        assert!(cd.elapsed(20));
    }

    #[test]
    fn test_time_before_start_is_not_elapsed() {
        // A clock reading earlier than the start saturates to zero elapsed.
        let cd = Cooldown::new(10, 100);
        assert!(!cd.elapsed(50));
        assert_eq!(cd.remaining(50), 10);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(10);
        assert_eq!(clock.now_ms(), 10);
        clock.advance(16);
        assert_eq!(clock.now_ms(), 26);
        clock.set(5);
        assert_eq!(clock.now_ms(), 26);
        clock.set(100);
        assert_eq!(clock.now_ms(), 100);
    }

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
