//! Time source for the pulsing render effects.
//!
//! Animations are pure functions of the clock reading, never of the previous
//! frame, so pausing and resuming needs no saved phase.

use std::time::{Duration, Instant};

pub trait AnimationClock {
    /// Monotonic time elapsed since the clock started
    fn now(&self) -> Duration;
}

pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            started: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        SystemClock::new()
    }
}

impl AnimationClock for SystemClock {
    fn now(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Always reads the same instant; for tests and offline rendering
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock(pub Duration);

impl AnimationClock for FixedClock {
    fn now(&self) -> Duration {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(Duration::from_millis(42));
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().as_millis(), 42);
    }
}
