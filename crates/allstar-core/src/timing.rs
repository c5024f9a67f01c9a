//! Fixed-step accumulation and elapsed-time countdowns.

use std::time::Duration;

/// Converts variable frame deltas into a whole number of fixed steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStep {
    step: Duration,
    accumulator: Duration,
}

impl FixedStep {
    const MIN_STEP: Duration = Duration::from_millis(1);

    /// Creates an accumulator for steps of `step` (at least 1 ms).
    #[must_use]
    pub fn new(step: Duration) -> Self {
        Self {
            step: step.max(Self::MIN_STEP),
            accumulator: Duration::ZERO,
        }
    }

    /// The fixed step length.
    #[must_use]
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Adds `delta` and returns how many whole steps are now due.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        self.accumulator += delta;
        let mut due = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            due += 1;
        }
        due
    }
}

/// Completes after a fixed amount of simulated time has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: Duration,
}

impl Countdown {
    /// Starts a countdown of `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            remaining: duration,
        }
    }

    /// Consumes `delta` and returns whether the countdown has elapsed.
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(delta);
        self.is_elapsed()
    }

    /// Whether no time remains.
    #[must_use]
    pub fn is_elapsed(&self) -> bool {
        self.remaining.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_step_carries_remainder() {
        let mut step = FixedStep::new(Duration::from_millis(16));

        assert_eq!(step.advance(Duration::from_millis(10)), 0);
        assert_eq!(step.advance(Duration::from_millis(10)), 1);
        assert_eq!(step.advance(Duration::from_millis(28)), 2);
    }

    #[test]
    fn test_fixed_step_clamps_zero_step() {
        let mut step = FixedStep::new(Duration::ZERO);
        assert_eq!(step.step(), Duration::from_millis(1));
        assert_eq!(step.advance(Duration::from_millis(3)), 3);
    }

    #[test]
    fn test_countdown_elapses_after_duration() {
        let mut countdown = Countdown::new(Duration::from_millis(1000));

        assert!(!countdown.advance(Duration::from_millis(600)));
        assert!(countdown.advance(Duration::from_millis(600)));
        assert!(countdown.is_elapsed());
    }

    #[test]
    fn test_zero_countdown_is_already_elapsed() {
        assert!(Countdown::new(Duration::ZERO).is_elapsed());
    }
}
