//! Fixed-interval tick scheduling
//!
//! Converts elapsed wall time into a whole number of due ticks, carrying the
//! remainder to the next call.

use crate::consts::MAX_CATCH_UP_TICKS;

#[derive(Debug, Clone)]
pub struct FixedTicker {
    interval_ms: f64,
    accumulator: f64,
    max_catch_up: u32,
}

impl FixedTicker {
    /// `interval_ms` of 0 is treated as 1
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1) as f64,
            accumulator: 0.0,
            max_catch_up: MAX_CATCH_UP_TICKS,
        }
    }

    pub fn with_max_catch_up(mut self, max: u32) -> Self {
        self.max_catch_up = max.max(1);
        self
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Add elapsed time and return how many ticks are due
    ///
    /// At most `max_catch_up` ticks are returned; any further backlog is
    /// dropped so a long stall doesn't trigger a burst of catch-up ticks.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return 0;
        }
        self.accumulator += elapsed_ms;

        let mut due = 0;
        while self.accumulator >= self.interval_ms && due < self.max_catch_up {
            self.accumulator -= self.interval_ms;
            due += 1;
        }

        if self.accumulator >= self.interval_ms {
            let dropped = (self.accumulator / self.interval_ms).floor();
            log::debug!("Dropping {} overdue ticks", dropped);
            self.accumulator %= self.interval_ms;
        }

        due
    }

    /// Forget any partial interval (e.g. after a restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carries_remainder() {
        let mut ticker = FixedTicker::new(10);
        assert_eq!(ticker.advance(25.0), 2);
        assert_eq!(ticker.advance(4.0), 0);
        assert_eq!(ticker.advance(1.0), 1);
        assert_eq!(ticker.advance(9.0), 0);
    }

    #[test]
    fn test_caps_catch_up() {
        let mut ticker = FixedTicker::new(10);
        assert_eq!(ticker.advance(1000.0), MAX_CATCH_UP_TICKS);
        // Backlog dropped
        assert_eq!(ticker.advance(0.5), 0);

        let mut ticker = FixedTicker::new(10).with_max_catch_up(2);
        assert_eq!(ticker.advance(55.0), 2);
        assert_eq!(ticker.advance(5.0), 1);
    }

    #[test]
    fn test_ignores_bad_elapsed() {
        let mut ticker = FixedTicker::new(10);
        assert_eq!(ticker.advance(-5.0), 0);
        assert_eq!(ticker.advance(f64::NAN), 0);
        assert_eq!(ticker.advance(10.0), 1);
    }

    #[test]
    fn test_reset_and_zero_interval() {
        let mut ticker = FixedTicker::new(0);
        assert_eq!(ticker.interval_ms(), 1.0);
        ticker.advance(0.5);
        ticker.reset();
        assert_eq!(ticker.advance(0.5), 0);
    }
}
