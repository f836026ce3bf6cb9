//! Fixed-step clock: turns wall-clock frame time into whole ticks.

use crate::core::constants::TICKS_PER_SECOND;
use std::time::Duration;

/// Accumulates elapsed time and hands out a whole number of ticks, carrying
/// the fractional remainder into the next frame.
#[derive(Debug, Clone)]
pub struct FixedStep {
    nanos_per_tick: f64,
    delta: f64,
    total_ticks: u64,
}

impl FixedStep {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            nanos_per_tick: 1_000_000_000.0 / ticks_per_second.max(1) as f64,
            delta: 0.0,
            total_ticks: 0,
        }
    }

    /// Adds `elapsed` and returns how many ticks are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.delta += elapsed.as_nanos() as f64 / self.nanos_per_tick;
        let mut ticks = 0;
        while self.delta >= 1.0 {
            self.delta -= 1.0;
            ticks += 1;
        }
        self.total_ticks += ticks as u64;
        ticks
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(TICKS_PER_SECOND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_second_is_sixty_ticks() {
        let mut step = FixedStep::default();
        assert_eq!(step.advance(Duration::from_secs(1)), 60);
        assert_eq!(step.total_ticks(), 60);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut step = FixedStep::new(60);
        // 10ms is 0.6 ticks
        assert_eq!(step.advance(Duration::from_millis(10)), 0);
        assert_eq!(step.advance(Duration::from_millis(10)), 1);
        assert_eq!(step.advance(Duration::from_millis(10)), 0);
        assert_eq!(step.advance(Duration::from_millis(10)), 1);
        assert_eq!(step.total_ticks(), 2);
    }

    #[test]
    fn test_zero_elapsed() {
        let mut step = FixedStep::default();
        assert_eq!(step.advance(Duration::ZERO), 0);
    }
}
