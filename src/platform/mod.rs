//! Platform abstraction layer
//!
//! Host-independent frame pacing. Browsers hand us `requestAnimationFrame`
//! timestamps, the native demo a synthetic clock; both go through
//! `FrameClock` so the simulation always advances in whole frames.

use crate::tuning::GameConfig;

/// Longest host frame we are willing to catch up on, in milliseconds
const MAX_FRAME_MS: f64 = 100.0;

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FrameClock {
    step_ms: f64,
    max_substeps: u32,
    accumulator_ms: f64,
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            step_ms: 1000.0 / config.frame_rate as f64,
            max_substeps: config.max_substeps,
            accumulator_ms: 0.0,
            last_ms: None,
        }
    }

    /// Milliseconds per simulation frame
    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    /// Number of simulation frames owed at host time `now_ms`
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            // First frame runs exactly one step
            None => self.step_ms,
        };
        self.last_ms = Some(now_ms);
        self.accumulator_ms += dt;

        let mut substeps = 0;
        while self.accumulator_ms >= self.step_ms && substeps < self.max_substeps {
            self.accumulator_ms -= self.step_ms;
            substeps += 1;
        }
        // Drop whatever backlog the substep cap could not absorb
        if substeps == self.max_substeps {
            self.accumulator_ms = self.accumulator_ms.min(self.step_ms);
        }
        substeps
    }

    /// Forget the last timestamp (e.g. after the tab was hidden)
    pub fn resync(&mut self) {
        self.last_ms = None;
        self.accumulator_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixty_hz_host_runs_one_step_per_frame() {
        let mut clock = FrameClock::new(&GameConfig::default());
        let step = clock.step_ms();
        assert_eq!(clock.advance(0.0), 1);
        // Sample mid-frame so rounding never lands exactly on a step boundary
        let total: u32 = (1..=60)
            .map(|i| clock.advance(i as f64 * step + step / 2.0))
            .sum();
        assert_eq!(total, 60);
    }

    #[test]
    fn test_fast_host_skips_frames() {
        let mut clock = FrameClock::new(&GameConfig::default());
        clock.advance(0.0);
        // 120 Hz display: roughly every other host frame steps
        let total: u32 = (1..=120).map(|i| clock.advance(i as f64 * 1000.0 / 120.0)).sum();
        assert!((59..=61).contains(&total));
    }

    #[test]
    fn test_long_stall_is_capped() {
        let config = GameConfig::default();
        let mut clock = FrameClock::new(&config);
        clock.advance(0.0);
        assert_eq!(clock.advance(5_000.0), config.max_substeps);
        // Backlog dropped: the next regular frame is not a burst
        assert!(clock.advance(5_000.0 + clock.step_ms()) <= 2);
    }

    #[test]
    fn test_time_going_backwards_is_ignored() {
        let mut clock = FrameClock::new(&GameConfig::default());
        clock.advance(1_000.0);
        assert_eq!(clock.advance(900.0), 0);
    }
}
