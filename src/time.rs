//! Frame timing
//!
//! `FrameClock` stamps each orchestrator tick; `FixedStep` paces a driver loop
//! against wall-clock time with a bounded number of catch-up ticks.

use std::time::{Duration, Instant};

/// Timing snapshot handed to every callback of a tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the previous tick (clamped)
    pub dt: f32,
    /// Monotonic tick counter, starting at 0
    pub frame_index: u64,
}

/// Per-orchestrator tick clock
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: None,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Number of ticks produced so far
    pub fn frames(&self) -> u64 {
        self.frame_index
    }

    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        // First tick has no predecessor; report the nominal display step
        let dt = match self.last {
            Some(last) => now
                .saturating_duration_since(last)
                .clamp(self.dt_min, self.dt_max)
                .as_secs_f32(),
            None => crate::consts::SIM_DT,
        };
        self.last = Some(now);

        let frame = FrameTime {
            dt,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        frame
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// Feed elapsed seconds; returns how many ticks to run now
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        // Large gaps (tab switch, debugger) are not replayed
        self.accumulator += elapsed.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_clock_counts() {
        let mut clock = FrameClock::new();
        let first = clock.tick();
        let second = clock.tick();
        assert_eq!(first.frame_index, 0);
        assert_eq!(second.frame_index, 1);
        assert_eq!(first.dt, crate::consts::SIM_DT);
        assert!(second.dt >= 0.0001 && second.dt <= 0.25);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn test_fixed_step() {
        let mut step = FixedStep::new(0.01, 4);
        assert_eq!(step.advance(0.025), 2);
        // 0.005 carried over
        assert_eq!(step.advance(0.006), 1);
        // Capped at max substeps
        assert_eq!(step.advance(0.1), 4);
    }
}
