//! Time sources for the frame driver. The loop samples its clock exactly once
//! per frame and hands that value to the engine.

use std::time::Instant;

pub trait Clock {
    /// Milliseconds since the clock's origin. Never decreases.
    fn now_ms(&mut self) -> f64;
}

/// Wall-clock time from a monotonic `Instant`.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Advances by a fixed step on every sample, starting at zero. Used for
/// headless runs and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepClock {
    next_ms: f64,
    step_ms: f64,
}

impl FixedStepClock {
    pub fn new(step_ms: f64) -> Self {
        Self {
            next_ms: 0.0,
            step_ms,
        }
    }

    /// Step matching a tick rate in Hz.
    pub fn for_tick_rate(tick_rate: u32) -> Self {
        Self::new(1000.0 / f64::from(tick_rate.max(1)))
    }
}

impl Clock for FixedStepClock {
    fn now_ms(&mut self) -> f64 {
        let now = self.next_ms;
        self.next_ms += self.step_ms;
        now
    }
}
