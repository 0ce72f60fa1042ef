//! Motion law of the ground target (the flag).
//!
//! The target has no mutable state: its position is a function of time since
//! the session origin, wrapped across the screen.

use glam::DVec2;

use bomber_core::config::SimConfig;

/// Periodic horizontal motion along the ground line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetMotion {
    /// px/ms, positive moves left.
    pub speed: f64,
    /// Wrap period in px.
    pub period: f64,
    pub ground_y: f64,
    /// Session time origin (ms).
    pub origin_ms: f64,
}

impl TargetMotion {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            speed: config.target_speed,
            period: config.target_period(),
            ground_y: config.ground_y(),
            origin_ms: 0.0,
        }
    }

    /// Horizontal position at `now_ms`, in `[0, period)`.
    pub fn x_at(&self, now_ms: f64) -> f64 {
        (-(now_ms - self.origin_ms) * self.speed).rem_euclid(self.period)
    }

    pub fn position_at(&self, now_ms: f64) -> DVec2 {
        DVec2::new(self.x_at(now_ms), self.ground_y)
    }

    /// Next time strictly after `now_ms` at which the target is at `x`.
    ///
    /// `None` when the target does not move.
    pub fn next_arrival_ms(&self, now_ms: f64, x: f64) -> Option<f64> {
        if self.speed == 0.0 || !self.speed.is_finite() {
            return None;
        }
        let current = self.x_at(now_ms);
        let mut distance = if self.speed > 0.0 {
            (current - x).rem_euclid(self.period)
        } else {
            (x - current).rem_euclid(self.period)
        };
        if distance <= 0.0 {
            distance = self.period;
        }
        Some(now_ms + distance / self.speed.abs())
    }
}
