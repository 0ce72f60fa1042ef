//! Fundamental identifier and simulation-time types.
//!
//! Positions are `glam::DVec2` in screen pixels: x grows to the right,
//! y grows downward, so the ground line has the largest y on screen.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a projectile. Never reused within a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectileId(pub u32);

/// Stable identifier of an effect. Never reused within a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectId(pub u32);

impl fmt::Display for ProjectileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "projectile#{}", self.0)
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "effect#{}", self.0)
    }
}

/// Simulation time tracking.
///
/// Time is supplied from outside on every tick; the engine never reads a clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of completed ticks.
    pub tick: u64,
    /// Time of the current tick in milliseconds since the session origin.
    pub now_ms: f64,
}

impl SimTime {
    /// Advance to the next tick at `now_ms`.
    ///
    /// Time never moves backwards: an earlier (or non-finite) value keeps the
    /// previous time. Returns the time actually used for the tick.
    pub fn advance_to(&mut self, now_ms: f64) -> f64 {
        let first = self.tick == 0;
        self.tick += 1;
        if now_ms.is_finite() && (first || now_ms > self.now_ms) {
            self.now_ms = now_ms;
        }
        self.now_ms
    }
}
