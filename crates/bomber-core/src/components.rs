//! Entity components.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in the sim crate, not here.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::ReleaseKind;
use crate::types::{EffectId, ProjectileId};

/// The player's plane. Exists for the whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Vertical screen position (px), kept within the configured bounds.
    pub altitude: f64,
    pub previous_altitude: f64,
    /// Vertical velocity (px/ms), positive when descending on screen.
    pub velocity: f64,
    pub previous_velocity: f64,
    /// Vertical acceleration (px/ms²).
    pub acceleration: f64,
    /// Time of the tick that last updated the derivatives.
    pub last_sample_ms: f64,
}

/// A falling bomb.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub release_position: DVec2,
    pub release_time_ms: f64,
    /// Constant vertical acceleration (px/ms²).
    pub vertical_acceleration: f64,
    /// Recomputed every tick from the release state; never integrated.
    pub current_position: DVec2,
    /// Set on the tick the projectile reaches the ground line.
    pub hit_ground: bool,
    pub release_kind: ReleaseKind,
}

/// A cosmetic explosion left where a projectile grounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub id: EffectId,
    pub position: DVec2,
    pub created_ms: f64,
    /// Whether the impact landed within the strike radius of the target.
    pub struck_target: bool,
}

/// Pending automatic release. At most one at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoFireArming {
    pub armed: bool,
    /// Only meaningful while `armed`.
    pub scheduled_fire_ms: Option<f64>,
}
