//! Events emitted by the simulation, one batch per tick.
//!
//! The renderer uses them for one-off feedback (sounds, flashes); the engine
//! uses them to keep the score.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::ReleaseKind;
use crate::types::{EffectId, ProjectileId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A projectile was spawned.
    ProjectileReleased {
        id: ProjectileId,
        position: DVec2,
        kind: ReleaseKind,
    },
    /// A projectile reached the ground line and became an effect.
    ProjectileGrounded {
        id: ProjectileId,
        effect_id: EffectId,
        position: DVec2,
        struck_target: bool,
    },
    /// A projectile was removed by the age safety bound.
    ProjectileExpired { id: ProjectileId },
    /// An effect finished its display time.
    EffectExpired { id: EffectId },
    /// Automatic release scheduled.
    AutoFireArmed {
        fire_at_ms: f64,
        flight_time_ms: f64,
        arrival_ms: f64,
    },
    /// No release time exists for the next target pass.
    AutoFireNoSolution {
        /// Next target arrival at the midpoint, if the target moves at all.
        arrival_ms: Option<f64>,
        /// How far in the past the required release time lies.
        late_by_ms: Option<f64>,
    },
    /// The arm request was refused because the prediction input was invalid.
    AutoFireRejected { reason: String },
    /// Pending automatic release cancelled.
    AutoFireDisarmed,
    /// The input boundary asked to stop.
    ShutdownRequested,
}
