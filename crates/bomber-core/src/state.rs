//! Game state snapshot: the complete visible state handed to the renderer each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{EffectId, ProjectileId, SimTime};

/// Complete, read-only view of the world after a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub plane: PlaneView,
    /// Live projectiles ordered by id (release order).
    pub projectiles: Vec<ProjectileView>,
    /// Live effects ordered by id (creation order).
    pub effects: Vec<EffectView>,
    pub target: TargetView,
    pub auto_fire: AutoFireView,
    pub score: ScoreView,
    pub events: Vec<SimEvent>,
    pub shutdown_requested: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaneView {
    /// Screen position of the plane (x is fixed at mid-screen).
    pub position: DVec2,
    pub altitude: f64,
    /// Vertical velocity (px/ms), for the variometer.
    pub velocity: f64,
    /// Vertical acceleration (px/ms²), for the accelerometer.
    pub acceleration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: ProjectileId,
    pub position: DVec2,
    pub kind: ReleaseKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectView {
    pub id: EffectId,
    pub position: DVec2,
    pub age_ms: f64,
    pub struck_target: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetView {
    pub position: DVec2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoFireView {
    pub mode: AutoFireMode,
    pub armed: bool,
    pub scheduled_fire_ms: Option<f64>,
    /// Continuous or proximity loop running.
    pub engaged: bool,
}

/// Running score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub manual_releases: u32,
    pub auto_releases: u32,
    pub ground_impacts: u32,
    pub target_strikes: u32,
    pub expired: u32,
}
