//! Commands sent from the input boundary to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All actions the input boundary can request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Raw cursor altitude (screen pixels, y grows downward).
    /// Only the latest sample of a tick is used.
    SetAltitudeSample { y: f64 },
    /// Release a projectile immediately, regardless of arming.
    ManualFire,
    /// Ask the auto-fire system to schedule (or engage) automatic release.
    ArmAutoFire,
    /// Cancel any pending automatic release and disengage auto-fire loops.
    DisarmAutoFire,
    /// Stop the session. Nothing is flushed.
    Shutdown,
}
