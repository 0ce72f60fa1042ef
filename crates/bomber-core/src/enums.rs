//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// How a projectile came to be released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReleaseKind {
    /// Player pressed the drop key.
    #[default]
    Manual,
    /// Released by the auto-fire system.
    Auto,
}

/// Auto-fire policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoFireMode {
    /// One prediction per arm command; stays disarmed after the release.
    #[default]
    OneShot,
    /// Re-arms with a fresh prediction whenever disarmed, until disarmed explicitly.
    Continuous,
    /// Releases when the target is within a horizontal threshold of the plane,
    /// then waits out a cooldown.
    Proximity,
}
