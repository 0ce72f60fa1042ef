//! Simulation configuration.
//!
//! Every field has a default taken from `constants`, so a JSON file only needs
//! the values it wants to override.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::AutoFireMode;
use crate::error::ConfigError;

/// Auto-fire policy parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoFirePolicy {
    pub mode: AutoFireMode,
    /// Horizontal release window for `AutoFireMode::Proximity` (px).
    pub proximity_threshold_px: f64,
    /// Wait after a proximity release before the next one (ms).
    pub cooldown_ms: f64,
}

impl Default for AutoFirePolicy {
    fn default() -> Self {
        Self {
            mode: AutoFireMode::default(),
            proximity_threshold_px: AUTO_FIRE_PROXIMITY_PX,
            cooldown_ms: AUTO_FIRE_COOLDOWN_MS,
        }
    }
}

/// Configuration consumed by the simulation core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Projectile vertical acceleration (px/ms²). Must be positive.
    pub gravity: f64,
    /// Target horizontal speed (px/ms). Positive moves left, negative moves right.
    pub target_speed: f64,
    pub screen_width: f64,
    pub screen_height: f64,
    /// Width of the target sprite. When set, the wrap period is
    /// `screen_width + target_sprite_width`.
    pub target_sprite_width: Option<f64>,
    pub projectile_ttl_ms: f64,
    pub effect_duration_ms: f64,
    pub min_altitude: f64,
    pub max_altitude: f64,
    pub initial_altitude: f64,
    /// Smoothing constant K of the altitude filter.
    pub altitude_smoothing: f64,
    pub release_offset_y: f64,
    pub target_hit_radius: f64,
    pub auto_fire: AutoFirePolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            target_speed: TARGET_SPEED,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            target_sprite_width: None,
            projectile_ttl_ms: PROJECTILE_TTL_MS,
            effect_duration_ms: EFFECT_DURATION_MS,
            min_altitude: MIN_ALTITUDE,
            max_altitude: MAX_ALTITUDE,
            initial_altitude: INITIAL_ALTITUDE,
            altitude_smoothing: ALTITUDE_SMOOTHING,
            release_offset_y: RELEASE_OFFSET_Y,
            target_hit_radius: TARGET_HIT_RADIUS,
            auto_fire: AutoFirePolicy::default(),
        }
    }
}

impl SimConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Check every field. The engine refuses to start on the first failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("gravity", self.gravity)?;
        finite("target_speed", self.target_speed)?;
        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        if let Some(width) = self.target_sprite_width {
            non_negative("target_sprite_width", width)?;
        }
        positive("projectile_ttl_ms", self.projectile_ttl_ms)?;
        positive("effect_duration_ms", self.effect_duration_ms)?;
        finite("min_altitude", self.min_altitude)?;
        finite("max_altitude", self.max_altitude)?;
        finite("initial_altitude", self.initial_altitude)?;
        if self.min_altitude > self.max_altitude {
            return Err(ConfigError::InvertedAltitudeBounds {
                min: self.min_altitude,
                max: self.max_altitude,
            });
        }
        non_negative("altitude_smoothing", self.altitude_smoothing)?;
        finite("release_offset_y", self.release_offset_y)?;
        let lowest_release = self.max_altitude + self.release_offset_y;
        if lowest_release > self.ground_y() {
            return Err(ConfigError::ReleaseBelowGround {
                release_y: lowest_release,
                ground_y: self.ground_y(),
            });
        }
        non_negative("target_hit_radius", self.target_hit_radius)?;
        non_negative(
            "auto_fire.proximity_threshold_px",
            self.auto_fire.proximity_threshold_px,
        )?;
        non_negative("auto_fire.cooldown_ms", self.auto_fire.cooldown_ms)?;
        Ok(())
    }

    /// The ground line (largest on-screen y).
    pub fn ground_y(&self) -> f64 {
        self.screen_height
    }

    /// Horizontal position of the plane and of every release.
    pub fn plane_x(&self) -> f64 {
        self.screen_width / 2.0
    }

    /// Wrap period of the target's horizontal motion.
    pub fn target_period(&self) -> f64 {
        self.screen_width + self.target_sprite_width.unwrap_or(0.0)
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
