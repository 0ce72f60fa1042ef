//! Kinematics for falling projectiles and the plane's instruments.
//!
//! Pure functions over explicit time, position and velocity arguments.
//! Times are milliseconds, distances pixels, y grows downward.

use serde::{Deserialize, Serialize};

use bomber_core::error::InvalidInput;

/// Position after `elapsed_ms` under constant acceleration from rest:
/// `p = p0 + 0.5 * a * t²`.
pub fn position_under_constant_acceleration(initial: f64, elapsed_ms: f64, acceleration: f64) -> f64 {
    initial + 0.5 * acceleration * elapsed_ms * elapsed_ms
}

/// Finite-difference velocity between two samples. Zero when no time elapsed.
pub fn velocity_from_samples(current: f64, previous: f64, current_ms: f64, previous_ms: f64) -> f64 {
    let dt = current_ms - previous_ms;
    if dt == 0.0 {
        return 0.0;
    }
    (current - previous) / dt
}

/// Finite-difference acceleration between two velocity samples.
/// Zero when no time elapsed.
pub fn acceleration_from_velocity_samples(
    current_velocity: f64,
    previous_velocity: f64,
    current_ms: f64,
    previous_ms: f64,
) -> f64 {
    velocity_from_samples(current_velocity, previous_velocity, current_ms, previous_ms)
}

/// Time for a body released at rest to fall `height` under `acceleration`:
/// `t = sqrt(2h / a)`.
///
/// A negative height means the ground is above the release point.
pub fn time_to_fall(height: f64, acceleration: f64) -> Result<f64, InvalidInput> {
    if !height.is_finite() {
        return Err(InvalidInput::NonFinite { name: "height" });
    }
    if !acceleration.is_finite() {
        return Err(InvalidInput::NonFinite {
            name: "acceleration",
        });
    }
    if acceleration <= 0.0 {
        return Err(InvalidInput::NonPositiveAcceleration { acceleration });
    }
    if height < 0.0 {
        return Err(InvalidInput::NegativeFallHeight { height });
    }
    Ok((2.0 * height / acceleration).sqrt())
}

/// Outcome of an intercept prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Intercept {
    /// Releasing at `fire_at_ms` lands the projectile as the target arrives.
    Solution { fire_at_ms: f64, flight_time_ms: f64 },
    /// The release moment is already past (or is now).
    NoSolution { fire_at_ms: f64, flight_time_ms: f64 },
}

impl Intercept {
    pub fn can_hit(&self) -> bool {
        matches!(self, Intercept::Solution { .. })
    }

    /// Release time, whether or not it is still reachable.
    pub fn fire_at_ms(&self) -> f64 {
        match *self {
            Intercept::Solution { fire_at_ms, .. } | Intercept::NoSolution { fire_at_ms, .. } => {
                fire_at_ms
            }
        }
    }

    pub fn flight_time_ms(&self) -> f64 {
        match *self {
            Intercept::Solution { flight_time_ms, .. }
            | Intercept::NoSolution { flight_time_ms, .. } => flight_time_ms,
        }
    }
}

/// Predict when to release so that the projectile reaches the ground exactly
/// when the target arrives under the release point.
///
/// `fire_at = target_arrival - time_to_fall(ground - release)`. A solution
/// exists only while `fire_at` is strictly after `current_ms`.
pub fn predict_intercept_time(
    release_altitude: f64,
    ground_altitude: f64,
    acceleration: f64,
    target_arrival_ms: f64,
    current_ms: f64,
) -> Result<Intercept, InvalidInput> {
    if !target_arrival_ms.is_finite() {
        return Err(InvalidInput::NonFinite {
            name: "target_arrival_ms",
        });
    }
    if !current_ms.is_finite() {
        return Err(InvalidInput::NonFinite { name: "current_ms" });
    }

    let flight_time_ms = time_to_fall(ground_altitude - release_altitude, acceleration)?;
    let fire_at_ms = target_arrival_ms - flight_time_ms;

    if fire_at_ms > current_ms {
        Ok(Intercept::Solution {
            fire_at_ms,
            flight_time_ms,
        })
    } else {
        Ok(Intercept::NoSolution {
            fire_at_ms,
            flight_time_ms,
        })
    }
}
