//! Error types for kinematics input and configuration.
//!
//! "No solution" for auto-fire is a normal result, not an error; see
//! `bomber_sim::kinematics::Intercept`.

use std::fmt;

/// Input rejected by a kinematics function before any state is touched.
#[derive(Clone, Debug, PartialEq)]
pub enum InvalidInput {
    /// Acceleration must be strictly positive for a fall to happen.
    NonPositiveAcceleration { acceleration: f64 },
    /// The ground is above the release point.
    NegativeFallHeight { height: f64 },
    /// An argument was NaN or infinite.
    NonFinite { name: &'static str },
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAcceleration { acceleration } => {
                write!(f, "acceleration must be positive, got {acceleration}")
            }
            Self::NegativeFallHeight { height } => {
                write!(f, "fall height must not be negative, got {height}")
            }
            Self::NonFinite { name } => write!(f, "{name} must be finite"),
        }
    }
}

impl std::error::Error for InvalidInput {}

/// Configuration rejected at load or engine construction.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonPositive { field: &'static str, value: f64 },
    Negative { field: &'static str, value: f64 },
    NonFinite { field: &'static str },
    InvertedAltitudeBounds { min: f64, max: f64 },
    /// The lowest plane position plus the release offset lies below the ground.
    ReleaseBelowGround { release_y: f64, ground_y: f64 },
    Parse(String),
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::NonFinite { field } => write!(f, "{field} must be finite"),
            Self::InvertedAltitudeBounds { min, max } => write!(
                f,
                "altitude bounds inverted: min_altitude={min} > max_altitude={max}"
            ),
            Self::ReleaseBelowGround { release_y, ground_y } => write!(
                f,
                "lowest release point y={release_y} is below the ground line y={ground_y}"
            ),
            Self::Parse(msg) => write!(f, "invalid config: {msg}"),
            Self::Io(msg) => write!(f, "cannot read config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
