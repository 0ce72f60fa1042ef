//! Simulation constants and tuning defaults.
//!
//! Units: pixels, milliseconds. These seed `SimConfig::default()`; the engine
//! itself only reads values through the config.

/// Driver tick rate (Hz).
pub const TICK_RATE: u32 = 60;

// --- Screen ---

/// Screen width in pixels.
pub const SCREEN_WIDTH: f64 = 800.0;

/// Screen height in pixels. The ground line sits at this y.
pub const SCREEN_HEIGHT: f64 = 600.0;

// --- Physics ---

/// Projectile vertical acceleration (px/ms²).
pub const GRAVITY: f64 = 0.0002;

/// Tolerance below the ground line that still counts as contact (px).
pub const GROUND_CONTACT_EPSILON: f64 = 1e-6;

// --- Plane ---

/// Plane altitude at session start (px).
pub const INITIAL_ALTITUDE: f64 = 300.0;

/// Highest point the plane may reach (smallest y, px).
pub const MIN_ALTITUDE: f64 = 50.0;

/// Clearance kept between the plane and the bottom of the screen (px).
pub const GROUND_CLEARANCE: f64 = 70.0;

/// Lowest point the plane may reach (largest y, px).
pub const MAX_ALTITUDE: f64 = SCREEN_HEIGHT - GROUND_CLEARANCE;

/// Weight of the current altitude in the smoothing filter.
/// `altitude = (altitude * K + sample) / (K + 1)`.
pub const ALTITUDE_SMOOTHING: f64 = 5.0;

/// Vertical distance between the plane and a freshly released bomb (px).
pub const RELEASE_OFFSET_Y: f64 = 20.0;

// --- Target ---

/// Horizontal speed of the target flag (px/ms), moving left.
pub const TARGET_SPEED: f64 = 0.125;

/// Horizontal distance within which a ground impact counts as a strike (px).
pub const TARGET_HIT_RADIUS: f64 = 20.0;

// --- Lifetimes ---

/// Safety bound on projectile age (ms).
pub const PROJECTILE_TTL_MS: f64 = 3000.0;

/// Display duration of an explosion effect (ms).
pub const EFFECT_DURATION_MS: f64 = 500.0;

// --- Auto-fire ---

/// Horizontal plane-to-target distance that triggers a proximity release (px).
pub const AUTO_FIRE_PROXIMITY_PX: f64 = 100.0;

/// Minimum time between proximity releases (ms).
pub const AUTO_FIRE_COOLDOWN_MS: f64 = 5000.0;
