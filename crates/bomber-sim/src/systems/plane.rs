//! Plane system: altitude filter and instrument derivatives.

use bomber_core::components::Plane;
use bomber_core::config::SimConfig;

use crate::kinematics;

/// Exponential smoothing toward a raw sample:
/// `(current * k + sample) / (k + 1)`.
pub fn smooth_altitude(current: f64, sample: f64, k: f64) -> f64 {
    (current * k + sample) / (k + 1.0)
}

/// Advance the plane by one tick.
///
/// Applies the latest sample (if any) through the filter and clamps it, then
/// derives velocity and acceleration against the previous tick and records the
/// current values as the previous ones for the next tick.
pub fn run(plane: &mut Plane, sample: Option<f64>, now_ms: f64, config: &SimConfig) {
    if let Some(sample) = sample.filter(|s| s.is_finite()) {
        plane.altitude = smooth_altitude(plane.altitude, sample, config.altitude_smoothing)
            .clamp(config.min_altitude, config.max_altitude);
    }

    let velocity = kinematics::velocity_from_samples(
        plane.altitude,
        plane.previous_altitude,
        now_ms,
        plane.last_sample_ms,
    );
    let acceleration = kinematics::acceleration_from_velocity_samples(
        velocity,
        plane.previous_velocity,
        now_ms,
        plane.last_sample_ms,
    );

    plane.velocity = velocity;
    plane.acceleration = acceleration;

    plane.previous_altitude = plane.altitude;
    plane.previous_velocity = velocity;
    plane.last_sample_ms = now_ms;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane_at(altitude: f64) -> Plane {
        Plane {
            altitude,
            previous_altitude: altitude,
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_moves_part_way() {
        let config = SimConfig::default();
        let mut plane = plane_at(300.0);
        run(&mut plane, Some(360.0), 16.0, &config);
        // K = 5: (300 * 5 + 360) / 6 = 310
        assert!((plane.altitude - 310.0).abs() < 1e-9);
    }

    #[test]
    fn test_filter_converges_to_sample() {
        let config = SimConfig::default();
        let mut plane = plane_at(300.0);
        for tick in 1..=200 {
            run(&mut plane, Some(400.0), tick as f64 * 16.0, &config);
        }
        assert!((plane.altitude - 400.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_smoothing_snaps() {
        let config = SimConfig {
            altitude_smoothing: 0.0,
            ..Default::default()
        };
        let mut plane = plane_at(300.0);
        run(&mut plane, Some(123.0), 16.0, &config);
        assert_eq!(plane.altitude, 123.0);
    }

    #[test]
    fn test_altitude_is_clamped() {
        let config = SimConfig {
            altitude_smoothing: 0.0,
            ..Default::default()
        };
        let mut plane = plane_at(300.0);
        run(&mut plane, Some(-1000.0), 16.0, &config);
        assert_eq!(plane.altitude, config.min_altitude);
        run(&mut plane, Some(5000.0), 32.0, &config);
        assert_eq!(plane.altitude, config.max_altitude);
    }

    #[test]
    fn test_derivatives_and_previous_capture() {
        let config = SimConfig {
            altitude_smoothing: 0.0,
            ..Default::default()
        };
        let mut plane = plane_at(300.0);
        plane.last_sample_ms = 0.0;

        run(&mut plane, Some(316.0), 16.0, &config);
        assert!((plane.velocity - 1.0).abs() < 1e-12);
        assert!((plane.acceleration - 1.0 / 16.0).abs() < 1e-12);
        assert_eq!(plane.previous_altitude, 316.0);
        assert_eq!(plane.previous_velocity, plane.velocity);
        assert_eq!(plane.last_sample_ms, 16.0);

        // No new sample: altitude holds, velocity decays to zero.
        run(&mut plane, None, 32.0, &config);
        assert_eq!(plane.altitude, 316.0);
        assert_eq!(plane.velocity, 0.0);
        assert!((plane.acceleration + 1.0 / 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_repeated_time_gives_zero_derivatives() {
        let config = SimConfig::default();
        let mut plane = plane_at(300.0);
        run(&mut plane, Some(350.0), 0.0, &config);
        assert_eq!(plane.velocity, 0.0);
        assert_eq!(plane.acceleration, 0.0);
    }
}
