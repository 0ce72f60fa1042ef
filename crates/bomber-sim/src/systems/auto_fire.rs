//! Auto-fire system: schedules and performs automatic releases.
//!
//! Predictive modes aim for the target's next pass under the plane: the
//! release time is the arrival time minus the fall time. The proximity mode
//! releases whenever the target is close enough and the cooldown has elapsed.

use log::{debug, info, warn};

use bomber_core::components::AutoFireArming;
use bomber_core::config::SimConfig;
use bomber_core::enums::{AutoFireMode, ReleaseKind};
use bomber_core::error::InvalidInput;
use bomber_core::events::SimEvent;

use crate::kinematics::{self, Intercept};
use crate::systems::release;
use crate::target::TargetMotion;
use crate::world::WorldState;

/// Loop state for the continuous and proximity modes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AutoFireController {
    pub engaged: bool,
    /// Earliest time of the next proximity release.
    pub cooldown_until_ms: f64,
    /// Target pass the continuous loop last aimed at. The next arming aims
    /// at a later pass so one pass never gets two bombs.
    pub last_arrival_ms: Option<f64>,
}

/// Result of one arming attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ArmOutcome {
    Armed {
        fire_at_ms: f64,
        flight_time_ms: f64,
        arrival_ms: f64,
    },
    /// A solution exists but an earlier arming is still pending.
    AlreadyArmed,
    NoSolution {
        arrival_ms: Option<f64>,
        late_by_ms: Option<f64>,
    },
    Rejected(InvalidInput),
}

/// Predict a release time for the target's next pass and arm with it.
///
/// Invalid prediction input is reported before anything is mutated.
pub fn try_arm(
    world: &mut WorldState,
    target: &TargetMotion,
    config: &SimConfig,
    now_ms: f64,
) -> ArmOutcome {
    arm_for_pass_after(world, target, config, now_ms, now_ms)
}

/// Like [`try_arm`], aiming at the first pass strictly after `after_ms`.
fn arm_for_pass_after(
    world: &mut WorldState,
    target: &TargetMotion,
    config: &SimConfig,
    now_ms: f64,
    after_ms: f64,
) -> ArmOutcome {
    let release_y = release::release_position(world.plane(), config).y;

    let Some(arrival_ms) = target.next_arrival_ms(after_ms.max(now_ms), config.plane_x()) else {
        return ArmOutcome::NoSolution {
            arrival_ms: None,
            late_by_ms: None,
        };
    };

    match kinematics::predict_intercept_time(
        release_y,
        config.ground_y(),
        world.params().gravity,
        arrival_ms,
        now_ms,
    ) {
        Err(err) => ArmOutcome::Rejected(err),
        Ok(Intercept::NoSolution { fire_at_ms, .. }) => ArmOutcome::NoSolution {
            arrival_ms: Some(arrival_ms),
            late_by_ms: Some(now_ms - fire_at_ms),
        },
        Ok(Intercept::Solution {
            fire_at_ms,
            flight_time_ms,
        }) => {
            if world.arm_auto_fire(fire_at_ms) {
                ArmOutcome::Armed {
                    fire_at_ms,
                    flight_time_ms,
                    arrival_ms,
                }
            } else {
                ArmOutcome::AlreadyArmed
            }
        }
    }
}

/// Handle an `ArmAutoFire` command.
pub fn request_arm(
    world: &mut WorldState,
    controller: &mut AutoFireController,
    target: &TargetMotion,
    config: &SimConfig,
    now_ms: f64,
    events: &mut Vec<SimEvent>,
) {
    if let Some(fire_at_ms) = world.arming().scheduled_fire_ms {
        debug!("auto-fire already armed for {fire_at_ms:.1}ms, request ignored");
        return;
    }

    match config.auto_fire.mode {
        AutoFireMode::OneShot => {
            let outcome = try_arm(world, target, config, now_ms);
            report(outcome, events);
        }
        AutoFireMode::Continuous => {
            controller.engaged = true;
            let outcome = try_arm(world, target, config, now_ms);
            match outcome {
                ArmOutcome::Armed { arrival_ms, .. } => controller.last_arrival_ms = Some(arrival_ms),
                ArmOutcome::Rejected(_) => controller.engaged = false,
                _ => {}
            }
            report(outcome, events);
        }
        AutoFireMode::Proximity => {
            if !controller.engaged {
                info!(
                    "proximity auto-fire engaged (threshold {:.0}px)",
                    config.auto_fire.proximity_threshold_px
                );
            }
            controller.engaged = true;
        }
    }
}

/// Handle a `DisarmAutoFire` command.
pub fn request_disarm(
    world: &mut WorldState,
    controller: &mut AutoFireController,
    events: &mut Vec<SimEvent>,
) {
    let was_armed = world.disarm_auto_fire();
    let was_engaged = std::mem::take(&mut controller.engaged);
    controller.last_arrival_ms = None;
    if was_armed || was_engaged {
        info!("auto-fire disarmed");
        events.push(SimEvent::AutoFireDisarmed);
    }
}

/// Per-tick auto-fire step: perform a due release, then keep the
/// continuous or proximity loop going.
pub fn run(
    world: &mut WorldState,
    controller: &mut AutoFireController,
    target: &TargetMotion,
    config: &SimConfig,
    now_ms: f64,
    events: &mut Vec<SimEvent>,
) {
    if let AutoFireArming {
        armed: true,
        scheduled_fire_ms: Some(fire_at_ms),
    } = *world.arming()
    {
        if now_ms >= fire_at_ms {
            release::release_projectile(world, config, now_ms, ReleaseKind::Auto, events);
            world.disarm_auto_fire();
        }
    }

    if !controller.engaged {
        return;
    }

    match config.auto_fire.mode {
        AutoFireMode::Continuous => {
            if world.arming().armed {
                return;
            }
            let after_ms = controller.last_arrival_ms.unwrap_or(now_ms);
            match arm_for_pass_after(world, target, config, now_ms, after_ms) {
                outcome @ ArmOutcome::Armed { arrival_ms, .. } => {
                    controller.last_arrival_ms = Some(arrival_ms);
                    report(outcome, events);
                }
                outcome @ ArmOutcome::Rejected(_) => {
                    controller.engaged = false;
                    report(outcome, events);
                }
                other => debug!("continuous auto-fire retry: {other:?}"),
            }
        }
        AutoFireMode::Proximity => {
            if now_ms < controller.cooldown_until_ms {
                return;
            }
            let distance = (config.plane_x() - target.x_at(now_ms)).abs();
            if distance <= config.auto_fire.proximity_threshold_px {
                release::release_projectile(world, config, now_ms, ReleaseKind::Auto, events);
                controller.cooldown_until_ms = now_ms + config.auto_fire.cooldown_ms;
            }
        }
        AutoFireMode::OneShot => {}
    }
}

fn report(outcome: ArmOutcome, events: &mut Vec<SimEvent>) {
    match outcome {
        ArmOutcome::Armed {
            fire_at_ms,
            flight_time_ms,
            arrival_ms,
        } => {
            info!(
                "auto-fire armed: release at {fire_at_ms:.1}ms, fall {flight_time_ms:.1}ms, target at {arrival_ms:.1}ms"
            );
            events.push(SimEvent::AutoFireArmed {
                fire_at_ms,
                flight_time_ms,
                arrival_ms,
            });
        }
        ArmOutcome::AlreadyArmed => debug!("auto-fire already armed, request ignored"),
        ArmOutcome::NoSolution {
            arrival_ms,
            late_by_ms,
        } => {
            info!("auto-fire has no solution (arrival {arrival_ms:?}, late by {late_by_ms:?})");
            events.push(SimEvent::AutoFireNoSolution {
                arrival_ms,
                late_by_ms,
            });
        }
        ArmOutcome::Rejected(err) => {
            warn!("auto-fire request rejected: {err}");
            events.push(SimEvent::AutoFireRejected {
                reason: err.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(mode: AutoFireMode) -> (WorldState, SimConfig, TargetMotion) {
        let mut config = SimConfig::default();
        config.auto_fire.mode = mode;
        let world = WorldState::new(&config);
        let target = TargetMotion::from_config(&config);
        (world, config, target)
    }

    #[test]
    fn test_try_arm_schedules_release_before_arrival() {
        let (mut world, config, target) = setup(AutoFireMode::OneShot);
        // Plane at 300, release at 320, fall of 280 px.
        let outcome = try_arm(&mut world, &target, &config, 0.0);
        let expected_flight = kinematics::time_to_fall(280.0, config.gravity).unwrap();
        match outcome {
            ArmOutcome::Armed {
                fire_at_ms,
                flight_time_ms,
                arrival_ms,
            } => {
                assert!((arrival_ms - 3200.0).abs() < 1e-9);
                assert!((flight_time_ms - expected_flight).abs() < 1e-9);
                assert!((fire_at_ms - (3200.0 - expected_flight)).abs() < 1e-9);
            }
            other => panic!("expected Armed, got {other:?}"),
        }
        assert!(world.arming().armed);
    }

    #[test]
    fn test_try_arm_too_late_leaves_unarmed() {
        let (mut world, config, target) = setup(AutoFireMode::OneShot);
        // Target reaches the midpoint at 3200; fall takes ~1673ms.
        let outcome = try_arm(&mut world, &target, &config, 3000.0);
        assert!(matches!(outcome, ArmOutcome::NoSolution { late_by_ms: Some(late), .. } if late > 0.0));
        assert!(!world.arming().armed);
    }

    #[test]
    fn test_try_arm_rejects_release_below_ground() {
        let (mut world, mut config, target) = setup(AutoFireMode::OneShot);
        config.release_offset_y = 400.0;
        let outcome = try_arm(&mut world, &target, &config, 0.0);
        assert!(matches!(
            outcome,
            ArmOutcome::Rejected(InvalidInput::NegativeFallHeight { .. })
        ));
        assert!(!world.arming().armed);
    }

    #[test]
    fn test_stationary_target_has_no_solution() {
        let (mut world, mut config, _) = setup(AutoFireMode::OneShot);
        config.target_speed = 0.0;
        let target = TargetMotion::from_config(&config);
        assert_eq!(
            try_arm(&mut world, &target, &config, 0.0),
            ArmOutcome::NoSolution {
                arrival_ms: None,
                late_by_ms: None
            }
        );
    }

    #[test]
    fn test_due_release_fires_once_and_disarms() {
        let (mut world, config, target) = setup(AutoFireMode::OneShot);
        let mut controller = AutoFireController::default();
        let mut events = Vec::new();
        world.arm_auto_fire(100.0);

        run(&mut world, &mut controller, &target, &config, 99.0, &mut events);
        assert_eq!(world.projectile_count(), 0);

        run(&mut world, &mut controller, &target, &config, 100.0, &mut events);
        assert_eq!(world.projectile_count(), 1);
        assert!(!world.arming().armed);

        run(&mut world, &mut controller, &target, &config, 116.0, &mut events);
        assert_eq!(world.projectile_count(), 1);
        assert_eq!(world.projectiles()[0].release_kind, ReleaseKind::Auto);
    }

    #[test]
    fn test_continuous_rearms_after_release() {
        let (mut world, config, target) = setup(AutoFireMode::Continuous);
        let mut controller = AutoFireController::default();
        let mut events = Vec::new();

        request_arm(&mut world, &mut controller, &target, &config, 0.0, &mut events);
        let first = world.arming().scheduled_fire_ms.unwrap();

        run(&mut world, &mut controller, &target, &config, first, &mut events);
        assert_eq!(world.projectile_count(), 1);
        assert!(world.arming().armed, "continuous mode re-arms in the same tick");
        let second = world.arming().scheduled_fire_ms.unwrap();
        // Next pass is one full period (800px / 0.125px/ms) later.
        assert!((second - first - 6400.0).abs() < 1e-6, "got {}", second - first);
    }

    #[test]
    fn test_proximity_respects_threshold_and_cooldown() {
        let (mut world, config, target) = setup(AutoFireMode::Proximity);
        let mut controller = AutoFireController::default();
        let mut events = Vec::new();
        request_arm(&mut world, &mut controller, &target, &config, 0.0, &mut events);
        assert!(controller.engaged);

        // x(t) = 800 - 0.125t: |400 - x| <= 100 for t in [2400, 4000].
        run(&mut world, &mut controller, &target, &config, 2000.0, &mut events);
        assert_eq!(world.projectile_count(), 0);

        run(&mut world, &mut controller, &target, &config, 2400.0, &mut events);
        assert_eq!(world.projectile_count(), 1);

        run(&mut world, &mut controller, &target, &config, 3000.0, &mut events);
        assert_eq!(world.projectile_count(), 1, "cooldown blocks the second release");
        assert_eq!(controller.cooldown_until_ms, 7400.0);
    }

    #[test]
    fn test_request_arm_while_armed_skips_prediction() {
        let (mut world, mut config, target) = setup(AutoFireMode::Continuous);
        let mut controller = AutoFireController::default();
        let mut events = Vec::new();
        request_arm(&mut world, &mut controller, &target, &config, 0.0, &mut events);
        events.clear();

        // A prediction now would be rejected; the pending arming must win.
        config.release_offset_y = 400.0;
        request_arm(&mut world, &mut controller, &target, &config, 16.0, &mut events);
        assert!(events.is_empty());
        assert!(world.arming().armed);
        assert!(controller.engaged);
    }

    #[test]
    fn test_disarm_clears_both_arming_and_loop() {
        let (mut world, config, target) = setup(AutoFireMode::Continuous);
        let mut controller = AutoFireController::default();
        let mut events = Vec::new();
        request_arm(&mut world, &mut controller, &target, &config, 0.0, &mut events);
        assert!(world.arming().armed && controller.engaged);

        request_disarm(&mut world, &mut controller, &mut events);
        assert!(!world.arming().armed);
        assert!(!controller.engaged);
        assert_eq!(events.last(), Some(&SimEvent::AutoFireDisarmed));

        let before = events.len();
        request_disarm(&mut world, &mut controller, &mut events);
        assert_eq!(events.len(), before, "disarming twice reports once");
    }
}
