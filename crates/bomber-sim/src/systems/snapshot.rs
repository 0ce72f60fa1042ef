//! Snapshot system: reads the world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use glam::DVec2;

use bomber_core::config::SimConfig;
use bomber_core::events::SimEvent;
use bomber_core::state::*;
use bomber_core::types::SimTime;

use crate::score::ScoreState;
use crate::systems::auto_fire::AutoFireController;
use crate::target::TargetMotion;
use crate::world::WorldState;

/// Everything outside the world that the snapshot reports.
pub struct SnapshotContext<'a> {
    pub config: &'a SimConfig,
    pub target: &'a TargetMotion,
    pub controller: &'a AutoFireController,
    pub score: &'a ScoreState,
    pub shutdown_requested: bool,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &WorldState,
    time: &SimTime,
    ctx: &SnapshotContext<'_>,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        plane: build_plane(world, ctx.config),
        projectiles: build_projectiles(world),
        effects: build_effects(world, time.now_ms),
        target: TargetView {
            position: ctx.target.position_at(time.now_ms),
        },
        auto_fire: AutoFireView {
            mode: ctx.config.auto_fire.mode,
            armed: world.arming().armed,
            scheduled_fire_ms: world.arming().scheduled_fire_ms,
            engaged: ctx.controller.engaged,
        },
        score: ctx.score.view(),
        events,
        shutdown_requested: ctx.shutdown_requested,
    }
}

fn build_plane(world: &WorldState, config: &SimConfig) -> PlaneView {
    let plane = world.plane();
    PlaneView {
        position: DVec2::new(config.plane_x(), plane.altitude),
        altitude: plane.altitude,
        velocity: plane.velocity,
        acceleration: plane.acceleration,
    }
}

/// Projectiles still in flight; grounded ones have become effects.
fn build_projectiles(world: &WorldState) -> Vec<ProjectileView> {
    world
        .projectiles()
        .into_iter()
        .filter(|p| !p.hit_ground)
        .map(|p| ProjectileView {
            id: p.id,
            position: p.current_position,
            kind: p.release_kind,
        })
        .collect()
}

fn build_effects(world: &WorldState, now_ms: f64) -> Vec<EffectView> {
    world
        .effects()
        .into_iter()
        .map(|e| EffectView {
            id: e.id,
            position: e.position,
            age_ms: now_ms - e.created_ms,
            struck_target: e.struck_target,
        })
        .collect()
}
