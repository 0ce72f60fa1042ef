//! Projectile release from the plane.

use glam::DVec2;
use log::info;

use bomber_core::components::Plane;
use bomber_core::config::SimConfig;
use bomber_core::enums::ReleaseKind;
use bomber_core::events::SimEvent;
use bomber_core::types::ProjectileId;

use crate::world::WorldState;

/// Where a bomb appears: mid-screen, just below the plane.
pub fn release_position(plane: &Plane, config: &SimConfig) -> DVec2 {
    DVec2::new(config.plane_x(), plane.altitude + config.release_offset_y)
}

/// Drop a projectile from the plane's current position at `now_ms`.
pub fn release_projectile(
    world: &mut WorldState,
    config: &SimConfig,
    now_ms: f64,
    kind: ReleaseKind,
    events: &mut Vec<SimEvent>,
) -> ProjectileId {
    let position = release_position(world.plane(), config);
    let gravity = world.params().gravity;
    let id = world.spawn_projectile_with(position, now_ms, gravity, kind);
    info!(
        "{id} released ({kind:?}) at ({:.1}, {:.1}), t={now_ms:.1}",
        position.x, position.y
    );
    events.push(SimEvent::ProjectileReleased { id, position, kind });
    id
}
