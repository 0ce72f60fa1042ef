//! World state: sole owner of every live entity.
//!
//! Projectiles and effects live in a hecs world; the plane and the auto-fire
//! arming are singletons held directly. Everything is mutated through the
//! methods below, which the engine calls once per tick with that tick's time.

use glam::DVec2;
use hecs::{Entity, World};
use log::debug;

use bomber_core::components::{AutoFireArming, Effect, Plane, Projectile};
use bomber_core::config::SimConfig;
use bomber_core::constants::GROUND_CONTACT_EPSILON;
use bomber_core::enums::ReleaseKind;
use bomber_core::events::SimEvent;
use bomber_core::types::{EffectId, ProjectileId};

use crate::kinematics;

/// Lifecycle limits copied out of the config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldParams {
    pub gravity: f64,
    pub ground_y: f64,
    pub projectile_ttl_ms: f64,
    pub effect_duration_ms: f64,
    pub target_hit_radius: f64,
}

impl WorldParams {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            gravity: config.gravity,
            ground_y: config.ground_y(),
            projectile_ttl_ms: config.projectile_ttl_ms,
            effect_duration_ms: config.effect_duration_ms,
            target_hit_radius: config.target_hit_radius,
        }
    }
}

pub struct WorldState {
    entities: World,
    plane: Plane,
    arming: AutoFireArming,
    params: WorldParams,
    next_projectile_id: u32,
    next_effect_id: u32,
    despawn_buffer: Vec<Entity>,
}

impl WorldState {
    pub fn new(config: &SimConfig) -> Self {
        let altitude = config
            .initial_altitude
            .clamp(config.min_altitude, config.max_altitude);
        Self {
            entities: World::new(),
            plane: Plane {
                altitude,
                previous_altitude: altitude,
                ..Default::default()
            },
            arming: AutoFireArming::default(),
            params: WorldParams::from_config(config),
            next_projectile_id: 0,
            next_effect_id: 0,
            despawn_buffer: Vec::new(),
        }
    }

    pub fn params(&self) -> &WorldParams {
        &self.params
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn plane_mut(&mut self) -> &mut Plane {
        &mut self.plane
    }

    pub fn arming(&self) -> &AutoFireArming {
        &self.arming
    }

    /// Release a projectile under the configured gravity. Always succeeds.
    pub fn spawn_projectile(&mut self, position: DVec2, time_ms: f64) -> ProjectileId {
        self.spawn_projectile_with(position, time_ms, self.params.gravity, ReleaseKind::Manual)
    }

    /// Release a projectile with an explicit acceleration and release kind.
    pub fn spawn_projectile_with(
        &mut self,
        position: DVec2,
        time_ms: f64,
        vertical_acceleration: f64,
        release_kind: ReleaseKind,
    ) -> ProjectileId {
        let id = ProjectileId(self.next_projectile_id);
        self.next_projectile_id += 1;
        self.entities.spawn((Projectile {
            id,
            release_position: position,
            release_time_ms: time_ms,
            vertical_acceleration,
            current_position: position,
            hit_ground: false,
            release_kind,
        },));
        id
    }

    fn spawn_effect(&mut self, position: DVec2, time_ms: f64, struck_target: bool) -> EffectId {
        let id = EffectId(self.next_effect_id);
        self.next_effect_id += 1;
        self.entities.spawn((Effect {
            id,
            position,
            created_ms: time_ms,
            struck_target,
        },));
        id
    }

    /// Recompute every projectile's position at `now_ms`.
    ///
    /// A projectile that reaches the ground line is pinned to it, flagged
    /// `hit_ground` and replaced by an effect in the same call. Whether the
    /// impact struck the target is judged against `target_x`.
    pub fn tick(&mut self, now_ms: f64, target_x: f64, events: &mut Vec<SimEvent>) {
        let ground_y = self.params.ground_y;
        let mut grounded: Vec<(ProjectileId, DVec2)> = Vec::new();

        for (_entity, projectile) in self.entities.query_mut::<&mut Projectile>() {
            if projectile.hit_ground {
                continue;
            }
            let elapsed_ms = (now_ms - projectile.release_time_ms).max(0.0);
            let y = kinematics::position_under_constant_acceleration(
                projectile.release_position.y,
                elapsed_ms,
                projectile.vertical_acceleration,
            );
            if y >= ground_y - GROUND_CONTACT_EPSILON {
                projectile.current_position = DVec2::new(projectile.release_position.x, ground_y);
                projectile.hit_ground = true;
                grounded.push((projectile.id, projectile.current_position));
            } else {
                projectile.current_position = DVec2::new(projectile.release_position.x, y);
            }
        }

        // hecs yields in archetype order; keep effect ids in release order.
        grounded.sort_by_key(|(id, _)| *id);

        for (id, position) in grounded {
            let struck_target = (position.x - target_x).abs() <= self.params.target_hit_radius;
            let effect_id = self.spawn_effect(position, now_ms, struck_target);
            debug!("{id} grounded at x={:.1}, struck_target={struck_target}", position.x);
            events.push(SimEvent::ProjectileGrounded {
                id,
                effect_id,
                position,
                struck_target,
            });
        }
    }

    /// Remove grounded projectiles, projectiles past their age bound, and
    /// effects past their display time. Safe to call any number of times.
    pub fn prune_expired(&mut self, now_ms: f64, events: &mut Vec<SimEvent>) {
        self.despawn_buffer.clear();

        let ttl = self.params.projectile_ttl_ms;
        let mut expired: Vec<ProjectileId> = Vec::new();
        for (entity, projectile) in self.entities.query_mut::<&Projectile>() {
            if projectile.hit_ground {
                self.despawn_buffer.push(entity);
            } else if now_ms - projectile.release_time_ms >= ttl {
                expired.push(projectile.id);
                self.despawn_buffer.push(entity);
            }
        }

        let duration = self.params.effect_duration_ms;
        let mut faded: Vec<EffectId> = Vec::new();
        for (entity, effect) in self.entities.query_mut::<&Effect>() {
            if now_ms - effect.created_ms >= duration {
                faded.push(effect.id);
                self.despawn_buffer.push(entity);
            }
        }

        for entity in self.despawn_buffer.drain(..) {
            let _ = self.entities.despawn(entity);
        }

        expired.sort();
        faded.sort();
        events.extend(expired.into_iter().map(|id| SimEvent::ProjectileExpired { id }));
        events.extend(faded.into_iter().map(|id| SimEvent::EffectExpired { id }));
    }

    /// Remove one projectile. Returns whether it was present.
    pub fn remove_projectile(&mut self, id: ProjectileId) -> bool {
        let entity = self
            .entities
            .query_mut::<&Projectile>()
            .into_iter()
            .find(|(_, p)| p.id == id)
            .map(|(entity, _)| entity);
        match entity {
            Some(entity) => self.entities.despawn(entity).is_ok(),
            None => false,
        }
    }

    /// Remove one effect. Returns whether it was present.
    pub fn remove_effect(&mut self, id: EffectId) -> bool {
        let entity = self
            .entities
            .query_mut::<&Effect>()
            .into_iter()
            .find(|(_, e)| e.id == id)
            .map(|(entity, _)| entity);
        match entity {
            Some(entity) => self.entities.despawn(entity).is_ok(),
            None => false,
        }
    }

    /// Schedule an automatic release. A no-op while already armed; returns
    /// whether the arming took effect.
    pub fn arm_auto_fire(&mut self, fire_at_ms: f64) -> bool {
        if self.arming.armed {
            return false;
        }
        self.arming = AutoFireArming {
            armed: true,
            scheduled_fire_ms: Some(fire_at_ms),
        };
        true
    }

    /// Clear any pending automatic release. Returns whether one was pending.
    pub fn disarm_auto_fire(&mut self) -> bool {
        let was_armed = self.arming.armed;
        self.arming = AutoFireArming::default();
        was_armed
    }

    /// Copies of live projectiles ordered by id.
    pub fn projectiles(&self) -> Vec<Projectile> {
        let mut projectiles: Vec<Projectile> = self
            .entities
            .query::<&Projectile>()
            .iter()
            .map(|(_, p)| *p)
            .collect();
        projectiles.sort_by_key(|p| p.id);
        projectiles
    }

    /// Copies of live effects ordered by id.
    pub fn effects(&self) -> Vec<Effect> {
        let mut effects: Vec<Effect> = self
            .entities
            .query::<&Effect>()
            .iter()
            .map(|(_, e)| *e)
            .collect();
        effects.sort_by_key(|e| e.id);
        effects
    }

    pub fn projectile(&self, id: ProjectileId) -> Option<Projectile> {
        self.entities
            .query::<&Projectile>()
            .iter()
            .find(|(_, p)| p.id == id)
            .map(|(_, p)| *p)
    }

    pub fn projectile_count(&self) -> usize {
        self.entities.query::<&Projectile>().iter().count()
    }

    pub fn effect_count(&self) -> usize {
        self.entities.query::<&Effect>().iter().count()
    }
}
