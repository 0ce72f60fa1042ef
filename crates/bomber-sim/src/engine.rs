//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the world state, processes commands from the input
//! boundary, runs all systems, and produces `GameStateSnapshot`s. Completely
//! headless: time comes in as an argument to `tick`, so runs are deterministic
//! for a given sequence of times and commands.

use std::collections::VecDeque;

use log::{debug, info, warn};

use bomber_core::commands::Command;
use bomber_core::config::SimConfig;
use bomber_core::enums::ReleaseKind;
use bomber_core::error::ConfigError;
use bomber_core::events::SimEvent;
use bomber_core::state::GameStateSnapshot;
use bomber_core::types::SimTime;

use crate::score::ScoreState;
use crate::systems;
use crate::systems::auto_fire::AutoFireController;
use crate::systems::snapshot::SnapshotContext;
use crate::target::TargetMotion;
use crate::world::WorldState;

/// The simulation engine. Owns the world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    world: WorldState,
    target: TargetMotion,
    time: SimTime,
    command_queue: VecDeque<Command>,
    controller: AutoFireController,
    score: ScoreState,
    shutdown_requested: bool,
}

impl SimulationEngine {
    /// Create a new simulation engine. Refuses an invalid configuration.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            "simulation engine created: {}x{} screen, gravity {}, target speed {}, auto-fire {:?}",
            config.screen_width,
            config.screen_height,
            config.gravity,
            config.target_speed,
            config.auto_fire.mode
        );
        Ok(Self {
            world: WorldState::new(&config),
            target: TargetMotion::from_config(&config),
            time: SimTime::default(),
            command_queue: VecDeque::new(),
            controller: AutoFireController::default(),
            score: ScoreState::default(),
            shutdown_requested: false,
            config,
        })
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: Command) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation to `now_ms` and return the resulting snapshot.
    ///
    /// `now_ms` is the single time value used by every computation in this
    /// tick. A value earlier than the previous tick's is clamped to it.
    pub fn tick(&mut self, now_ms: f64) -> GameStateSnapshot {
        let previous_ms = self.time.now_ms;
        let now = self.time.advance_to(now_ms);
        if now != now_ms {
            warn!(
                "tick {}: clock value {now_ms} rejected, keeping {previous_ms}",
                self.time.tick
            );
        }

        let mut events = Vec::new();
        let commands = self.take_commands();

        // 1-2. Plane filter and instruments, from the last sample of the tick.
        let sample = commands.iter().rev().find_map(|c| match c {
            Command::SetAltitudeSample { y } => Some(*y),
            _ => None,
        });
        systems::plane::run(self.world.plane_mut(), sample, now, &self.config);

        for command in commands {
            self.handle_command(command, now, &mut events);
        }

        self.run_systems(now, &mut events);
        self.score.record_all(&events);

        let ctx = SnapshotContext {
            config: &self.config,
            target: &self.target,
            controller: &self.controller,
            score: &self.score,
            shutdown_requested: self.shutdown_requested,
        };
        systems::snapshot::build_snapshot(&self.world, &self.time, &ctx, events)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the world state.
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn target(&self) -> &TargetMotion {
        &self.target
    }

    /// Whether a `Shutdown` command has been processed.
    pub fn is_shut_down(&self) -> bool {
        self.shutdown_requested
    }

    /// Drain the queue. Everything after a `Shutdown` is dropped, and
    /// nothing is accepted once the engine has shut down.
    fn take_commands(&mut self) -> Vec<Command> {
        if self.shutdown_requested {
            if !self.command_queue.is_empty() {
                debug!(
                    "discarding {} command(s) after shutdown",
                    self.command_queue.len()
                );
                self.command_queue.clear();
            }
            return Vec::new();
        }

        let mut commands: Vec<Command> = self.command_queue.drain(..).collect();
        if let Some(pos) = commands.iter().position(|c| *c == Command::Shutdown) {
            let dropped = commands.len() - pos - 1;
            if dropped > 0 {
                debug!("discarding {dropped} command(s) queued after shutdown");
            }
            commands.truncate(pos + 1);
        }
        commands
    }

    /// Handle a single command. Altitude samples were already applied.
    fn handle_command(&mut self, command: Command, now_ms: f64, events: &mut Vec<SimEvent>) {
        match command {
            Command::SetAltitudeSample { .. } => {}
            Command::ManualFire => {
                systems::release::release_projectile(
                    &mut self.world,
                    &self.config,
                    now_ms,
                    ReleaseKind::Manual,
                    events,
                );
            }
            Command::ArmAutoFire => {
                systems::auto_fire::request_arm(
                    &mut self.world,
                    &mut self.controller,
                    &self.target,
                    &self.config,
                    now_ms,
                    events,
                );
            }
            Command::DisarmAutoFire => {
                systems::auto_fire::request_disarm(&mut self.world, &mut self.controller, events);
            }
            Command::Shutdown => {
                info!("shutdown requested at tick {}", self.time.tick);
                self.shutdown_requested = true;
                events.push(SimEvent::ShutdownRequested);
            }
        }
    }

    /// Run all per-tick systems in order.
    fn run_systems(&mut self, now_ms: f64, events: &mut Vec<SimEvent>) {
        // 3. Scheduled release and auto-fire loops
        systems::auto_fire::run(
            &mut self.world,
            &mut self.controller,
            &self.target,
            &self.config,
            now_ms,
            events,
        );
        // 4. Projectile motion, grounding, then lifecycle
        let target_x = self.target.x_at(now_ms);
        self.world.tick(now_ms, target_x, events);
        self.world.prune_expired(now_ms, events);
    }
}
