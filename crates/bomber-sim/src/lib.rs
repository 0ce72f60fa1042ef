//! Simulation engine for the bomber game.
//!
//! Owns the world state, runs systems once per tick at the time supplied by
//! the caller, and produces GameStateSnapshots for the renderer.

pub mod engine;
pub mod kinematics;
pub mod score;
pub mod systems;
pub mod target;
pub mod world;

pub use bomber_core as core;
pub use engine::SimulationEngine;
