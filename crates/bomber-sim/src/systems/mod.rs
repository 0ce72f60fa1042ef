//! Systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over the world and the tick's time. They do
//! not own state; the engine passes in what each one needs.

pub mod auto_fire;
pub mod plane;
pub mod release;
pub mod snapshot;
