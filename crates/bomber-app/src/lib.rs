//! Frame driver for the bomber game.
//!
//! Wires a clock, an input source and a renderer around the headless
//! simulation engine and paces ticks in real time when asked to.

pub mod clock;
pub mod game_loop;
pub mod input;
pub mod render;

pub use bomber_core as core;
