//! Core types and definitions for the bomber simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! components, commands, configuration, state snapshots, events, and errors.
//! It has no dependency on any runtime, renderer, or input backend.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
