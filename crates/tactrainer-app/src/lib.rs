//! Tactical trainer application.
//!
//! Wires the simulation engine to a fixed-rate driver thread and exposes a
//! small control surface for front ends and the headless binary.

pub mod config;
pub mod control;
pub mod game_loop;
pub mod state;

pub use tactrainer_core as core;
