//! Simulation engine for the tactical trainer.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces WorldSnapshots for the rendering layer.

pub mod annotations;
pub mod engine;
pub mod guidance;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use tactrainer_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use scenario::ScenarioDocument;

#[cfg(test)]
mod tests;
