//! Core types and definitions for the tactical trainer simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, detection records, commands, snapshots, events,
//! catalogs, errors and constants. It has no dependency on any runtime
//! framework.

pub mod catalog;
pub mod commands;
pub mod components;
pub mod constants;
pub mod detections;
pub mod enums;
pub mod error;
pub mod events;
pub mod geo;
pub mod state;
pub mod types;
