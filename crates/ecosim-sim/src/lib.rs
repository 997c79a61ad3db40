//! Simulation engine for the ecosystem.
//!
//! Owns the hecs ECS world, runs systems once per tick,
//! and produces SimSnapshots for the presentation layer.

pub mod engine;
pub mod spatial;
pub mod systems;
pub mod world_setup;

pub use ecosim_core as core;
pub use engine::Simulation;
