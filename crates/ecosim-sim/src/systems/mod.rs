//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only
//! work). They do not own state; all state lives in components or is passed
//! in by the engine.

pub mod cleanup;
pub mod feeding;
pub mod growth;
pub mod links;
pub mod movement;
pub mod reproduction;
pub mod snapshot;
