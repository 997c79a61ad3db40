//! Headless ecosystem driver.
//!
//! Owns the simulation on a dedicated game-loop thread and bridges a
//! presentation layer (or the bundled binary) to it via channels and a
//! shared latest-snapshot slot.

pub mod config;
pub mod control;
pub mod game_loop;
pub mod state;

pub use ecosim_core as core;
