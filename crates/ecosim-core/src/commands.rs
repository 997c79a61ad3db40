//! Commands sent from the presentation layer to the simulation.
//!
//! Commands are queued and applied at the next tick boundary, never mid-tick.

use serde::{Deserialize, Serialize};

use crate::enums::OrganismKind;

/// All possible control actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Add `count` organisms of `kind` at random positions (capped at 100).
    Spawn { kind: OrganismKind, count: i64 },
    /// Clear every organism and link, rewind the cycle counter, resume.
    Reset,
    /// Suspend the update cycle.
    Pause,
    /// Resume the update cycle.
    Resume,
    /// Flip between paused and running.
    TogglePause,
    /// The viewport changed size; re-clamp every organism.
    Resize { width: f64, height: f64 },
}
