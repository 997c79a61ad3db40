//! ECS components for hecs entities.
//!
//! Components are plain data structs. Simulation logic lives in systems.
//! `Position` and `Velocity` from `types` are components as well.

use serde::{Deserialize, Serialize};

use crate::enums::OrganismKind;
use crate::types::OrganismId;

/// Identity of an organism. Immutable after spawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Organism {
    pub id: OrganismId,
    pub kind: OrganismKind,
}

/// Physical traits, inherited unchanged by offspring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    /// Box dimension used for bounds clamping and feeding reach.
    pub size: f64,
    /// Maximum per-axis velocity magnitude.
    pub speed: f64,
}

/// Energy reserve. May dip below zero within a tick; the death sweep
/// removes any organism at or below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Energy(pub f64);

/// Digestion countdown in ticks. Feeding is allowed once it reaches zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Digestion {
    pub remaining: f64,
}

impl Body {
    pub fn for_kind(kind: OrganismKind) -> Self {
        Self {
            size: kind.size(),
            speed: kind.speed(),
        }
    }
}

impl Digestion {
    pub fn is_digesting(&self) -> bool {
        self.remaining > 0.0
    }
}
