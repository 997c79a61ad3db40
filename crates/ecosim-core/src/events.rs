//! Discrete outcomes emitted during a tick, for presentation feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{FoodKind, OrganismKind};
use crate::types::OrganismId;

/// Something that happened to an organism this tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// `organism` fed on `prey`.
    Fed {
        organism: OrganismId,
        prey: OrganismId,
        food: FoodKind,
    },
    /// `parent` produced `offspring`.
    Born {
        parent: OrganismId,
        offspring: OrganismId,
        kind: OrganismKind,
    },
    /// Removed by the death sweep.
    Died {
        organism: OrganismId,
        kind: OrganismKind,
    },
}
