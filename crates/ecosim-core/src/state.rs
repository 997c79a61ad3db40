//! Simulation snapshot: the complete visible state handed to the
//! presentation layer after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Arena, OrganismId, SimTime};

/// Read-only view of the simulation after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub arena: Arena,
    /// Alive organisms, sorted by id.
    pub organisms: Vec<OrganismView>,
    pub links: Vec<LinkView>,
    /// Events produced by the tick that built this snapshot.
    pub events: Vec<SimEvent>,
    pub stats: PopulationStats,
}

/// A single organism as the renderer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganismView {
    pub id: OrganismId,
    pub kind: OrganismKind,
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub size: f64,
    pub energy: f64,
    /// `energy / START_ENERGY` clamped to `[0.3, 1.0]` (suggested opacity).
    pub energy_ratio: f64,
    /// Energy above 1.5x the starting energy.
    pub high_energy: bool,
    /// Still digesting its last meal.
    pub digesting: bool,
}

/// Proximity link between two organisms, endpoints at organism centres.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkView {
    pub a: OrganismId,
    pub b: OrganismId,
    pub category: LinkCategory,
    pub ax: f64,
    pub ay: f64,
    pub bx: f64,
    pub by: f64,
    pub length: f64,
    /// Rotation from `a` to `b` in radians.
    pub angle: f64,
}

/// Counters for the statistics panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub plants: u32,
    pub herbivores: u32,
    pub carnivores: u32,
    pub omnivores: u32,
    pub total: u32,
    /// Mean energy over alive organisms, 0 when empty.
    pub average_energy: f64,
}

impl SimSnapshot {
    pub fn organism(&self, id: OrganismId) -> Option<&OrganismView> {
        self.organisms
            .binary_search_by_key(&id, |o| o.id)
            .ok()
            .map(|idx| &self.organisms[idx])
    }
}
