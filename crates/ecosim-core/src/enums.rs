//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Organism type. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrganismKind {
    Plant,
    Herbivore,
    Carnivore,
    Omnivore,
}

impl OrganismKind {
    pub const ALL: [OrganismKind; 4] = [
        OrganismKind::Plant,
        OrganismKind::Herbivore,
        OrganismKind::Carnivore,
        OrganismKind::Omnivore,
    ];

    /// Radius/box dimension used for bounds clamping and feeding reach.
    pub fn size(self) -> f64 {
        match self {
            OrganismKind::Plant => 10.0,
            _ => 15.0,
        }
    }

    /// Maximum velocity magnitude per axis.
    pub fn speed(self) -> f64 {
        match self {
            OrganismKind::Plant => 0.0,
            OrganismKind::Herbivore => 0.8,
            OrganismKind::Carnivore => 1.2,
            OrganismKind::Omnivore => 1.0,
        }
    }

    pub fn is_plant(self) -> bool {
        self == OrganismKind::Plant
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrganismKind::Plant => "plant",
            OrganismKind::Herbivore => "herbivore",
            OrganismKind::Carnivore => "carnivore",
            OrganismKind::Omnivore => "omnivore",
        }
    }
}

impl fmt::Display for OrganismKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrganismKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plant" => Ok(OrganismKind::Plant),
            "herbivore" => Ok(OrganismKind::Herbivore),
            "carnivore" => Ok(OrganismKind::Carnivore),
            "omnivore" => Ok(OrganismKind::Omnivore),
            _ => Err(ValidationError::UnknownKind(s.to_string())),
        }
    }
}

/// Run state of the update cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Running,
    Paused,
}

/// What an organism ate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodKind {
    Plant,
    Meat,
}

/// Relationship shown by a proximity link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkCategory {
    /// Herbivore next to a plant.
    Grazing,
    /// Carnivore next to a herbivore or omnivore.
    Predation,
    Neutral,
}

impl LinkCategory {
    /// Category for an unordered pair of kinds.
    pub fn between(a: OrganismKind, b: OrganismKind) -> Self {
        use OrganismKind::*;
        match (a, b) {
            (Herbivore, Plant) | (Plant, Herbivore) => LinkCategory::Grazing,
            (Carnivore, Herbivore | Omnivore) | (Herbivore | Omnivore, Carnivore) => {
                LinkCategory::Predation
            }
            _ => LinkCategory::Neutral,
        }
    }
}
