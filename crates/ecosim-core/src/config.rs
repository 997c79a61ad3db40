//! Simulation configuration.
//!
//! Every field has a default, so a JSON config only needs the values it
//! overrides.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::Arena;

/// Energy economy tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyParams {
    pub plant_gain: f64,
    pub herbivore_gain: f64,
    pub carnivore_gain: f64,
    pub omnivore_plant_gain: f64,
    pub omnivore_meat_gain: f64,
    pub move_cost: f64,
    pub base_cost: f64,
    pub reproduce_cost: f64,
    pub start_energy: f64,
}

impl Default for EnergyParams {
    fn default() -> Self {
        Self {
            plant_gain: PLANT_GAIN,
            herbivore_gain: HERBIVORE_GAIN,
            carnivore_gain: CARNIVORE_GAIN,
            omnivore_plant_gain: OMNIVORE_PLANT_GAIN,
            omnivore_meat_gain: OMNIVORE_MEAT_GAIN,
            move_cost: MOVE_COST,
            base_cost: BASE_COST,
            reproduce_cost: REPRODUCE_COST,
            start_energy: START_ENERGY,
        }
    }
}

impl EnergyParams {
    /// Organisms at or above this energy do not look for food.
    pub fn hunger_threshold(&self) -> f64 {
        self.start_energy * HUNGER_RATIO
    }
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same simulation.
    pub seed: u64,
    pub arena: Arena,
    pub grid_cell_size: f64,
    /// Global population cap; 0 disables it.
    pub max_population: usize,
    pub energy: EnergyParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arena: Arena::default(),
            grid_cell_size: GRID_CELL_SIZE,
            max_population: DEFAULT_MAX_POPULATION,
            energy: EnergyParams::default(),
        }
    }
}

impl SimConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Largest radius any neighbour query uses.
    pub fn max_query_radius(&self) -> f64 {
        let reach = crate::enums::OrganismKind::ALL
            .iter()
            .map(|k| k.size() + FEEDING_REACH)
            .fold(0.0, f64::max);
        reach.max(LINK_RADIUS)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_arena(self.arena.width, self.arena.height)?;
        if !(self.grid_cell_size.is_finite() && self.grid_cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize(self.grid_cell_size));
        }
        let radius = self.max_query_radius();
        if self.grid_cell_size < radius {
            return Err(ConfigError::CellSmallerThanRadius {
                cell_size: self.grid_cell_size,
                radius,
            });
        }
        Ok(())
    }
}

/// Check viewport dimensions before they become arena bounds.
pub fn validate_arena(width: f64, height: f64) -> Result<(), ConfigError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidArena { width, height })
    }
}
