//! Driver configuration, loaded from an optional JSON file.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use ecosim_core::config::SimConfig;
use ecosim_core::enums::OrganismKind;

/// One initial spawn request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub kind: OrganismKind,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sim: SimConfig,
    pub initial_population: Vec<SpawnRequest>,
    /// Wall-clock run time. 0 runs until the ecosystem dies out.
    pub run_secs: f64,
    /// Log population stats every this many ticks. 0 disables reports.
    pub report_interval_ticks: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let spawn = |kind, count| SpawnRequest { kind, count };
        Self {
            sim: SimConfig::default(),
            initial_population: vec![
                spawn(OrganismKind::Plant, 60),
                spawn(OrganismKind::Herbivore, 25),
                spawn(OrganismKind::Carnivore, 6),
                spawn(OrganismKind::Omnivore, 8),
            ],
            run_secs: 10.0,
            report_interval_ticks: 60,
        }
    }
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid app config JSON")?;
        config.sim.validate()?;
        anyhow::ensure!(
            config.run_secs.is_finite() && config.run_secs >= 0.0,
            "run_secs must be a non-negative number, got {}",
            config.run_secs
        );
        Ok(config)
    }

    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&json)
    }
}
