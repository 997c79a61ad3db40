//! Tests for core types, validation, configuration and serialization.

use crate::commands::SimCommand;
use crate::config::{validate_arena, SimConfig};
use crate::constants::*;
use crate::enums::*;
use crate::error::{parse_spawn_count, validate_spawn_count, ConfigError, ValidationError};
use crate::events::SimEvent;
use crate::state::{PopulationStats, SimSnapshot};
use crate::types::{Arena, OrganismId, Position, SimTime};

// ---- Kind profiles ----

#[test]
fn test_kind_profiles_match_table() {
    assert_eq!(OrganismKind::Plant.size(), 10.0);
    assert_eq!(OrganismKind::Plant.speed(), 0.0);
    assert_eq!(OrganismKind::Herbivore.size(), 15.0);
    assert_eq!(OrganismKind::Herbivore.speed(), 0.8);
    assert_eq!(OrganismKind::Carnivore.speed(), 1.2);
    assert_eq!(OrganismKind::Omnivore.speed(), 1.0);
}

#[test]
fn test_kind_from_str() {
    assert_eq!("Plant".parse::<OrganismKind>().unwrap(), OrganismKind::Plant);
    assert_eq!(" omnivore ".parse::<OrganismKind>().unwrap(), OrganismKind::Omnivore);
    assert_eq!(
        "fungus".parse::<OrganismKind>(),
        Err(ValidationError::UnknownKind("fungus".into()))
    );
}

#[test]
fn test_link_category_is_symmetric() {
    use OrganismKind::*;
    for a in OrganismKind::ALL {
        for b in OrganismKind::ALL {
            assert_eq!(LinkCategory::between(a, b), LinkCategory::between(b, a));
        }
    }
    assert_eq!(LinkCategory::between(Plant, Herbivore), LinkCategory::Grazing);
    assert_eq!(LinkCategory::between(Omnivore, Carnivore), LinkCategory::Predation);
    assert_eq!(LinkCategory::between(Carnivore, Herbivore), LinkCategory::Predation);
    assert_eq!(LinkCategory::between(Omnivore, Plant), LinkCategory::Neutral);
    assert_eq!(LinkCategory::between(Carnivore, Carnivore), LinkCategory::Neutral);
}

// ---- Spawn count validation ----

#[test]
fn test_spawn_count_caps_at_100() {
    assert_eq!(validate_spawn_count(500), Ok(MAX_SPAWN_PER_REQUEST));
    assert_eq!(validate_spawn_count(1), Ok(1));
    assert_eq!(validate_spawn_count(100), Ok(100));
}

#[test]
fn test_spawn_count_rejects_non_positive() {
    assert_eq!(validate_spawn_count(0), Err(ValidationError::NonPositiveCount(0)));
    assert_eq!(validate_spawn_count(-3), Err(ValidationError::NonPositiveCount(-3)));
}

#[test]
fn test_parse_spawn_count() {
    assert_eq!(parse_spawn_count("7"), Ok(7));
    assert_eq!(parse_spawn_count("  12abc"), Ok(12));
    assert_eq!(parse_spawn_count("99999999999999999999999"), Ok(100));
    assert_eq!(parse_spawn_count("0"), Err(ValidationError::NonPositiveCount(0)));
    assert_eq!(parse_spawn_count("-4"), Err(ValidationError::NonPositiveCount(-4)));
    assert!(matches!(parse_spawn_count("abc"), Err(ValidationError::NotANumber(_))));
    assert!(matches!(parse_spawn_count(""), Err(ValidationError::NotANumber(_))));
    assert!(matches!(parse_spawn_count("-"), Err(ValidationError::NotANumber(_))));
}

// ---- Arena ----

#[test]
fn test_arena_clamp() {
    let arena = Arena::new(500.0, 400.0);
    let clamped = arena.clamp(Position::new(-5.0, 1000.0), 15.0);
    assert_eq!(clamped, Position::new(0.0, 385.0));
    assert!(arena.contains(&clamped, 15.0));

    let nan = arena.clamp(Position::new(f64::NAN, f64::INFINITY), 10.0);
    assert!(nan.is_finite());
    assert_eq!(nan.x, 0.0);
}

#[test]
fn test_arena_smaller_than_organism() {
    let arena = Arena::new(8.0, 8.0);
    let clamped = arena.clamp(Position::new(4.0, 4.0), 15.0);
    assert_eq!(clamped, Position::new(0.0, 0.0));
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    time.advance(1.0);
    time.advance(0.5);
    assert_eq!(time.tick, 2);
    assert!((time.elapsed_ms - 24.0).abs() < 1e-12);
}

// ---- Configuration ----

#[test]
fn test_default_config_is_valid() {
    SimConfig::default().validate().unwrap();
}

#[test]
fn test_config_partial_json_uses_defaults() {
    let config =
        SimConfig::from_json_str(r#"{ "seed": 7, "energy": { "plant_gain": 0.5 } }"#).unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.energy.plant_gain, 0.5);
    assert_eq!(config.energy.start_energy, START_ENERGY);
    assert_eq!(config.grid_cell_size, GRID_CELL_SIZE);
}

#[test]
fn test_config_rejects_small_cells() {
    let config = SimConfig {
        grid_cell_size: 50.0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::CellSmallerThanRadius { .. })
    ));
}

#[test]
fn test_config_rejects_bad_json() {
    assert!(matches!(
        SimConfig::from_json_str("{ seed: }"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_validate_arena() {
    assert!(validate_arena(640.0, 480.0).is_ok());
    assert!(validate_arena(0.0, 480.0).is_err());
    assert!(validate_arena(f64::NAN, 480.0).is_err());
}

// ---- Serialization ----

#[test]
fn test_command_tagged_json() {
    let json = r#"{"type":"Spawn","kind":"Herbivore","count":5}"#;
    let cmd: SimCommand = serde_json::from_str(json).unwrap();
    assert_eq!(
        cmd,
        SimCommand::Spawn {
            kind: OrganismKind::Herbivore,
            count: 5
        }
    );
    let reset: SimCommand = serde_json::from_str(r#"{"type":"Reset"}"#).unwrap();
    assert_eq!(reset, SimCommand::Reset);
}

#[test]
fn test_event_serializes_with_tag() {
    let event = SimEvent::Fed {
        organism: OrganismId(3),
        prey: OrganismId(9),
        food: FoodKind::Meat,
    };
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains(r#""type":"Fed""#), "got {json}");
}

#[test]
fn test_empty_snapshot_serializes() {
    let snapshot = SimSnapshot::default();
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: SimSnapshot = serde_json::from_str(&json).unwrap();
    assert!(back.organisms.is_empty());
    assert_eq!(back.stats, PopulationStats::default());
    assert_eq!(back.phase, SimPhase::Running);
}
