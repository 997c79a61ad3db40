//! Snapshot system: queries the ECS world and builds a complete SimSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use ecosim_core::components::{Body, Digestion, Energy, Organism};
use ecosim_core::constants::{HIGH_ENERGY_RATIO, MIN_ENERGY_RATIO};
use ecosim_core::enums::{OrganismKind, SimPhase};
use ecosim_core::events::SimEvent;
use ecosim_core::state::{LinkView, OrganismView, PopulationStats, SimSnapshot};
use ecosim_core::types::{Arena, Position, SimTime, Velocity};

/// Build a complete SimSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: SimPhase,
    arena: &Arena,
    start_energy: f64,
    links: &[LinkView],
    events: Vec<SimEvent>,
) -> SimSnapshot {
    let organisms = build_organisms(world, start_energy);
    let stats = build_stats(&organisms);

    SimSnapshot {
        time: *time,
        phase,
        arena: *arena,
        organisms,
        links: links.to_vec(),
        events,
        stats,
    }
}

/// Build OrganismView list, sorted by id.
fn build_organisms(world: &World, start_energy: f64) -> Vec<OrganismView> {
    let mut organisms: Vec<OrganismView> = world
        .query::<(&Organism, &Position, &Velocity, &Body, &Energy, &Digestion)>()
        .iter()
        .map(|(_, (organism, pos, vel, body, energy, digestion))| OrganismView {
            id: organism.id,
            kind: organism.kind,
            x: pos.x,
            y: pos.y,
            dx: vel.dx,
            dy: vel.dy,
            size: body.size,
            energy: energy.0,
            energy_ratio: (energy.0 / start_energy).clamp(MIN_ENERGY_RATIO, 1.0),
            high_energy: energy.0 > start_energy * HIGH_ENERGY_RATIO,
            digesting: digestion.is_digesting(),
        })
        .collect();

    organisms.sort_by_key(|o| o.id);
    organisms
}

/// Count organisms per kind and average their energy.
pub fn build_stats(organisms: &[OrganismView]) -> PopulationStats {
    let mut stats = PopulationStats::default();
    let mut total_energy = 0.0;

    for organism in organisms {
        match organism.kind {
            OrganismKind::Plant => stats.plants += 1,
            OrganismKind::Herbivore => stats.herbivores += 1,
            OrganismKind::Carnivore => stats.carnivores += 1,
            OrganismKind::Omnivore => stats.omnivores += 1,
        }
        total_energy += organism.energy;
    }

    stats.total = organisms.len() as u32;
    if stats.total > 0 {
        stats.average_energy = total_energy / stats.total as f64;
    }
    stats
}
