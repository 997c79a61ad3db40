//! Reproduction resolver.
//!
//! Any organism with more than `reproduce_cost` energy has a 1% chance per
//! tick to pay that cost and produce one offspring of its kind. Offspring are
//! collected during the pass and only added to the world afterwards, so no
//! parent sees a same-tick sibling.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use ecosim_core::components::{Body, Energy, Organism};
use ecosim_core::constants::REPRODUCE_CHANCE;
use ecosim_core::events::SimEvent;
use ecosim_core::types::{Arena, Position};

use crate::world_setup::{offspring_bundle, IdAllocator};

/// Run one reproduction pass. `max_population` of 0 means uncapped.
/// Returns the number of births.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    ids: &mut IdAllocator,
    arena: &Arena,
    reproduce_cost: f64,
    max_population: usize,
    events: &mut Vec<SimEvent>,
) -> usize {
    let population = world.len() as usize;
    let mut offspring = Vec::new();
    let mut capped = false;

    for (_entity, (organism, pos, body, energy)) in
        world.query_mut::<(&Organism, &Position, &Body, &mut Energy)>()
    {
        if energy.0 <= reproduce_cost || !rng.gen_bool(REPRODUCE_CHANCE) {
            continue;
        }
        if max_population > 0 && population + offspring.len() >= max_population {
            capped = true;
            continue;
        }

        energy.0 -= reproduce_cost;
        let bundle = offspring_bundle(
            rng,
            ids,
            arena,
            organism.kind,
            *body,
            pos,
            reproduce_cost,
        );
        events.push(SimEvent::Born {
            parent: organism.id,
            offspring: bundle.0.id,
            kind: organism.kind,
        });
        offspring.push(bundle);
    }

    if capped {
        debug!(population, max_population, "population cap reached, births skipped");
    }

    let births = offspring.len();
    for bundle in offspring {
        world.spawn(bundle);
    }
    births
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecosim_core::components::Digestion;
    use ecosim_core::enums::OrganismKind;
    use ecosim_core::types::{OrganismId, Velocity};
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn populate(world: &mut World, ids: &mut IdAllocator, count: usize, energy: f64) {
        for i in 0..count {
            world.spawn((
                Organism {
                    id: ids.next_id(),
                    kind: OrganismKind::Herbivore,
                },
                Position::new((i % 40) as f64 * 10.0, (i / 40) as f64 * 10.0),
                Velocity::default(),
                Body::for_kind(OrganismKind::Herbivore),
                Energy(energy),
                Digestion::default(),
            ));
        }
    }

    #[test]
    fn test_parents_pay_and_offspring_start_at_cost() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ids = IdAllocator::default();
        let arena = Arena::new(500.0, 500.0);
        populate(&mut world, &mut ids, 1000, 100.0);

        let mut events = Vec::new();
        let mut births = 0;
        // Enough passes that some births are all but certain.
        for _ in 0..20 {
            births += run(&mut world, &mut rng, &mut ids, &arena, 30.0, 0, &mut events);
        }
        assert!(births > 0);
        assert_eq!(world.len() as usize, 1000 + births);

        let energies: HashMap<OrganismId, f64> = world
            .query::<(&Organism, &Energy)>()
            .iter()
            .map(|(_, (o, e))| (o.id, e.0))
            .collect();
        let mut births_per_parent: HashMap<OrganismId, u32> = HashMap::new();
        for event in &events {
            let SimEvent::Born { parent, offspring, .. } = event else {
                panic!("unexpected event {event:?}");
            };
            *births_per_parent.entry(*parent).or_default() += 1;
            // Offspring sit exactly at the threshold and cannot reproduce.
            assert_eq!(energies[offspring], 30.0);
        }
        for (parent, count) in births_per_parent {
            assert!(count <= 3);
            assert_eq!(energies[&parent], 100.0 - 30.0 * count as f64);
        }
    }

    #[test]
    fn test_population_cap_blocks_births() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut ids = IdAllocator::default();
        let arena = Arena::new(500.0, 500.0);
        populate(&mut world, &mut ids, 500, 100.0);

        let mut events = Vec::new();
        for _ in 0..50 {
            run(&mut world, &mut rng, &mut ids, &arena, 30.0, 505, &mut events);
            assert!(world.len() <= 505);
        }
    }

    #[test]
    fn test_low_energy_never_reproduces() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut ids = IdAllocator::default();
        let arena = Arena::new(500.0, 500.0);
        populate(&mut world, &mut ids, 200, 30.0);

        let mut events = Vec::new();
        for _ in 0..100 {
            assert_eq!(run(&mut world, &mut rng, &mut ids, &arena, 30.0, 0, &mut events), 0);
        }
        assert!(events.is_empty());
    }
}
