//! Feeding resolver: grazing and predation.
//!
//! Herbivores resolve first, then carnivores, then omnivores, so an earlier
//! kind wins a contested target within the same tick. A hungry organism
//! (below `START_ENERGY * 0.75`) that is not digesting looks for the first
//! suitable target within `size + 5` and eats it:
//!
//! | eater | target | eater gains | target |
//! |---|---|---|---|
//! | herbivore | plant | `herbivore_gain` | energy set to 0 |
//! | carnivore | herbivore, else omnivore | `carnivore_gain` | loses 2x gain |
//! | omnivore | herbivore | `omnivore_meat_gain` | loses 2x gain |
//! | omnivore | plant (no herbivore in reach) | `omnivore_plant_gain` | energy set to 0 |
//!
//! Killed targets stay in the world until the death sweep and are still
//! valid targets for the rest of the pass, so several eaters can feed on the
//! same plant or prey within one tick.

use hecs::{Entity, World};

use ecosim_core::components::{Body, Digestion, Energy, Organism};
use ecosim_core::config::EnergyParams;
use ecosim_core::constants::{DIGESTION_TICKS, FEEDING_REACH, PREDATION_LOSS_FACTOR};
use ecosim_core::enums::{FoodKind, OrganismKind};
use ecosim_core::events::SimEvent;
use ecosim_core::types::{OrganismId, Position};

use crate::spatial::SpatialGrid;

/// Order in which eater kinds are resolved.
const FEEDING_ORDER: [OrganismKind; 3] = [
    OrganismKind::Herbivore,
    OrganismKind::Carnivore,
    OrganismKind::Omnivore,
];

struct Eater {
    id: OrganismId,
    kind: OrganismKind,
    pos: Position,
    reach: f64,
    energy: f64,
    digesting: bool,
}

struct Meal {
    target: Entity,
    food: FoodKind,
    gain: f64,
}

/// Resolve feeding for every eligible organism. Returns the number of meals.
pub fn run(
    world: &mut World,
    grid: &SpatialGrid,
    params: &EnergyParams,
    events: &mut Vec<SimEvent>,
) -> usize {
    let mut meals = 0;

    for kind in FEEDING_ORDER {
        let eaters: Vec<Entity> = world
            .query::<&Organism>()
            .iter()
            .filter(|(_, organism)| organism.kind == kind)
            .map(|(entity, _)| entity)
            .collect();

        for entity in eaters {
            let Some(eater) = eater_state(world, entity) else {
                continue;
            };
            if eater.energy >= params.hunger_threshold() || eater.digesting {
                continue;
            }
            let Some(meal) = choose_meal(world, grid, entity, &eater, params) else {
                continue;
            };
            apply_meal(world, entity, &eater, &meal, events);
            meals += 1;
        }
    }

    meals
}

fn eater_state(world: &World, entity: Entity) -> Option<Eater> {
    let mut query = world
        .query_one::<(&Organism, &Position, &Body, &Energy, &Digestion)>(entity)
        .ok()?;
    let (organism, pos, body, energy, digestion) = query.get()?;
    Some(Eater {
        id: organism.id,
        kind: organism.kind,
        pos: *pos,
        reach: body.size + FEEDING_REACH,
        energy: energy.0,
        digesting: digestion.is_digesting(),
    })
}

fn choose_meal(
    world: &World,
    grid: &SpatialGrid,
    entity: Entity,
    eater: &Eater,
    params: &EnergyParams,
) -> Option<Meal> {
    let find = |kind| grid.query_nearest(world, entity, &eater.pos, kind, eater.reach);
    let meal = |target, food, gain| Meal { target, food, gain };

    match eater.kind {
        OrganismKind::Herbivore => {
            find(OrganismKind::Plant).map(|t| meal(t, FoodKind::Plant, params.herbivore_gain))
        }
        OrganismKind::Carnivore => find(OrganismKind::Herbivore)
            .or_else(|| find(OrganismKind::Omnivore))
            .map(|t| meal(t, FoodKind::Meat, params.carnivore_gain)),
        OrganismKind::Omnivore => find(OrganismKind::Herbivore)
            .map(|t| meal(t, FoodKind::Meat, params.omnivore_meat_gain))
            .or_else(|| {
                find(OrganismKind::Plant)
                    .map(|t| meal(t, FoodKind::Plant, params.omnivore_plant_gain))
            }),
        OrganismKind::Plant => None,
    }
}

fn apply_meal(
    world: &mut World,
    entity: Entity,
    eater: &Eater,
    meal: &Meal,
    events: &mut Vec<SimEvent>,
) {
    if let Ok(mut energy) = world.get::<&mut Energy>(entity) {
        energy.0 += meal.gain;
    }
    if let Ok(mut digestion) = world.get::<&mut Digestion>(entity) {
        digestion.remaining = DIGESTION_TICKS;
    }
    if let Ok(mut prey_energy) = world.get::<&mut Energy>(meal.target) {
        match meal.food {
            FoodKind::Plant => prey_energy.0 = 0.0,
            FoodKind::Meat => prey_energy.0 -= meal.gain * PREDATION_LOSS_FACTOR,
        }
    }
    if let Ok(prey) = world.get::<&Organism>(meal.target) {
        events.push(SimEvent::Fed {
            organism: eater.id,
            prey: prey.id,
            food: meal.food,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecosim_core::components::Body;
    use ecosim_core::types::Velocity;

    fn spawn(world: &mut World, id: u64, kind: OrganismKind, x: f64, energy: f64) -> Entity {
        world.spawn((
            Organism {
                id: OrganismId(id),
                kind,
            },
            Position::new(x, 50.0),
            Velocity::default(),
            Body::for_kind(kind),
            Energy(energy),
            Digestion::default(),
        ))
    }

    fn resolve(world: &mut World) -> Vec<SimEvent> {
        let mut grid = SpatialGrid::new(100.0);
        grid.rebuild(world);
        let mut events = Vec::new();
        run(world, &grid, &EnergyParams::default(), &mut events);
        events
    }

    fn energy(world: &World, entity: Entity) -> f64 {
        world.get::<&Energy>(entity).unwrap().0
    }

    #[test]
    fn test_carnivore_gain_and_prey_loss() {
        let mut world = World::new();
        let carnivore = spawn(&mut world, 1, OrganismKind::Carnivore, 50.0, 20.0);
        let herbivore = spawn(&mut world, 2, OrganismKind::Herbivore, 60.0, 80.0);

        let events = resolve(&mut world);

        assert_eq!(energy(&world, carnivore), 45.0);
        assert_eq!(energy(&world, herbivore), 30.0);
        assert_eq!(world.get::<&Digestion>(carnivore).unwrap().remaining, DIGESTION_TICKS);
        assert_eq!(
            events,
            vec![SimEvent::Fed {
                organism: OrganismId(1),
                prey: OrganismId(2),
                food: FoodKind::Meat,
            }]
        );
    }

    #[test]
    fn test_carnivore_falls_back_to_omnivore() {
        let mut world = World::new();
        let carnivore = spawn(&mut world, 1, OrganismKind::Carnivore, 50.0, 20.0);
        let omnivore = spawn(&mut world, 2, OrganismKind::Omnivore, 60.0, 80.0);

        resolve(&mut world);

        assert_eq!(energy(&world, carnivore), 45.0);
        assert_eq!(energy(&world, omnivore), 30.0);
    }

    #[test]
    fn test_herbivore_kills_plant_outright() {
        let mut world = World::new();
        let herbivore = spawn(&mut world, 1, OrganismKind::Herbivore, 50.0, 25.0);
        let plant = spawn(&mut world, 2, OrganismKind::Plant, 55.0, 50.0);

        resolve(&mut world);

        assert_eq!(energy(&world, herbivore), 45.0);
        assert_eq!(energy(&world, plant), 0.0);
    }

    #[test]
    fn test_omnivore_prefers_meat() {
        let mut world = World::new();
        let omnivore = spawn(&mut world, 1, OrganismKind::Omnivore, 50.0, 20.0);
        let plant = spawn(&mut world, 2, OrganismKind::Plant, 52.0, 50.0);
        let herbivore = spawn(&mut world, 3, OrganismKind::Herbivore, 60.0, 100.0);

        let events = resolve(&mut world);

        assert_eq!(energy(&world, omnivore), 40.0);
        assert_eq!(energy(&world, herbivore), 60.0);
        assert_eq!(energy(&world, plant), 50.0);
        assert!(matches!(
            events[0],
            SimEvent::Fed {
                food: FoodKind::Meat,
                ..
            }
        ));
    }

    #[test]
    fn test_omnivore_grazes_without_meat() {
        let mut world = World::new();
        let omnivore = spawn(&mut world, 1, OrganismKind::Omnivore, 50.0, 20.0);
        let plant = spawn(&mut world, 2, OrganismKind::Plant, 52.0, 50.0);

        resolve(&mut world);

        assert_eq!(energy(&world, omnivore), 30.0);
        assert_eq!(energy(&world, plant), 0.0);
    }

    #[test]
    fn test_digesting_organism_does_not_feed() {
        let mut world = World::new();
        let carnivore = spawn(&mut world, 1, OrganismKind::Carnivore, 50.0, 20.0);
        let herbivore = spawn(&mut world, 2, OrganismKind::Herbivore, 55.0, 80.0);
        world.get::<&mut Digestion>(carnivore).unwrap().remaining = 0.5;

        let events = resolve(&mut world);

        assert!(events.is_empty());
        assert_eq!(energy(&world, carnivore), 20.0);
        assert_eq!(energy(&world, herbivore), 80.0);
    }

    #[test]
    fn test_sated_organism_does_not_feed() {
        let mut world = World::new();
        // 37.5 is exactly the hunger threshold, which is not hungry.
        let herbivore = spawn(&mut world, 1, OrganismKind::Herbivore, 50.0, 37.5);
        spawn(&mut world, 2, OrganismKind::Plant, 55.0, 50.0);

        assert!(resolve(&mut world).is_empty());
        assert_eq!(energy(&world, herbivore), 37.5);
    }

    #[test]
    fn test_target_out_of_reach() {
        let mut world = World::new();
        // Herbivore reach is 15 + 5 = 20.
        spawn(&mut world, 1, OrganismKind::Herbivore, 50.0, 20.0);
        spawn(&mut world, 2, OrganismKind::Plant, 70.0, 50.0);

        assert!(resolve(&mut world).is_empty());
    }

    #[test]
    fn test_contested_plant_feeds_every_eater() {
        let mut world = World::new();
        let first = spawn(&mut world, 1, OrganismKind::Herbivore, 45.0, 20.0);
        let second = spawn(&mut world, 2, OrganismKind::Herbivore, 55.0, 20.0);
        let plant = spawn(&mut world, 3, OrganismKind::Plant, 50.0, 50.0);

        let events = resolve(&mut world);

        // The plant is at 0 after the first meal but stays edible until the sweep.
        assert_eq!(events.len(), 2);
        assert_eq!(energy(&world, first), 40.0);
        assert_eq!(energy(&world, second), 40.0);
        assert_eq!(energy(&world, plant), 0.0);
    }

    #[test]
    fn test_omnivore_grazes_plant_killed_earlier_in_pass() {
        let mut world = World::new();
        // The herbivore is out of the omnivore's reach; the plant is within both.
        let omnivore = spawn(&mut world, 1, OrganismKind::Omnivore, 32.0, 20.0);
        let herbivore = spawn(&mut world, 2, OrganismKind::Herbivore, 55.0, 20.0);
        spawn(&mut world, 3, OrganismKind::Plant, 50.0, 50.0);

        let events = resolve(&mut world);

        assert_eq!(events.len(), 2);
        assert_eq!(energy(&world, herbivore), 40.0);
        assert_eq!(energy(&world, omnivore), 30.0);
    }

    #[test]
    fn test_starved_prey_is_still_eaten() {
        let mut world = World::new();
        let carnivore = spawn(&mut world, 1, OrganismKind::Carnivore, 50.0, 20.0);
        let herbivore = spawn(&mut world, 2, OrganismKind::Herbivore, 55.0, -0.05);

        let events = resolve(&mut world);

        assert_eq!(events.len(), 1);
        assert_eq!(energy(&world, carnivore), 45.0);
        assert!(energy(&world, herbivore) < 0.0);
    }
}
