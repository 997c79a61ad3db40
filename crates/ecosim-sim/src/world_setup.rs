//! Organism spawn factories.
//!
//! Creates organism entities with the full component bundle and
//! kind-dependent traits.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ecosim_core::components::{Body, Digestion, Energy, Organism};
use ecosim_core::constants::OFFSPRING_JITTER;
use ecosim_core::enums::OrganismKind;
use ecosim_core::types::{Arena, OrganismId, Position, Velocity};

/// Hands out organism ids. Never rewinds, so ids are not reused.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> OrganismId {
        self.next += 1;
        OrganismId(self.next)
    }
}

/// Random per-axis velocity in `[-speed/2, speed/2)`. Zero for plants.
pub fn random_velocity(rng: &mut ChaCha8Rng, speed: f64) -> Velocity {
    if speed == 0.0 {
        return Velocity::default();
    }
    Velocity::new(
        (rng.gen::<f64>() - 0.5) * speed,
        (rng.gen::<f64>() - 0.5) * speed,
    )
}

/// Spawn an organism with explicit position, velocity and energy.
/// The position is clamped into the arena.
pub fn spawn_at(
    world: &mut World,
    ids: &mut IdAllocator,
    arena: &Arena,
    kind: OrganismKind,
    pos: Position,
    velocity: Velocity,
    energy: f64,
) -> (Entity, OrganismId) {
    let body = Body::for_kind(kind);
    let id = ids.next_id();
    let velocity = if kind.is_plant() {
        Velocity::default()
    } else {
        velocity
    };
    let entity = world.spawn((
        Organism { id, kind },
        arena.clamp(pos, body.size),
        velocity,
        body,
        Energy(energy),
        Digestion::default(),
    ));
    (entity, id)
}

/// Spawn an organism at a uniformly random position inside the arena.
pub fn spawn_random(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    ids: &mut IdAllocator,
    arena: &Arena,
    kind: OrganismKind,
    energy: f64,
) -> (Entity, OrganismId) {
    let size = kind.size();
    let pos = Position::new(
        rng.gen::<f64>() * arena.max_x(size),
        rng.gen::<f64>() * arena.max_y(size),
    );
    let velocity = random_velocity(rng, kind.speed());
    spawn_at(world, ids, arena, kind, pos, velocity, energy)
}

/// Components for an offspring of a parent at `parent_pos`, placed with
/// uniform jitter and clamped to the arena. Traits are inherited unchanged.
pub fn offspring_bundle(
    rng: &mut ChaCha8Rng,
    ids: &mut IdAllocator,
    arena: &Arena,
    kind: OrganismKind,
    body: Body,
    parent_pos: &Position,
    energy: f64,
) -> (Organism, Position, Velocity, Body, Energy, Digestion) {
    let jittered = Position::new(
        parent_pos.x + rng.gen_range(-OFFSPRING_JITTER..OFFSPRING_JITTER),
        parent_pos.y + rng.gen_range(-OFFSPRING_JITTER..OFFSPRING_JITTER),
    );
    let velocity = random_velocity(rng, body.speed);
    (
        Organism {
            id: ids.next_id(),
            kind,
        },
        arena.clamp(jittered, body.size),
        velocity,
        body,
        Energy(energy),
        Digestion::default(),
    )
}
