//! Movement and metabolic decay.
//!
//! Non-plants occasionally pick a new random heading, integrate position,
//! bounce off the arena edges and pay the movement cost. Every organism pays
//! the base metabolic cost and counts its digestion timer down.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ecosim_core::components::{Body, Digestion, Energy, Organism};
use ecosim_core::config::EnergyParams;
use ecosim_core::constants::DIRECTION_CHANGE_CHANCE;
use ecosim_core::types::{Arena, Position, Velocity};

use crate::world_setup::random_velocity;

pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    arena: &Arena,
    energy_params: &EnergyParams,
    time_factor: f64,
) {
    let turn_chance = (DIRECTION_CHANGE_CHANCE * time_factor).clamp(0.0, 1.0);

    for (_entity, (organism, pos, vel, body, energy, digestion)) in world.query_mut::<(
        &Organism,
        &mut Position,
        &mut Velocity,
        &Body,
        &mut Energy,
        &mut Digestion,
    )>() {
        if !organism.kind.is_plant() {
            if rng.gen_bool(turn_chance) {
                *vel = random_velocity(rng, body.speed);
            }

            pos.x += vel.dx * time_factor;
            pos.y += vel.dy * time_factor;
            bounce(pos, vel, arena, body.size);

            energy.0 -= energy_params.move_cost * time_factor;
        }

        energy.0 -= energy_params.base_cost * time_factor;

        if digestion.remaining > 0.0 {
            digestion.remaining -= time_factor;
        }
    }
}

/// Reflective boundary handling, independently per axis: clamp to the edge
/// and negate the velocity component that crossed it.
pub fn bounce(pos: &mut Position, vel: &mut Velocity, arena: &Arena, size: f64) {
    let max_x = arena.max_x(size);
    let max_y = arena.max_y(size);

    if pos.x < 0.0 {
        pos.x = 0.0;
        vel.dx = -vel.dx;
    } else if pos.x > max_x {
        pos.x = max_x;
        vel.dx = -vel.dx;
    }

    if pos.y < 0.0 {
        pos.y = 0.0;
        vel.dy = -vel.dy;
    } else if pos.y > max_y {
        pos.y = max_y;
        vel.dy = -vel.dy;
    }

    if !pos.is_finite() {
        debug_assert!(false, "non-finite position after movement: {pos:?}");
        *pos = arena.clamp(*pos, size);
        *vel = Velocity::default();
    }
}

/// Re-clamp every organism into new arena bounds.
pub fn clamp_all(world: &mut World, arena: &Arena) {
    for (_entity, (pos, body)) in world.query_mut::<(&mut Position, &Body)>() {
        *pos = arena.clamp(*pos, body.size);
    }
}
