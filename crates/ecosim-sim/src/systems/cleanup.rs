//! Death sweep: removes every organism whose energy is at or below zero.

use hecs::{Entity, World};

use ecosim_core::components::{Energy, Organism};
use ecosim_core::events::SimEvent;

/// Despawn dead organisms, emitting a `Died` event for each.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
/// Returns the number removed.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, events: &mut Vec<SimEvent>) -> usize {
    despawn_buffer.clear();

    for (entity, (organism, energy)) in world.query_mut::<(&Organism, &Energy)>() {
        // NaN counts as dead.
        if !(energy.0 > 0.0) {
            despawn_buffer.push(entity);
            events.push(SimEvent::Died {
                organism: organism.id,
                kind: organism.kind,
            });
        }
    }

    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        // Collected from a live query just above, so always present.
        world.despawn(entity).ok();
    }
    removed
}
