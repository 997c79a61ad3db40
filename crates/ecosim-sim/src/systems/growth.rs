//! Plant growth: every plant gains energy each tick.

use hecs::World;

use ecosim_core::components::{Energy, Organism};

pub fn run(world: &mut World, plant_gain: f64, time_factor: f64) {
    for (_entity, (organism, energy)) in world.query_mut::<(&Organism, &mut Energy)>() {
        if organism.kind.is_plant() {
            energy.0 += plant_gain * time_factor;
        }
    }
}
