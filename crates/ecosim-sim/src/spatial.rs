//! Uniform-cell bucket index over organism positions.
//!
//! Rebuilt from scratch every tick. Buckets hold `hecs::Entity` handles,
//! never organism data, so a handle left over from a removed organism fails
//! the world lookup instead of aliasing a different one.

use std::collections::HashMap;

use hecs::{Entity, World};

use ecosim_core::components::Organism;
use ecosim_core::enums::OrganismKind;
use ecosim_core::types::Position;

/// Integer cell coordinate `(floor(x / cell), floor(y / cell))`.
pub type CellKey = (i64, i64);

#[derive(Debug, Clone, Copy)]
struct Occupant {
    entity: Entity,
    kind: OrganismKind,
}

/// Spatial hash over the organism registry.
#[derive(Debug)]
pub struct SpatialGrid {
    cell_size: f64,
    cells: HashMap<CellKey, Vec<Occupant>>,
    /// Non-empty cells in the order they were first filled.
    order: Vec<CellKey>,
}

impl SpatialGrid {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Cell containing `pos`.
    pub fn cell_of(&self, pos: &Position) -> CellKey {
        (
            (pos.x / self.cell_size).floor() as i64,
            (pos.y / self.cell_size).floor() as i64,
        )
    }

    /// Drop every bucket. Keeps allocations for the next rebuild.
    pub fn clear(&mut self) {
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
        self.order.clear();
    }

    /// Clear and re-insert every organism in the world.
    pub fn rebuild(&mut self, world: &World) {
        self.clear();
        for (entity, (organism, pos)) in world.query::<(&Organism, &Position)>().iter() {
            let key = self.cell_of(pos);
            let bucket = self.cells.entry(key).or_default();
            if bucket.is_empty() {
                self.order.push(key);
            }
            bucket.push(Occupant {
                entity,
                kind: organism.kind,
            });
        }
    }

    /// Number of indexed organisms.
    pub fn len(&self) -> usize {
        self.order.iter().map(|key| self.cells[key].len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// First organism of `kind`, other than `origin`, strictly closer than
    /// `max_distance` to `origin_pos`.
    ///
    /// Scans the origin's cell and its 8 neighbours, column by column, each
    /// bucket in insertion order, and returns the first match. This is
    /// first-found, not strictly nearest. Distances use current positions
    /// from the world, so an organism that moved since the rebuild is
    /// measured where it is now.
    pub fn query_nearest(
        &self,
        world: &World,
        origin: Entity,
        origin_pos: &Position,
        kind: OrganismKind,
        max_distance: f64,
    ) -> Option<Entity> {
        let (cx, cy) = self.cell_of(origin_pos);
        for x in cx - 1..=cx + 1 {
            for y in cy - 1..=cy + 1 {
                let Some(bucket) = self.cells.get(&(x, y)) else {
                    continue;
                };
                let found = bucket.iter().find(|occupant| {
                    occupant.kind == kind
                        && occupant.entity != origin
                        && world
                            .get::<&Position>(occupant.entity)
                            .map(|pos| origin_pos.distance_to(&pos) < max_distance)
                            .unwrap_or(false)
                });
                if let Some(occupant) = found {
                    return Some(occupant.entity);
                }
            }
        }
        None
    }

    /// Visit every indexed organism in its cell's 3x3 neighbourhood,
    /// cells in first-filled order. The visitor gets `(entity, neighbour)`
    /// for every ordered pair of distinct organisms in adjacent cells.
    pub fn for_each_neighbour_pair(&self, mut visitor: impl FnMut(Entity, Entity)) {
        for &(cx, cy) in &self.order {
            for a in &self.cells[&(cx, cy)] {
                for x in cx - 1..=cx + 1 {
                    for y in cy - 1..=cy + 1 {
                        let Some(bucket) = self.cells.get(&(x, y)) else {
                            continue;
                        };
                        for b in bucket {
                            if a.entity != b.entity {
                                visitor(a.entity, b.entity);
                            }
                        }
                    }
                }
            }
        }
    }
}
