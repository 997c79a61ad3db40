//! Link builder: proximity pairs for display.
//!
//! Every pair of organisms in neighbouring grid cells whose positions are
//! closer than `LINK_RADIUS` is linked once. Links have no effect on the
//! simulation and are rebuilt from scratch whenever they are needed.

use std::collections::HashMap;

use glam::DVec2;
use hecs::{Entity, World};

use ecosim_core::components::{Body, Organism};
use ecosim_core::constants::LINK_RADIUS;
use ecosim_core::enums::{LinkCategory, OrganismKind};
use ecosim_core::state::LinkView;
use ecosim_core::types::{OrganismId, Position};

use crate::spatial::SpatialGrid;

struct Node {
    id: OrganismId,
    kind: OrganismKind,
    pos: DVec2,
    half_size: f64,
}

/// Rebuild `links` from the grid. The grid must be current for `world`.
pub fn run(world: &World, grid: &SpatialGrid, links: &mut Vec<LinkView>) {
    links.clear();

    let nodes: HashMap<Entity, Node> = world
        .query::<(&Organism, &Position, &Body)>()
        .iter()
        .map(|(entity, (organism, pos, body))| {
            (
                entity,
                Node {
                    id: organism.id,
                    kind: organism.kind,
                    pos: pos.as_dvec2(),
                    half_size: body.size / 2.0,
                },
            )
        })
        .collect();

    grid.for_each_neighbour_pair(|a, b| {
        let (Some(a), Some(b)) = (nodes.get(&a), nodes.get(&b)) else {
            return;
        };
        // Each unordered pair is visited twice; keep one orientation.
        if a.id >= b.id {
            return;
        }
        let delta = b.pos - a.pos;
        let length = delta.length();
        if length >= LINK_RADIUS {
            return;
        }
        let start = a.pos + DVec2::splat(a.half_size);
        let end = b.pos + DVec2::splat(b.half_size);
        links.push(LinkView {
            a: a.id,
            b: b.id,
            category: LinkCategory::between(a.kind, b.kind),
            ax: start.x,
            ay: start.y,
            bx: end.x,
            by: end.y,
            length,
            angle: delta.y.atan2(delta.x),
        });
    });
}
