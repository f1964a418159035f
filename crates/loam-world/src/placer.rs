use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::grid::TileGrid;
use crate::noise::{build_noise, layer_seed, sample01};
use crate::rules::{DecalLayer, EntityLayer};

/// Monotonic entity-uid source, owned by the orchestrator and threaded
/// through every stage that mints entities. Uids are never reused.
#[derive(Debug)]
pub struct UidAllocator {
    next: u64,
}

impl UidAllocator {
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    pub fn next_uid(&mut self) -> u64 {
        let uid = self.next;
        self.next += 1;
        uid
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedEntity {
    pub uid: u64,
    pub proto: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedDecal {
    pub decal_id: String,
    pub color: String,
    pub x: f64,
    pub y: f64,
}

/// Cells already claimed during one placement pass. Entities and decals
/// each get a fresh set.
struct Occupancy {
    width: usize,
    claimed: Vec<bool>,
}

impl Occupancy {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            claimed: vec![false; width * height],
        }
    }

    #[inline]
    fn contains(&self, x: usize, y: usize) -> bool {
        self.claimed[y * self.width + x]
    }

    #[inline]
    fn claim(&mut self, x: usize, y: usize) {
        self.claimed[y * self.width + x] = true;
    }
}

/// Run the entity layers over the grid, highest priority first, one
/// placement per cell, then wall off the outer ring unconditionally.
pub fn place_entities(
    grid: &TileGrid,
    layers: &[EntityLayer],
    seed_base: u64,
    wall_proto: &str,
    uids: &mut UidAllocator,
    rng: &mut impl Rng,
) -> BTreeMap<String, Vec<PlacedEntity>> {
    let (w, h) = (grid.width(), grid.height());
    let mut groups: BTreeMap<String, Vec<PlacedEntity>> = BTreeMap::new();
    let mut occupied = Occupancy::new(w, h);

    let mut order: Vec<&EntityLayer> = layers.iter().collect();
    order.sort_by_key(|l| std::cmp::Reverse(l.priority));

    for layer in order {
        let noise = build_noise(&layer.noise, layer_seed(seed_base, &layer.seed_key));
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                if occupied.contains(x, y) {
                    continue;
                }
                if sample01(&noise, x as i32, y as i32) > layer.threshold
                    && layer.condition.matches(grid.get(x, y))
                {
                    // Layers may target several interchangeable protos.
                    let proto = layer
                        .protos
                        .choose(rng)
                        .expect("entity layers are validated non-empty");
                    groups.entry(proto.clone()).or_default().push(PlacedEntity {
                        uid: uids.next_uid(),
                        proto: proto.clone(),
                        x: x as i32,
                        y: y as i32,
                    });
                    occupied.claim(x, y);
                }
            }
        }
    }

    // Indestructible perimeter, regardless of what the layers did.
    let walls = groups.entry(wall_proto.to_string()).or_default();
    for y in 0..h {
        for x in 0..w {
            if grid.is_border(x, y) {
                walls.push(PlacedEntity {
                    uid: uids.next_uid(),
                    proto: wall_proto.to_string(),
                    x: x as i32,
                    y: y as i32,
                });
            }
        }
    }

    for (proto, placed) in &groups {
        log::info!("placed {} {}", placed.len(), proto);
    }
    groups
}

/// Run the decal layers in declaration order. Each accepted cell gets a
/// deterministic sub-tile jitter from the layer's own noise field,
/// sampled at fixed coordinate offsets.
pub fn place_decals(
    grid: &TileGrid,
    layers: &[DecalLayer],
    seed_base: u64,
    rng: &mut impl Rng,
) -> BTreeMap<String, Vec<PlacedDecal>> {
    let (w, h) = (grid.width(), grid.height());
    let mut groups: BTreeMap<String, Vec<PlacedDecal>> = BTreeMap::new();
    let mut occupied = Occupancy::new(w, h);

    for layer in layers {
        let noise = build_noise(&layer.noise, layer_seed(seed_base, &layer.seed_key));
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                if occupied.contains(x, y) {
                    continue;
                }
                if sample01(&noise, x as i32, y as i32) > layer.threshold
                    && layer.condition.matches(grid.get(x, y))
                {
                    let id = layer
                        .decals
                        .choose(rng)
                        .expect("decal layers are validated non-empty");
                    let ox = jitter(&noise, x as i32 + 1000, y as i32 + 1000);
                    let oy = jitter(&noise, x as i32 + 2000, y as i32 + 2000);
                    groups.entry(id.clone()).or_default().push(PlacedDecal {
                        decal_id: id.clone(),
                        color: layer.color.clone(),
                        x: x as f64 + ox,
                        y: y as f64 + oy,
                    });
                    occupied.claim(x, y);
                }
            }
        }
    }

    for (id, placed) in &groups {
        log::info!("placed {} {} decals", placed.len(), id);
    }
    groups
}

/// Offset in `[-0.25, 0.25]` derived from the layer noise, so decals
/// scatter without an extra random stream.
#[inline]
fn jitter(noise: &fastnoise_lite::FastNoiseLite, x: i32, y: i32) -> f64 {
    ((noise.get_noise_2d(x as f32, y as f32) + 1.0) / 4.0 - 0.25) as f64
}
