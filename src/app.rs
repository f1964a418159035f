//! One full generation run: compose, erode, place, chunk, spawn, save.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use loam_chunk::chunks_from_grid;
use loam_tiles::TileRegistry;
use loam_world::MapRules;
use loam_world::compositor::compose;
use loam_world::erosion::stabilize;
use loam_world::placer::{UidAllocator, place_decals, place_entities};
use loam_world::spawn::{Corner, SpawnPair, find_spawns};

use crate::Args;
use crate::document::{self, Component, EntityGroup, EntityNode};

/// Proto spawned on the primary cell of each corner pair.
const SPAWN_PRIMARY: &str = "SpawnPointNomads";
/// Proto spawned on the partner cell.
const SPAWN_SECONDARY: &str = "SpawnPointLatejoin";

pub fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();

    let registry = TileRegistry::builtin();
    let rules = match &args.rules {
        Some(path) => MapRules::load_from_path(path)?,
        None => MapRules::builtin(),
    };
    let compiled = rules.compile(&registry)?;

    let seed_base = args
        .seed
        .unwrap_or_else(|| rand::thread_rng().gen_range(0..1_000_000));
    info!("seed base: {seed_base}");
    // Every probabilistic draw comes from this one seeded stream, so a
    // seed reproduces the whole document bit for bit.
    let mut rng = ChaCha8Rng::seed_from_u64(seed_base);

    info!("compositing {}x{} tiles", args.width, args.height);
    let mut grid = compose(
        args.width,
        args.height,
        &compiled.tiles,
        &compiled.profile,
        seed_base,
        &mut rng,
    );

    let leftover = stabilize(
        &mut grid,
        compiled.profile.erode,
        compiled.profile.min_neighbors,
        compiled.profile.max_erosion_passes,
    );
    if leftover > 0 {
        info!("{leftover} isolated tiles survived erosion");
    }

    let grid = grid.with_border(compiled.profile.border);

    let mut uids = UidAllocator::starting_at(document::GRID_UID + 1);
    let entities = place_entities(
        &grid,
        &compiled.entities,
        seed_base,
        &compiled.profile.wall_proto,
        &mut uids,
        &mut rng,
    );
    let decals = place_decals(&grid, &compiled.decals, seed_base, &mut rng);
    let chunks = chunks_from_grid(&grid, args.chunk);
    let spawns = find_spawns(&grid, compiled.profile.spawn_on, &mut rng);
    let spawn_groups = spawn_entity_groups(&spawns, &mut uids);

    let doc = document::assemble(
        &registry,
        chunks,
        entities,
        decals,
        spawn_groups,
        (grid.width(), grid.height()),
    );

    let file = File::create(&args.out)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &doc)?;
    info!(
        "map written to {} in {:.2}s",
        args.out.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Turn resolved corner pairs into the two spawn groups; unresolved
/// corners have already been reported and simply contribute nothing.
fn spawn_entity_groups(
    spawns: &[(Corner, Option<SpawnPair>)],
    uids: &mut UidAllocator,
) -> Vec<EntityGroup> {
    let mut primary = Vec::new();
    let mut secondary = Vec::new();
    for (corner, pair) in spawns {
        if let Some(pair) = pair {
            info!(
                "spawn pair at the {} corner: {:?} / {:?}",
                corner.label(),
                pair.primary,
                pair.secondary
            );
            primary.push(spawn_node(uids.next_uid(), pair.primary));
            secondary.push(spawn_node(uids.next_uid(), pair.secondary));
        }
    }
    vec![
        EntityGroup {
            proto: SPAWN_PRIMARY.into(),
            entities: primary,
        },
        EntityGroup {
            proto: SPAWN_SECONDARY.into(),
            entities: secondary,
        },
    ]
}

fn spawn_node(uid: u64, (x, y): (i32, i32)) -> EntityNode {
    EntityNode {
        uid,
        components: vec![Component::Transform {
            parent: Some(document::GRID_UID),
            pos: Some(format!("{x},{y}")),
        }],
    }
}
