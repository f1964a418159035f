//! Assembly of the world-save document around the generated artifacts.

use std::collections::BTreeMap;

use loam_chunk::ChunkNode;
use loam_tiles::{TileId, TileRegistry};
use loam_world::{PlacedDecal, PlacedEntity};
use serde::Serialize;

/// Save-format revision of the surrounding document. Chunk payloads carry
/// their own format version inside each node.
const DOCUMENT_FORMAT: u32 = 7;
const ENGINE_VERSION: &str = "249.0.0";

/// Side length of the atmosphere grid, in tile chunks of its own.
const ATMOS_CHUNK: u32 = 4;

/// Uid of the map root entity.
pub const MAP_UID: u64 = 1;
/// Uid of the grid entity every placement parents to.
pub const GRID_UID: u64 = 2;

#[derive(Clone, Debug, Serialize)]
pub struct MapDocument {
    pub meta: Meta,
    pub maps: Vec<u64>,
    pub grids: Vec<u64>,
    pub orphans: Vec<u64>,
    pub nullspace: Vec<u64>,
    pub tilemap: BTreeMap<TileId, String>,
    pub entities: Vec<EntityGroup>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Meta {
    pub format: u32,
    pub category: String,
    #[serde(rename = "engineVersion")]
    pub engine_version: String,
    #[serde(rename = "forkId")]
    pub fork_id: String,
    #[serde(rename = "forkVersion")]
    pub fork_version: String,
    pub time: String,
    #[serde(rename = "entityCount")]
    pub entity_count: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct EntityGroup {
    pub proto: String,
    pub entities: Vec<EntityNode>,
}

#[derive(Clone, Debug, Serialize)]
pub struct EntityNode {
    pub uid: u64,
    pub components: Vec<Component>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type")]
pub enum Component {
    MetaData {
        name: String,
    },
    Transform {
        #[serde(skip_serializing_if = "Option::is_none")]
        parent: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pos: Option<String>,
    },
    LightCycle,
    MapLight {
        #[serde(rename = "ambientLightColor")]
        ambient_light_color: String,
    },
    Map {
        #[serde(rename = "mapPaused")]
        map_paused: bool,
    },
    PhysicsMap,
    GridTree,
    MovedGrids,
    Broadphase,
    OccluderTree,
    MapGrid {
        chunks: BTreeMap<String, ChunkNode>,
    },
    SpreaderGrid,
    GridPathfinding,
    DecalGrid {
        #[serde(rename = "chunkCollection")]
        chunk_collection: DecalCollection,
    },
    GridAtmosphere {
        version: u32,
        data: AtmosphereData,
    },
    GasTileOverlay,
}

#[derive(Clone, Debug, Serialize)]
pub struct DecalCollection {
    pub version: u32,
    pub nodes: Vec<DecalNode>,
}

#[derive(Clone, Debug, Serialize)]
pub struct DecalNode {
    pub node: DecalHead,
    pub decals: BTreeMap<u64, String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct DecalHead {
    pub color: String,
    pub id: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct AtmosphereData {
    pub tiles: BTreeMap<String, BTreeMap<u32, u32>>,
    #[serde(rename = "uniqueMixes")]
    pub unique_mixes: Vec<GasMix>,
    #[serde(rename = "chunkSize")]
    pub chunk_size: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct GasMix {
    pub volume: f64,
    #[serde(skip_serializing_if = "is_false")]
    pub immutable: bool,
    pub temperature: f64,
    pub moles: Vec<f64>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

pub fn assemble(
    reg: &TileRegistry,
    chunks: BTreeMap<String, ChunkNode>,
    entity_groups: BTreeMap<String, Vec<PlacedEntity>>,
    decal_groups: BTreeMap<String, Vec<PlacedDecal>>,
    spawn_groups: Vec<EntityGroup>,
    grid_size: (usize, usize),
) -> MapDocument {
    let decal_collection = decal_nodes(&decal_groups);
    let atmosphere = atmosphere(grid_size.0, grid_size.1);

    let mut entities = vec![EntityGroup {
        proto: String::new(),
        entities: vec![
            EntityNode {
                uid: MAP_UID,
                components: vec![
                    Component::MetaData {
                        name: "Map Entity".into(),
                    },
                    Component::Transform {
                        parent: None,
                        pos: None,
                    },
                    Component::LightCycle,
                    Component::MapLight {
                        ambient_light_color: "#D8B059FF".into(),
                    },
                    Component::Map { map_paused: true },
                    Component::PhysicsMap,
                    Component::GridTree,
                    Component::MovedGrids,
                    Component::Broadphase,
                    Component::OccluderTree,
                ],
            },
            EntityNode {
                uid: GRID_UID,
                components: vec![
                    Component::MetaData {
                        name: "grid".into(),
                    },
                    Component::Transform {
                        parent: Some(MAP_UID),
                        pos: Some("0,0".into()),
                    },
                    Component::MapGrid { chunks },
                    Component::Broadphase,
                    Component::OccluderTree,
                    Component::SpreaderGrid,
                    Component::GridPathfinding,
                    Component::DecalGrid {
                        chunk_collection: decal_collection,
                    },
                    Component::GridAtmosphere {
                        version: 2,
                        data: atmosphere,
                    },
                    Component::GasTileOverlay,
                ],
            },
        ],
    }];

    for (proto, placed) in entity_groups {
        entities.push(EntityGroup {
            entities: placed
                .into_iter()
                .map(|p| EntityNode {
                    uid: p.uid,
                    components: vec![Component::Transform {
                        parent: Some(GRID_UID),
                        pos: Some(format!("{},{}", p.x, p.y)),
                    }],
                })
                .collect(),
            proto,
        });
    }
    entities.extend(spawn_groups);

    let entity_count = entities.iter().map(|g| g.entities.len()).sum();
    MapDocument {
        meta: Meta {
            format: DOCUMENT_FORMAT,
            category: "Map".into(),
            engine_version: ENGINE_VERSION.into(),
            fork_id: String::new(),
            fork_version: String::new(),
            time: chrono::Local::now().format("%m/%d/%Y %H:%M:%S").to_string(),
            entity_count,
        },
        maps: vec![MAP_UID],
        grids: vec![GRID_UID],
        orphans: Vec::new(),
        nullspace: Vec::new(),
        tilemap: reg.iter().map(|(id, name)| (id, name.to_string())).collect(),
        entities,
    }
}

/// Group decals per id, numbering positions with one global index across
/// all nodes.
fn decal_nodes(groups: &BTreeMap<String, Vec<PlacedDecal>>) -> DecalCollection {
    let mut nodes = Vec::new();
    let mut index: u64 = 0;
    for (id, decals) in groups {
        if decals.is_empty() {
            continue;
        }
        let mut positions = BTreeMap::new();
        for d in decals {
            positions.insert(index, format!("{:.7},{:.7}", d.x, d.y));
            index += 1;
        }
        nodes.push(DecalNode {
            node: DecalHead {
                color: decals[0].color.clone(),
                id: id.clone(),
            },
            decals: positions,
        });
    }
    DecalCollection { version: 2, nodes }
}

/// Atmosphere mix map: the outermost atmosphere chunks get the immutable
/// space mix, everything inside breathes.
fn atmosphere(width: usize, height: usize) -> AtmosphereData {
    let cs = ATMOS_CHUNK as usize;
    let max_x = (width + cs - 1) / cs - 1;
    let max_y = (height + cs - 1) / cs - 1;
    let mut tiles = BTreeMap::new();
    for y in -1..=max_y as i64 {
        for x in -1..=max_x as i64 {
            let space = x == -1 || x == max_x as i64 || y == -1 || y == max_y as i64;
            let mix = if space { 0 } else { 1 };
            tiles.insert(format!("{x},{y}"), BTreeMap::from([(mix, 65535)]));
        }
    }
    AtmosphereData {
        tiles,
        unique_mixes: vec![
            GasMix {
                volume: 2500.0,
                immutable: true,
                temperature: 278.15,
                moles: vec![
                    21.82478, 82.10312, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
                ],
            },
            GasMix {
                volume: 2500.0,
                immutable: false,
                temperature: 278.15,
                moles: vec![
                    21.824879, 82.10312, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
                ],
            },
        ],
        chunk_size: ATMOS_CHUNK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loam_chunk::chunks_from_grid;
    use loam_world::TileGrid;

    #[test]
    fn atmosphere_rings_the_map_with_space() {
        let data = atmosphere(34, 34);
        // 34 tiles over chunk size 4 -> indices 0..=8, plus the -1 rim.
        assert_eq!(data.tiles.len(), 10 * 10);
        assert_eq!(data.tiles["-1,-1"], BTreeMap::from([(0, 65535)]));
        assert_eq!(data.tiles["8,3"], BTreeMap::from([(0, 65535)]));
        assert_eq!(data.tiles["0,0"], BTreeMap::from([(1, 65535)]));
        assert_eq!(data.tiles["4,7"], BTreeMap::from([(1, 65535)]));
        assert!(data.unique_mixes[0].immutable);
        assert!(!data.unique_mixes[1].immutable);
    }

    #[test]
    fn decal_indexing_is_global_across_nodes() {
        let mut groups = BTreeMap::new();
        let decal = |id: &str, x: f64| PlacedDecal {
            decal_id: id.into(),
            color: "#FFFFFFFF".into(),
            x,
            y: 1.0,
        };
        groups.insert("A".to_string(), vec![decal("A", 1.0), decal("A", 2.0)]);
        groups.insert("B".to_string(), vec![decal("B", 3.0)]);
        let collection = decal_nodes(&groups);
        assert_eq!(collection.nodes.len(), 2);
        let a: Vec<u64> = collection.nodes[0].decals.keys().copied().collect();
        let b: Vec<u64> = collection.nodes[1].decals.keys().copied().collect();
        assert_eq!(a, vec![0, 1]);
        assert_eq!(b, vec![2]);
        assert_eq!(collection.nodes[0].decals[&0], "1.0000000,1.0000000");
    }

    #[test]
    fn assemble_counts_every_entity_and_keeps_the_tile_table() {
        let reg = TileRegistry::builtin();
        let grid = TileGrid::new(20, 20, 1);
        let chunks = chunks_from_grid(&grid, 16);
        let mut groups: BTreeMap<String, Vec<PlacedEntity>> = BTreeMap::new();
        groups.insert(
            "TreeTemperate".into(),
            vec![PlacedEntity {
                uid: 3,
                proto: "TreeTemperate".into(),
                x: 4,
                y: 5,
            }],
        );
        let doc = assemble(&reg, chunks, groups, BTreeMap::new(), Vec::new(), (20, 20));

        // Map root + grid + the one tree.
        assert_eq!(doc.meta.entity_count, 3);
        assert_eq!(doc.maps, vec![MAP_UID]);
        assert_eq!(doc.grids, vec![GRID_UID]);
        assert_eq!(doc.tilemap.len(), 6);
        assert_eq!(doc.tilemap[&2], "FloorPlanetGrass");

        let grid_components = &doc.entities[0].entities[1].components;
        let chunk_count = grid_components
            .iter()
            .find_map(|c| match c {
                Component::MapGrid { chunks } => Some(chunks.len()),
                _ => None,
            })
            .expect("grid entity carries its chunks");
        assert_eq!(chunk_count, 4);

        let tree_group = doc
            .entities
            .iter()
            .find(|g| g.proto == "TreeTemperate")
            .expect("placed group present");
        assert_eq!(tree_group.entities[0].uid, 3);
    }
}
