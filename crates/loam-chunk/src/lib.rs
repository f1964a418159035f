//! Map chunk buffer and the versioned binary tile codec.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use loam_tiles::{Tile, TileId, TileRegistry};
use loam_world::TileGrid;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default chunk side length used by the world documents.
pub const CHUNK_SIDE: u32 = 16;

/// Format revision the encoder writes. Revisions below 6 stored tile ids
/// as 16-bit values; 6 widened them to 32 bits.
pub const CURRENT_FORMAT: u32 = 6;

#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("tile id {0} has no entry in the tile table")]
    UnknownTileId(TileId),
    #[error("chunk payload truncated: need {expected} bytes, got {got}")]
    Truncated { expected: usize, got: usize },
    #[error("malformed chunk index '{0}'")]
    BadIndex(String),
    #[error("chunk payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// One side×side block of tiles, row-major with y outer. Lives only for
/// the span of an encode or decode call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapChunk {
    pub cx: i32,
    pub cy: i32,
    pub side: u32,
    pub tiles: Vec<Tile>,
}

impl MapChunk {
    pub fn new(cx: i32, cy: i32, side: u32) -> Self {
        Self {
            cx,
            cy,
            side,
            tiles: vec![Tile::default(); (side * side) as usize],
        }
    }

    #[inline]
    pub fn idx(&self, x: u32, y: u32) -> usize {
        (y * self.side + x) as usize
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Tile {
        self.tiles[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, tile: Tile) {
        let i = self.idx(x, y);
        self.tiles[i] = tile;
    }

    /// Serialize in the current format: little-endian u32 tile id, then
    /// flags and variant bytes, per tile. Legacy widths are read-only.
    pub fn encode_tiles(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.tiles.len() * 6);
        for t in &self.tiles {
            out.extend_from_slice(&t.type_id.to_le_bytes());
            out.push(t.flags);
            out.push(t.variant);
        }
        out
    }

    /// Decode a payload written at `format_version`, validating every id
    /// against the registry. The id width branches once per chunk.
    pub fn decode_tiles(
        cx: i32,
        cy: i32,
        side: u32,
        bytes: &[u8],
        format_version: u32,
        reg: &TileRegistry,
    ) -> Result<Self, ChunkError> {
        let id_width: usize = if format_version < 6 { 2 } else { 4 };
        let expected = (side * side) as usize * (id_width + 2);
        if bytes.len() < expected {
            return Err(ChunkError::Truncated {
                expected,
                got: bytes.len(),
            });
        }
        let mut chunk = MapChunk::new(cx, cy, side);
        let mut at = 0usize;
        for i in 0..(side * side) as usize {
            let type_id = if id_width == 2 {
                u16::from_le_bytes([bytes[at], bytes[at + 1]]) as TileId
            } else {
                u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
            };
            at += id_width;
            if !reg.contains_id(type_id) {
                return Err(ChunkError::UnknownTileId(type_id));
            }
            chunk.tiles[i] = Tile {
                type_id,
                flags: bytes[at],
                variant: bytes[at + 1],
            };
            at += 2;
        }
        Ok(chunk)
    }
}

/// Text envelope a chunk travels in inside the world document. The base64
/// framing is plain transport; the payload bytes carry the format.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkNode {
    pub ind: String,
    pub tiles: String,
    pub version: u32,
}

impl ChunkNode {
    pub fn from_chunk(chunk: &MapChunk) -> Self {
        Self {
            ind: format!("{},{}", chunk.cx, chunk.cy),
            tiles: BASE64.encode(chunk.encode_tiles()),
            version: CURRENT_FORMAT,
        }
    }

    /// Reverse of [`ChunkNode::from_chunk`], honoring the node's own
    /// format version.
    pub fn decode(&self, side: u32, reg: &TileRegistry) -> Result<MapChunk, ChunkError> {
        let (cx, cy) = parse_index(&self.ind)?;
        let bytes = BASE64.decode(&self.tiles)?;
        MapChunk::decode_tiles(cx, cy, side, &bytes, self.version, reg)
    }
}

fn parse_index(ind: &str) -> Result<(i32, i32), ChunkError> {
    let bad = || ChunkError::BadIndex(ind.to_string());
    let (x, y) = ind.split_once(',').ok_or_else(bad)?;
    let x = x.trim().parse().map_err(|_| bad())?;
    let y = y.trim().parse().map_err(|_| bad())?;
    Ok((x, y))
}

/// Slice the whole grid into encoded chunk nodes keyed `"cx,cy"`. Ragged
/// right/bottom chunks are padded with the zero tile.
pub fn chunks_from_grid(grid: &TileGrid, side: u32) -> BTreeMap<String, ChunkNode> {
    let mut out = BTreeMap::new();
    let s = side as usize;
    for cy in 0..grid.height().div_ceil(s) {
        for cx in 0..grid.width().div_ceil(s) {
            let mut chunk = MapChunk::new(cx as i32, cy as i32, side);
            for ty in 0..s {
                let gy = cy * s + ty;
                if gy >= grid.height() {
                    break;
                }
                for tx in 0..s {
                    let gx = cx * s + tx;
                    if gx >= grid.width() {
                        break;
                    }
                    chunk.set(tx as u32, ty as u32, Tile::new(grid.get(gx, gy)));
                }
            }
            out.insert(format!("{cx},{cy}"), ChunkNode::from_chunk(&chunk));
        }
    }
    out
}
