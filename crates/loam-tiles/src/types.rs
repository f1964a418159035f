/// Numeric identity of a tile class as stored in chunk payloads.
pub type TileId = u32;

/// Codec-level tile value: class id plus per-cell flags and variant byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub type_id: TileId,
    pub flags: u8,
    pub variant: u8,
}

impl Tile {
    pub const fn new(type_id: TileId) -> Self {
        Self {
            type_id,
            flags: 0,
            variant: 0,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::new(0)
    }
}
