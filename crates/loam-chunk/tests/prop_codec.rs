use loam_chunk::{CURRENT_FORMAT, ChunkNode, MapChunk};
use loam_tiles::{Tile, TileRegistry};
use proptest::prelude::*;

fn side() -> impl Strategy<Value = u32> {
    1u32..=16
}

fn known_tile() -> impl Strategy<Value = Tile> {
    // Ids restricted to the builtin table so decoding always validates.
    (0u32..=5, any::<u8>(), any::<u8>()).prop_map(|(type_id, flags, variant)| Tile {
        type_id,
        flags,
        variant,
    })
}

fn chunk() -> impl Strategy<Value = MapChunk> {
    (side(), -1000i32..=1000, -1000i32..=1000).prop_flat_map(|(side, cx, cy)| {
        proptest::collection::vec(known_tile(), (side * side) as usize).prop_map(
            move |tiles| MapChunk {
                cx,
                cy,
                side,
                tiles,
            },
        )
    })
}

proptest! {
    // encode/decode is the identity for any chunk over known ids
    #[test]
    fn byte_round_trip(chunk in chunk()) {
        let reg = TileRegistry::builtin();
        let bytes = chunk.encode_tiles();
        prop_assert_eq!(bytes.len(), chunk.tiles.len() * 6);
        let back = MapChunk::decode_tiles(
            chunk.cx, chunk.cy, chunk.side, &bytes, CURRENT_FORMAT, &reg,
        ).unwrap();
        prop_assert_eq!(back, chunk);
    }

    // the text envelope adds nothing and loses nothing
    #[test]
    fn envelope_round_trip(chunk in chunk()) {
        let reg = TileRegistry::builtin();
        let node = ChunkNode::from_chunk(&chunk);
        let back = node.decode(chunk.side, &reg).unwrap();
        prop_assert_eq!(back, chunk);
    }

    // a legacy 2-byte stream and the current 4-byte stream carry the
    // same logical tiles
    #[test]
    fn legacy_width_decodes_identically(chunk in chunk()) {
        let reg = TileRegistry::builtin();
        let mut legacy_bytes = Vec::with_capacity(chunk.tiles.len() * 4);
        for t in &chunk.tiles {
            legacy_bytes.extend_from_slice(&(t.type_id as u16).to_le_bytes());
            legacy_bytes.push(t.flags);
            legacy_bytes.push(t.variant);
        }
        let legacy = MapChunk::decode_tiles(
            chunk.cx, chunk.cy, chunk.side, &legacy_bytes, 5, &reg,
        ).unwrap();
        prop_assert_eq!(legacy.tiles, chunk.tiles);
    }
}
