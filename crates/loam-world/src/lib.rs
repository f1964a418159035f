//! Layered-noise map generation: compositing, erosion, placement, spawns.
#![forbid(unsafe_code)]

pub mod compositor;
pub mod erosion;
pub mod grid;
pub mod noise;
pub mod placer;
pub mod rules;
pub mod spawn;

pub use grid::TileGrid;
pub use placer::{PlacedDecal, PlacedEntity, UidAllocator};
pub use rules::{CompiledRules, MapRules, RuleError};
pub use spawn::{Corner, SpawnPair};
