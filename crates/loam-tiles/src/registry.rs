use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use thiserror::Error;

use super::config::{TileDef, TilesConfig};
use super::types::TileId;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate tile id {0}")]
    DuplicateId(TileId),
    #[error("duplicate tile name '{0}'")]
    DuplicateName(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
}

/// Bidirectional `TileId <-> name` table. Both directions are injective;
/// rule compilation and chunk decoding refuse ids/names missing from it.
#[derive(Default, Clone, Debug)]
pub struct TileRegistry {
    names: BTreeMap<TileId, String>,
    by_name: HashMap<String, TileId>,
}

impl TileRegistry {
    pub fn new() -> Self {
        Self {
            names: BTreeMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// The planet tile table the generator ships with.
    pub fn builtin() -> Self {
        let defs = [
            (0, "Space"),
            (1, "FloorDirt"),
            (2, "FloorPlanetGrass"),
            (3, "FloorGrassDark"),
            (4, "FloorSand"),
            (5, "FloorDirtRock"),
        ];
        let mut reg = TileRegistry::new();
        for (id, name) in defs {
            // Static table, known collision-free.
            let _ = reg.insert(id, name.to_string());
        }
        reg
    }

    fn insert(&mut self, id: TileId, name: String) -> Result<(), RegistryError> {
        if self.names.contains_key(&id) {
            return Err(RegistryError::DuplicateId(id));
        }
        if self.by_name.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        self.names.insert(id, name.clone());
        self.by_name.insert(name, id);
        Ok(())
    }

    pub fn from_config(cfg: TilesConfig) -> Result<Self, RegistryError> {
        let mut reg = TileRegistry::new();
        for TileDef { id, name } in cfg.tiles {
            reg.insert(id, name)?;
        }
        Ok(reg)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let s = fs::read_to_string(path)?;
        let cfg: TilesConfig = toml::from_str(&s)?;
        Self::from_config(cfg)
    }

    #[inline]
    pub fn id_by_name(&self, name: &str) -> Option<TileId> {
        self.by_name.get(name).copied()
    }

    #[inline]
    pub fn name_by_id(&self, id: TileId) -> Option<&str> {
        self.names.get(&id).map(|s| s.as_str())
    }

    #[inline]
    pub fn contains_id(&self, id: TileId) -> bool {
        self.names.contains_key(&id)
    }

    /// Entries in ascending id order (stable for document output).
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &str)> {
        self.names.iter().map(|(id, name)| (*id, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
