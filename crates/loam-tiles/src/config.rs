use serde::Deserialize;

/// On-disk tile table, e.g.
///
/// ```toml
/// [[tiles]]
/// id = 0
/// name = "Space"
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct TilesConfig {
    pub tiles: Vec<TileDef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TileDef {
    pub id: u32,
    pub name: String,
}
