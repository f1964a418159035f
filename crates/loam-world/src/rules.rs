use std::fs;
use std::path::Path;

use loam_tiles::{TileId, TileRegistry};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule '{rule}' references unknown tile '{name}'")]
    UnknownTile { rule: String, name: String },
    #[error("rule '{0}' lists no candidates")]
    EmptyGroup(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
}

// --- Noise kernel parameters ---

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Kernel {
    OpenSimplex2,
    OpenSimplex2S,
    Perlin,
    Value,
    Cellular,
}

impl Default for Kernel {
    fn default() -> Self {
        Kernel::OpenSimplex2
    }
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FractalKind {
    None,
    Fbm,
    Ridged,
    PingPong,
}

impl Default for FractalKind {
    fn default() -> Self {
        FractalKind::None
    }
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CellularDistance {
    Euclidean,
    EuclideanSq,
    Manhattan,
    Hybrid,
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CellularReturn {
    CellValue,
    Distance,
    Distance2,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NoiseSpec {
    #[serde(default)]
    pub kernel: Kernel,
    #[serde(default = "default_octaves")]
    pub octaves: i32,
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    #[serde(default)]
    pub fractal: FractalKind,
    #[serde(default)]
    pub lacunarity: Option<f32>,
    #[serde(default)]
    pub cellular_distance: Option<CellularDistance>,
    #[serde(default)]
    pub cellular_return: Option<CellularReturn>,
    #[serde(default)]
    pub cellular_jitter: Option<f32>,
}

fn default_octaves() -> i32 {
    1
}
fn default_frequency() -> f32 {
    0.01
}

impl Default for NoiseSpec {
    fn default() -> Self {
        Self {
            kernel: Kernel::default(),
            octaves: default_octaves(),
            frequency: default_frequency(),
            fractal: FractalKind::default(),
            lacunarity: None,
            cellular_distance: None,
            cellular_return: None,
            cellular_jitter: None,
        }
    }
}

// --- Tile predicate, a closed set expressed as data ---

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TileCondition {
    Any,
    Equals(String),
    OneOf(Vec<String>),
}

impl Default for TileCondition {
    fn default() -> Self {
        TileCondition::Any
    }
}

// --- Raw (authorable) rule table ---

#[derive(Clone, Debug, Deserialize)]
pub struct TileRuleCfg {
    pub tile: String,
    #[serde(default)]
    pub noise: NoiseSpec,
    #[serde(default)]
    pub seed_key: Option<String>,
    pub threshold: f32,
    #[serde(default = "default_tile_priority")]
    pub priority: i32,
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
    /// Classes this rule never replaces.
    #[serde(default)]
    pub keep: Vec<String>,
    #[serde(default)]
    pub modulation: Option<ModulationCfg>,
}

fn default_tile_priority() -> i32 {
    1
}
fn default_overwrite() -> bool {
    true
}

#[derive(Clone, Debug, Deserialize)]
pub struct ModulationCfg {
    #[serde(default = "default_modulation_noise")]
    pub noise: NoiseSpec,
    #[serde(default = "default_threshold_min")]
    pub threshold_min: f32,
    #[serde(default = "default_threshold_max")]
    pub threshold_max: f32,
}

fn default_modulation_noise() -> NoiseSpec {
    NoiseSpec {
        frequency: 0.010,
        ..NoiseSpec::default()
    }
}
fn default_threshold_min() -> f32 {
    0.4
}
fn default_threshold_max() -> f32 {
    0.6
}

#[derive(Clone, Debug, Deserialize)]
pub struct EntityRuleCfg {
    pub protos: Vec<String>,
    #[serde(default)]
    pub noise: NoiseSpec,
    #[serde(default)]
    pub seed_key: Option<String>,
    pub threshold: f32,
    #[serde(default)]
    pub tile_condition: TileCondition,
    #[serde(default)]
    pub priority: i32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DecalRuleCfg {
    pub decals: Vec<String>,
    #[serde(default)]
    pub noise: NoiseSpec,
    #[serde(default)]
    pub seed_key: Option<String>,
    pub threshold: f32,
    #[serde(default)]
    pub tile_condition: TileCondition,
    #[serde(default = "default_decal_color")]
    pub color: String,
}

fn default_decal_color() -> String {
    "#FFFFFFFF".into()
}

/// Tile roles and pipeline knobs that are not per-layer.
#[derive(Clone, Debug, Deserialize)]
pub struct ProfileCfg {
    #[serde(default = "default_fill_tile")]
    pub fill: String,
    #[serde(default = "default_space_tile")]
    pub space: String,
    #[serde(default = "default_fill_tile")]
    pub border: String,
    #[serde(default = "default_erode_tile")]
    pub erode: String,
    #[serde(default = "default_spawn_tile")]
    pub spawn_on: String,
    #[serde(default = "default_wall_proto")]
    pub wall_proto: String,
    #[serde(default = "default_min_neighbors")]
    pub min_neighbors: u32,
    #[serde(default = "default_max_erosion_passes")]
    pub max_erosion_passes: u32,
}

fn default_fill_tile() -> String {
    "FloorDirt".into()
}
fn default_space_tile() -> String {
    "Space".into()
}
fn default_erode_tile() -> String {
    "FloorSand".into()
}
fn default_spawn_tile() -> String {
    "FloorPlanetGrass".into()
}
fn default_wall_proto() -> String {
    "WallRockIndestructible".into()
}
fn default_min_neighbors() -> u32 {
    1
}
fn default_max_erosion_passes() -> u32 {
    10
}

impl Default for ProfileCfg {
    fn default() -> Self {
        Self {
            fill: default_fill_tile(),
            space: default_space_tile(),
            border: default_fill_tile(),
            erode: default_erode_tile(),
            spawn_on: default_spawn_tile(),
            wall_proto: default_wall_proto(),
            min_neighbors: default_min_neighbors(),
            max_erosion_passes: default_max_erosion_passes(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MapRules {
    #[serde(default)]
    pub profile: Option<ProfileCfg>,
    #[serde(default)]
    pub tiles: Vec<TileRuleCfg>,
    #[serde(default)]
    pub entities: Vec<EntityRuleCfg>,
    #[serde(default)]
    pub decals: Vec<DecalRuleCfg>,
}

impl MapRules {
    pub fn load_from_path(path: &Path) -> Result<Self, RuleError> {
        let s = fs::read_to_string(path)?;
        Ok(toml::from_str(&s)?)
    }

    pub fn compile(&self, reg: &TileRegistry) -> Result<CompiledRules, RuleError> {
        let profile = self.profile.clone().unwrap_or_default();
        let profile = Profile {
            fill: resolve_tile(reg, "profile", &profile.fill)?,
            space: resolve_tile(reg, "profile", &profile.space)?,
            border: resolve_tile(reg, "profile", &profile.border)?,
            erode: resolve_tile(reg, "profile", &profile.erode)?,
            spawn_on: resolve_tile(reg, "profile", &profile.spawn_on)?,
            wall_proto: profile.wall_proto,
            min_neighbors: profile.min_neighbors,
            max_erosion_passes: profile.max_erosion_passes,
        };

        let mut tiles = Vec::with_capacity(self.tiles.len());
        for cfg in &self.tiles {
            let keep = cfg
                .keep
                .iter()
                .map(|n| resolve_tile(reg, &cfg.tile, n))
                .collect::<Result<Vec<_>, _>>()?;
            tiles.push(TileLayer {
                label: cfg.tile.clone(),
                tile: resolve_tile(reg, &cfg.tile, &cfg.tile)?,
                noise: cfg.noise.clone(),
                seed_key: cfg.seed_key.clone().unwrap_or_else(|| cfg.tile.clone()),
                threshold: cfg.threshold,
                priority: cfg.priority,
                overwrite: cfg.overwrite,
                keep,
                modulation: cfg.modulation.as_ref().map(|m| Modulation {
                    noise: m.noise.clone(),
                    threshold_min: m.threshold_min,
                    threshold_max: m.threshold_max,
                }),
            });
        }

        let mut entities = Vec::with_capacity(self.entities.len());
        for cfg in &self.entities {
            if cfg.protos.is_empty() {
                return Err(RuleError::EmptyGroup("entity rule".into()));
            }
            let label = cfg.protos.join("+");
            entities.push(EntityLayer {
                protos: cfg.protos.clone(),
                noise: cfg.noise.clone(),
                seed_key: cfg.seed_key.clone().unwrap_or_else(|| label.clone()),
                threshold: cfg.threshold,
                condition: compile_condition(reg, &label, &cfg.tile_condition)?,
                priority: cfg.priority,
            });
        }

        let mut decals = Vec::with_capacity(self.decals.len());
        for cfg in &self.decals {
            if cfg.decals.is_empty() {
                return Err(RuleError::EmptyGroup("decal rule".into()));
            }
            let label = cfg.decals.join("+");
            decals.push(DecalLayer {
                decals: cfg.decals.clone(),
                noise: cfg.noise.clone(),
                seed_key: cfg.seed_key.clone().unwrap_or_else(|| label.clone()),
                threshold: cfg.threshold,
                condition: compile_condition(reg, &label, &cfg.tile_condition)?,
                color: cfg.color.clone(),
            });
        }

        Ok(CompiledRules {
            profile,
            tiles,
            entities,
            decals,
        })
    }
}

fn resolve_tile(reg: &TileRegistry, rule: &str, name: &str) -> Result<TileId, RuleError> {
    reg.id_by_name(name).ok_or_else(|| RuleError::UnknownTile {
        rule: rule.to_string(),
        name: name.to_string(),
    })
}

fn compile_condition(
    reg: &TileRegistry,
    rule: &str,
    cond: &TileCondition,
) -> Result<Condition, RuleError> {
    Ok(match cond {
        TileCondition::Any => Condition::Any,
        TileCondition::Equals(name) => Condition::Equals(resolve_tile(reg, rule, name)?),
        TileCondition::OneOf(names) => Condition::OneOf(
            names
                .iter()
                .map(|n| resolve_tile(reg, rule, n))
                .collect::<Result<Vec<_>, _>>()?,
        ),
    })
}

// --- Compiled (id-resolved) rules used by the scan loops ---

#[derive(Clone, Debug)]
pub struct CompiledRules {
    pub profile: Profile,
    pub tiles: Vec<TileLayer>,
    pub entities: Vec<EntityLayer>,
    pub decals: Vec<DecalLayer>,
}

#[derive(Clone, Debug)]
pub struct Profile {
    pub fill: TileId,
    pub space: TileId,
    pub border: TileId,
    pub erode: TileId,
    pub spawn_on: TileId,
    pub wall_proto: String,
    pub min_neighbors: u32,
    pub max_erosion_passes: u32,
}

#[derive(Clone, Debug)]
pub struct TileLayer {
    pub label: String,
    pub tile: TileId,
    pub noise: NoiseSpec,
    pub seed_key: String,
    pub threshold: f32,
    pub priority: i32,
    pub overwrite: bool,
    pub keep: Vec<TileId>,
    pub modulation: Option<Modulation>,
}

#[derive(Clone, Debug)]
pub struct Modulation {
    pub noise: NoiseSpec,
    pub threshold_min: f32,
    pub threshold_max: f32,
}

#[derive(Clone, Debug)]
pub struct EntityLayer {
    pub protos: Vec<String>,
    pub noise: NoiseSpec,
    pub seed_key: String,
    pub threshold: f32,
    pub condition: Condition,
    pub priority: i32,
}

#[derive(Clone, Debug)]
pub struct DecalLayer {
    pub decals: Vec<String>,
    pub noise: NoiseSpec,
    pub seed_key: String,
    pub threshold: f32,
    pub condition: Condition,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Condition {
    Any,
    Equals(TileId),
    OneOf(Vec<TileId>),
}

impl Condition {
    #[inline]
    pub fn matches(&self, tile: TileId) -> bool {
        match self {
            Condition::Any => true,
            Condition::Equals(t) => tile == *t,
            Condition::OneOf(ts) => ts.contains(&tile),
        }
    }
}

// --- Built-in temperate-planet layer table ---

fn on_grass() -> TileCondition {
    TileCondition::Equals("FloorPlanetGrass".into())
}

fn mob_layer(proto: &str, kernel: Kernel, frequency: f32, threshold: f32) -> EntityRuleCfg {
    EntityRuleCfg {
        protos: vec![proto.into()],
        noise: NoiseSpec {
            kernel,
            octaves: 1,
            frequency,
            fractal: FractalKind::Fbm,
            ..NoiseSpec::default()
        },
        seed_key: None,
        threshold,
        tile_condition: on_grass(),
        priority: 11,
    }
}

fn bush_layer(decals: &[&str]) -> DecalRuleCfg {
    DecalRuleCfg {
        decals: decals.iter().map(|s| (*s).into()).collect(),
        noise: NoiseSpec {
            octaves: 1,
            frequency: 0.1,
            fractal: FractalKind::Fbm,
            ..NoiseSpec::default()
        },
        seed_key: None,
        threshold: 0.96,
        tile_condition: on_grass(),
        color: default_decal_color(),
    }
}

impl MapRules {
    /// The temperate-planet table the generator ships with: rock and grass
    /// base layers, a ridged river field with correlated sandy banks, flora
    /// and fauna on top, bush decals last.
    pub fn builtin() -> Self {
        let tiles = vec![
            // Rock-dirt formations fill everything the later layers skip.
            TileRuleCfg {
                tile: "FloorDirtRock".into(),
                noise: NoiseSpec {
                    octaves: 2,
                    frequency: 0.01,
                    ..NoiseSpec::default()
                },
                seed_key: None,
                threshold: -1.0,
                priority: default_tile_priority(),
                overwrite: true,
                keep: vec![],
                modulation: None,
            },
            // Dirt sprinkled over the finished terrain.
            TileRuleCfg {
                tile: "FloorDirt".into(),
                noise: NoiseSpec {
                    octaves: 10,
                    frequency: 0.3,
                    fractal: FractalKind::Fbm,
                    ..NoiseSpec::default()
                },
                seed_key: None,
                threshold: 0.825,
                priority: 10,
                overwrite: true,
                keep: vec!["FloorSand".into(), "FloorDirtRock".into()],
                modulation: None,
            },
            TileRuleCfg {
                tile: "FloorPlanetGrass".into(),
                noise: NoiseSpec {
                    kernel: Kernel::Perlin,
                    octaves: 3,
                    frequency: 0.02,
                    ..NoiseSpec::default()
                },
                seed_key: None,
                threshold: 0.4,
                priority: default_tile_priority(),
                overwrite: true,
                keep: vec![],
                modulation: None,
            },
            // River banks: same field as the river entity layer, looser
            // threshold, so the sand hugs the water.
            TileRuleCfg {
                tile: "FloorSand".into(),
                noise: NoiseSpec {
                    octaves: 1,
                    frequency: 0.003,
                    fractal: FractalKind::Ridged,
                    ..NoiseSpec::default()
                },
                seed_key: Some("river_noise".into()),
                threshold: 0.935,
                priority: default_tile_priority(),
                overwrite: true,
                keep: vec![],
                modulation: None,
            },
            // Extra bank sand, faded in and out by a slow Perlin field.
            TileRuleCfg {
                tile: "FloorSand".into(),
                noise: NoiseSpec {
                    octaves: 1,
                    frequency: 0.003,
                    fractal: FractalKind::Ridged,
                    ..NoiseSpec::default()
                },
                seed_key: Some("river_noise".into()),
                threshold: 0.92,
                priority: default_tile_priority(),
                overwrite: true,
                keep: vec![],
                modulation: Some(ModulationCfg {
                    noise: NoiseSpec {
                        kernel: Kernel::Perlin,
                        frequency: 0.01,
                        ..NoiseSpec::default()
                    },
                    threshold_min: 0.43,
                    threshold_max: 0.55,
                }),
            },
        ];

        let entities = vec![
            // Boulders for flints.
            EntityRuleCfg {
                protos: vec!["FloraRockSolid".into()],
                noise: NoiseSpec {
                    kernel: Kernel::OpenSimplex2S,
                    octaves: 6,
                    frequency: 0.3,
                    fractal: FractalKind::Fbm,
                    ..NoiseSpec::default()
                },
                seed_key: None,
                threshold: 0.815,
                tile_condition: TileCondition::OneOf(vec![
                    "FloorPlanetGrass".into(),
                    "FloorDirt".into(),
                    "FloorDirtRock".into(),
                ]),
                priority: 1,
            },
            // Rock walls clustered on the rocky dirt.
            EntityRuleCfg {
                protos: vec!["WallRock".into()],
                noise: NoiseSpec {
                    kernel: Kernel::Cellular,
                    octaves: 2,
                    frequency: 0.015,
                    fractal: FractalKind::Fbm,
                    cellular_distance: Some(CellularDistance::Hybrid),
                    cellular_return: Some(CellularReturn::CellValue),
                    cellular_jitter: Some(1.070),
                    ..NoiseSpec::default()
                },
                seed_key: None,
                threshold: 0.30,
                tile_condition: TileCondition::Equals("FloorDirtRock".into()),
                priority: 2,
            },
            // Wild crops.
            EntityRuleCfg {
                protos: vec![
                    "WildPlantPotato".into(),
                    "WildPlantCorn".into(),
                    "WildPlantRice".into(),
                    "WildPlantWheat".into(),
                    "WildPlantHemp".into(),
                    "WildPlantPoppy".into(),
                    "WildPlantAloe".into(),
                    "WildPlantYarrow".into(),
                    "WildPlantElderflower".into(),
                    "WildPlantMilkThistle".into(),
                    "WildPlantComfrey".into(),
                ],
                noise: NoiseSpec {
                    kernel: Kernel::OpenSimplex2S,
                    octaves: 6,
                    frequency: 0.3,
                    fractal: FractalKind::Fbm,
                    ..NoiseSpec::default()
                },
                seed_key: None,
                threshold: 0.84,
                tile_condition: TileCondition::OneOf(vec!["FloorPlanetGrass".into()]),
                priority: 1,
            },
            // Rivers.
            EntityRuleCfg {
                protos: vec!["FloorWaterEntity".into()],
                noise: NoiseSpec {
                    octaves: 1,
                    frequency: 0.003,
                    fractal: FractalKind::Ridged,
                    lacunarity: Some(1.50),
                    ..NoiseSpec::default()
                },
                seed_key: Some("river_noise".into()),
                threshold: 0.95,
                tile_condition: TileCondition::Any,
                priority: 10,
            },
            // Trees.
            EntityRuleCfg {
                protos: vec!["TreeTemperate".into()],
                noise: NoiseSpec {
                    octaves: 1,
                    frequency: 0.5,
                    fractal: FractalKind::Fbm,
                    ..NoiseSpec::default()
                },
                seed_key: None,
                threshold: 0.9,
                tile_condition: on_grass(),
                priority: 0,
            },
            // Predators.
            mob_layer("SpawnMobGreyWolf", Kernel::OpenSimplex2, 0.1, 0.9981),
            EntityRuleCfg {
                protos: vec!["SpawnMobBear".into()],
                noise: NoiseSpec {
                    kernel: Kernel::Perlin,
                    octaves: 1,
                    frequency: 0.300,
                    fractal: FractalKind::Fbm,
                    ..NoiseSpec::default()
                },
                seed_key: None,
                threshold: 0.958,
                tile_condition: TileCondition::OneOf(vec![
                    "FloorPlanetGrass".into(),
                    "FloorDirtRock".into(),
                ]),
                priority: 1,
            },
            mob_layer("SpawnMobSabertooth", Kernel::Perlin, 0.300, 0.96882),
            // Prey.
            mob_layer("SpawnMobRabbit", Kernel::OpenSimplex2, 0.1, 0.9989),
            mob_layer("SpawnMobChicken", Kernel::OpenSimplex2, 0.1, 0.9989),
            mob_layer("SpawnMobDeer", Kernel::OpenSimplex2, 0.1, 0.9989),
            mob_layer("SpawnMobPig", Kernel::OpenSimplex2, 0.1, 0.9992),
        ];

        let decals = vec![
            bush_layer(&[
                "BushTemperate1",
                "BushTemperate2",
                "BushTemperate3",
                "BushTemperate4",
            ]),
            bush_layer(&[
                "BushTemperate5",
                "BushTemperate6",
                "BushTemperate7",
                "BushTemperate8",
            ]),
            bush_layer(&["BushTemperate9", "BushTemperate10", "BushTemperate11"]),
            bush_layer(&[
                "BushTemperate12",
                "BushTemperate13",
                "BushTemperate14",
                "BushTemperate15",
            ]),
            bush_layer(&["BushTemperate16", "BushTemperate17", "BushTemperate18"]),
            bush_layer(&[
                "BushTemperate19",
                "BushTemperate20",
                "BushTemperate21",
                "BushTemperate22",
            ]),
            bush_layer(&["BushTemperate23", "BushTemperate24", "BushTemperate25"]),
            bush_layer(&["BushTemperate26", "BushTemperate27", "BushTemperate28"]),
            bush_layer(&[
                "BushTemperate29",
                "BushTemperate30",
                "BushTemperate31",
                "BushTemperate32",
            ]),
            bush_layer(&[
                "BushTemperate33",
                "BushTemperate34",
                "BushTemperate35",
                "BushTemperate36",
            ]),
            // High grass.
            bush_layer(&[
                "BushTemperate37",
                "BushTemperate38",
                "BushTemperate39",
                "BushTemperate40",
                "BushTemperate41",
                "BushTemperate42",
            ]),
        ];

        MapRules {
            profile: None,
            tiles,
            entities,
            decals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loam_tiles::TileRegistry;

    #[test]
    fn builtin_table_compiles_against_the_builtin_registry() {
        let compiled = MapRules::builtin()
            .compile(&TileRegistry::builtin())
            .expect("builtin rules");
        assert_eq!(compiled.tiles.len(), 5);
        assert_eq!(compiled.entities.len(), 12);
        assert_eq!(compiled.decals.len(), 11);
        // Both sand layers ride the river field.
        let river_sand = compiled
            .tiles
            .iter()
            .filter(|t| t.seed_key == "river_noise")
            .count();
        assert_eq!(river_sand, 2);
        assert!(compiled.entities.iter().any(|e| e.seed_key == "river_noise"));
    }

    #[test]
    fn rule_tables_parse_from_toml() {
        let rules: MapRules = toml::from_str(
            r#"
            [profile]
            spawn_on = "FloorPlanetGrass"

            [[tiles]]
            tile = "FloorSand"
            threshold = 0.92
            seed_key = "river_noise"
            noise = { octaves = 1, frequency = 0.003, fractal = "ridged" }
            modulation = { noise = { kernel = "perlin", frequency = 0.01 }, threshold_min = 0.43, threshold_max = 0.55 }

            [[entities]]
            protos = ["WallRock"]
            threshold = 0.3
            priority = 2
            tile_condition = { equals = "FloorDirtRock" }
            noise = { kernel = "cellular", frequency = 0.015, cellular_distance = "hybrid", cellular_return = "cell_value", cellular_jitter = 1.07 }

            [[decals]]
            decals = ["BushTemperate1"]
            threshold = 0.96
            tile_condition = { one_of = ["FloorPlanetGrass"] }
        "#,
        )
        .expect("parse");

        let tile = &rules.tiles[0];
        assert_eq!(tile.noise.fractal, FractalKind::Ridged);
        assert!(tile.overwrite, "overwrite defaults on");
        let modulation = tile.modulation.as_ref().expect("modulation present");
        assert_eq!(modulation.noise.kernel, Kernel::Perlin);
        assert_eq!(modulation.threshold_max, 0.55);

        let entity = &rules.entities[0];
        assert_eq!(entity.noise.cellular_distance, Some(CellularDistance::Hybrid));
        assert_eq!(entity.noise.cellular_return, Some(CellularReturn::CellValue));
        assert_eq!(
            entity.tile_condition,
            TileCondition::Equals("FloorDirtRock".into())
        );

        assert_eq!(rules.decals[0].color, "#FFFFFFFF");
        let compiled = rules.compile(&TileRegistry::builtin()).expect("compile");
        assert_eq!(compiled.profile.spawn_on, 2);
    }
}
