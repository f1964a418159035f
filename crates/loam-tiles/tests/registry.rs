use loam_tiles::config::{TileDef, TilesConfig};
use loam_tiles::{RegistryError, TileRegistry};

fn cfg(defs: &[(u32, &str)]) -> TilesConfig {
    TilesConfig {
        tiles: defs
            .iter()
            .map(|(id, name)| TileDef {
                id: *id,
                name: (*name).to_string(),
            })
            .collect(),
    }
}

#[test]
fn lookup_is_bidirectional() {
    let reg = TileRegistry::from_config(cfg(&[(0, "Space"), (7, "FloorMud")])).unwrap();
    assert_eq!(reg.id_by_name("FloorMud"), Some(7));
    assert_eq!(reg.name_by_id(7), Some("FloorMud"));
    assert_eq!(reg.id_by_name("FloorLava"), None);
    assert_eq!(reg.name_by_id(42), None);
    assert!(reg.contains_id(0));
}

#[test]
fn duplicate_id_is_rejected() {
    let err = TileRegistry::from_config(cfg(&[(1, "A"), (1, "B")])).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateId(1)));
}

#[test]
fn duplicate_name_is_rejected() {
    let err = TileRegistry::from_config(cfg(&[(1, "A"), (2, "A")])).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateName(n) if n == "A"));
}

#[test]
fn builtin_covers_the_planet_floors() {
    let reg = TileRegistry::builtin();
    assert_eq!(reg.id_by_name("Space"), Some(0));
    assert_eq!(reg.id_by_name("FloorDirt"), Some(1));
    assert_eq!(reg.id_by_name("FloorPlanetGrass"), Some(2));
    assert_eq!(reg.id_by_name("FloorSand"), Some(4));
    assert_eq!(reg.id_by_name("FloorDirtRock"), Some(5));
    assert_eq!(reg.len(), 6);
}

#[test]
fn iter_is_ascending_by_id() {
    let reg = TileRegistry::from_config(cfg(&[(5, "E"), (1, "B"), (3, "D")])).unwrap();
    let ids: Vec<u32> = reg.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![1, 3, 5]);
}

#[test]
fn parses_toml_table() {
    let reg = TileRegistry::from_config(
        toml::from_str(
            r#"
            [[tiles]]
            id = 0
            name = "Space"

            [[tiles]]
            id = 1
            name = "FloorDirt"
        "#,
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(reg.id_by_name("FloorDirt"), Some(1));
}
