use mapview_blocks::config::BlocksConfig;
use mapview_blocks::{BlockError, BlockRegistry, TextureCatalog};
use mapview_geom::{Facing, Tint};

const TEXTURES: &str = r#"
[textures]
dirt = ["assets/blocks/dirt.png"]
grass_top = ["assets/blocks/grass_top.png"]
grass_side = ["assets/blocks/grass_side.png"]
leaves = { paths = ["assets/blocks/leaves.png"], render_tag = "leaves" }
"#;

fn load(blocks: &str) -> Result<BlockRegistry, BlockError> {
    let textures = TextureCatalog::from_toml_str(TEXTURES)?;
    let cfg: BlocksConfig = toml::from_str(blocks)?;
    BlockRegistry::from_configs(textures, cfg)
}

#[test]
fn grass_and_leaves_tints() {
    let reg = load(
        r#"
        [[blocks]]
        name = "grass"
        id = 2
        textures = { top = "grass_top", bottom = "dirt", side = "grass_side" }
        tint = { top = "grass" }

        [[blocks]]
        name = "leaves"
        id = 18
        textures = { all = "leaves" }
        tint = { all = "foliage" }
        cullable = false
    "#,
    )
    .unwrap();
    assert_eq!(reg.len(), 2);

    let grass = reg.make_block_by_name("grass", None).unwrap();
    let model = reg.model(&grass).unwrap();
    let top = model.faces_facing(Facing::Top).next().unwrap();
    assert!(matches!(top.tint(), Tint::Grass { .. }));
    assert_eq!(Some(top.texture()), reg.textures.by_name.get("grass_top").copied());
    let bottom = model.faces_facing(Facing::Bottom).next().unwrap();
    assert_eq!(bottom.tint(), Tint::Fixed([255, 255, 255]));
    assert!(model.faces().iter().all(|f| f.is_cullable()));

    let leaves = reg.block_from_legacy(18, 0).unwrap();
    let model = reg.model(&leaves).unwrap();
    assert!(model.faces().iter().all(|f| !f.is_cullable()));
    assert!(
        model
            .faces()
            .iter()
            .all(|f| matches!(f.tint(), Tint::Foliage { .. }))
    );
    assert!(reg.block_from_legacy(18, 1).is_err());
}

#[test]
fn partial_shapes_keep_their_tint() {
    let reg = load(
        r#"
        [[blocks]]
        name = "grassy_layer"
        id = 78
        shape = "snow_layer"
        textures = { all = "grass_top" }
        tint = { top = "grass" }

        [[blocks]]
        name = "mossy_log"
        id = 17
        shape = "log"
        textures = { top = "dirt", bottom = "dirt", side = "grass_side" }
        tint = { side = [90, 160, 60] }
    "#,
    )
    .unwrap();

    let layer = reg.block_from_legacy(78, 0).unwrap();
    let model = reg.model(&layer).unwrap();
    let top = model.faces_facing(Facing::Top).next().unwrap();
    assert!(matches!(top.tint(), Tint::Grass { .. }));
    let bottom = model.faces_facing(Facing::Bottom).next().unwrap();
    assert_eq!(bottom.tint(), Tint::Fixed([255, 255, 255]));

    let log = reg.block_from_legacy(17, 0).unwrap();
    let model = reg.model(&log).unwrap();
    let side = model.faces_facing(Facing::Front).next().unwrap();
    assert_eq!(side.tint(), Tint::Fixed([90, 160, 60]));
}

#[test]
fn unknown_texture_names_the_block() {
    let err = load(
        r#"
        [[blocks]]
        name = "glass"
        id = 20
        textures = { all = "glass" }
    "#,
    )
    .unwrap_err();
    assert!(
        matches!(err, BlockError::UnknownTexture { ref block, ref texture }
            if block == "glass" && texture == "glass"),
        "{err}"
    );
}

#[test]
fn unknown_shape_is_rejected() {
    let err = load(
        r#"
        [[blocks]]
        name = "stairs"
        id = 53
        shape = "stairs"
        textures = { all = "dirt" }
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, BlockError::UnknownShape { ref shape, .. } if shape == "stairs"));
}

#[test]
fn crops_validate_stage_count() {
    let err = load(
        r#"
        [[blocks]]
        name = "wheat"
        id = 59
        shape = { kind = "crops", stages = 0 }
        textures = { all = "wheat_stage" }
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, BlockError::InvalidDefinition { .. }));
}

#[test]
fn duplicate_legacy_ids_in_config() {
    let err = load(
        r#"
        [[blocks]]
        name = "dirt"
        id = 3
        textures = { all = "dirt" }

        [[blocks]]
        name = "coarse_dirt"
        id = 3
        textures = { all = "dirt" }
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, BlockError::DuplicateLegacyId(3)));
}

#[test]
fn bundled_assets_load() {
    let root = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets");
    let reg = BlockRegistry::load_from_paths(
        format!("{root}/textures.toml"),
        format!("{root}/blocks.toml"),
    )
    .unwrap();
    for name in ["stone", "grass", "snow_layer", "wheat"] {
        assert!(reg.id_by_name(name).is_some(), "{name}");
    }
    let snow = reg.block_from_legacy(78, 3).unwrap();
    assert_eq!(reg.model(&snow).unwrap().len(), 6);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = BlockRegistry::load_from_paths("/nonexistent/textures.toml", "/nonexistent/blocks.toml")
        .unwrap_err();
    assert!(matches!(err, BlockError::Io { .. }));
}
