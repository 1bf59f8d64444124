use std::collections::HashMap;

use mapview_blocks::kinds::{Crops, Cube, RoleTextures, RoleTints, SnowLayer};
use mapview_blocks::{BlockError, BlockRegistry, StateError, TextureCatalog, TextureSource};
use mapview_geom::{Facing, Model, Vertex};

fn registry() -> BlockRegistry {
    let mut reg = BlockRegistry::new(TextureCatalog::from_names(["snow"]).unwrap());
    reg.register_with("snow_layer", 78, |states, textures| {
        let snow = textures.texture("snow").unwrap_or_default();
        Ok(SnowLayer::declare(states, snow)?)
    })
    .unwrap();
    reg
}

fn props(height: i32) -> HashMap<String, String> {
    HashMap::from([("height".to_string(), height.to_string())])
}

fn face_span(model: &Model, facing: Facing, pick: fn(&Vertex) -> f32) -> (f32, f32) {
    let face = model.faces_facing(facing).next().expect("face present");
    face.vertices()
        .iter()
        .map(pick)
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

#[test]
fn single_layer_geometry() {
    let reg = registry();
    let block = reg.make_block_by_name("snow_layer", Some(&props(1))).unwrap();
    let model = reg.model(&block).unwrap();
    assert_eq!(model.len(), 6);

    let top = model.faces_facing(Facing::Top).next().unwrap();
    assert!(top.vertices().iter().all(|v| v.y == 2.0 / 16.0));
    assert!(!top.is_cullable());

    for side in [Facing::Left, Facing::Right, Facing::Front, Facing::Back] {
        assert_eq!(face_span(&model, side, |v| v.y), (0.0, 2.0 / 16.0), "{side}");
        assert_eq!(face_span(&model, side, |v| v.v), (0.0, 2.0 / 16.0), "{side}");
        assert!(model.faces_facing(side).next().unwrap().is_cullable());
    }
    assert_eq!(face_span(&model, Facing::Left, |v| v.x), (1.0, 1.0));
    assert_eq!(face_span(&model, Facing::Right, |v| v.x), (0.0, 0.0));
    assert_eq!(face_span(&model, Facing::Front, |v| v.z), (1.0, 1.0));
    assert_eq!(face_span(&model, Facing::Back, |v| v.z), (0.0, 0.0));

    let bottom = model.faces_facing(Facing::Bottom).next().unwrap();
    assert!(bottom.vertices().iter().all(|v| v.y == 0.0));
    assert!(bottom.is_cullable());

    assert_eq!(reg.legacy_of(&block).unwrap(), (78, 0));
}

#[test]
fn full_layer_is_a_cube() {
    let reg = registry();
    let block = reg.make_block_by_name("snow_layer", Some(&props(8))).unwrap();
    let model = reg.model(&block).unwrap();
    let top = model.faces_facing(Facing::Top).next().unwrap();
    assert!(top.vertices().iter().all(|v| v.y == 1.0));
    assert!(model.faces().iter().all(|f| f.is_cullable()));
    assert_eq!(face_span(&model, Facing::Front, |v| v.y), (0.0, 1.0));
    assert_eq!(reg.legacy_of(&block).unwrap(), (78, 7));
}

#[test]
fn heights_outside_the_domain_are_rejected() {
    let reg = registry();
    for height in [0, 9] {
        let err = reg
            .make_block_by_name("snow_layer", Some(&props(height)))
            .unwrap_err();
        assert!(
            matches!(
                err,
                BlockError::State(StateError::DomainViolation { ref axis, value })
                    if axis == "height" && value == height
            ),
            "{err}"
        );
    }
}

#[test]
fn legacy_decoding_matches_props() {
    let reg = registry();
    for height in 1..=8 {
        let from_props = reg
            .make_block_by_name("snow_layer", Some(&props(height)))
            .unwrap();
        let from_legacy = reg.block_from_legacy(78, (height - 1) as u8).unwrap();
        assert_eq!(from_props, from_legacy);
        let a = reg.model(&from_props).unwrap();
        let b = reg.model(&from_legacy).unwrap();
        assert!(std::sync::Arc::ptr_eq(&a, &b));
    }
    assert!(matches!(
        reg.block_from_legacy(78, 8),
        Err(BlockError::State(StateError::LegacyData(8)))
    ));
}

#[test]
fn declaring_height_twice_fails() {
    let mut reg = BlockRegistry::new(TextureCatalog::from_names(["snow"]).unwrap());
    let err = reg
        .register_with("double_snow", 200, |states, _| {
            states.alloc_int("height", 0, 3)?;
            Ok(SnowLayer::declare(states, Default::default())?)
        })
        .unwrap_err();
    assert!(matches!(
        err,
        BlockError::State(StateError::DuplicateAxis(ref name)) if name == "height"
    ));
    assert!(reg.is_empty());
    assert_eq!(reg.id_by_name("double_snow"), None);
}

#[test]
fn states_of_other_block_types_are_refused() {
    let mut reg = registry();
    reg.register_with("wheat", 59, |states, _| {
        Ok(Crops::declare(states, vec![Default::default(); 8])?)
    })
    .unwrap();
    reg.register_with("stone", 1, |_, _| {
        Ok(Cube::new(
            RoleTextures::uniform(Default::default()),
            RoleTints::default(),
            true,
        ))
    })
    .unwrap();
    let snow = reg.by_name("snow_layer").unwrap();

    let seedling = reg.block_from_legacy(59, 0).unwrap();
    assert!(matches!(
        snow.create_block(seedling.state().clone()),
        Err(StateError::DomainViolation { ref axis, value: 0 }) if axis == "height"
    ));
    assert!(matches!(
        snow.legacy_data(seedling.state()),
        Err(StateError::DomainViolation { .. })
    ));

    let stone = reg.block_from_legacy(1, 0).unwrap();
    assert!(matches!(
        snow.create_block(stone.state().clone()),
        Err(StateError::WrongArity {
            expected: 1,
            found: 0
        })
    ));
    assert!(matches!(
        snow.model_for_state(stone.state()),
        Err(StateError::WrongArity { .. })
    ));
    assert!(matches!(
        snow.model(&stone),
        Err(StateError::ForeignBlock { .. })
    ));
    assert_eq!(snow.cache_stats().entries, 0);

    // Handles from another registry resolve by id; their state is still checked.
    let other = registry();
    assert!(matches!(
        other.model(&seedling),
        Err(BlockError::UnknownBlockId(_))
    ));
    let mut crowded = registry();
    crowded
        .register_with("stone", 1, |_, _| {
            Ok(Cube::new(
                RoleTextures::uniform(Default::default()),
                RoleTints::default(),
                true,
            ))
        })
        .unwrap();
    let foreign_stone = crowded.block_from_legacy(1, 0).unwrap();
    assert!(matches!(
        reg.legacy_of(&foreign_stone),
        Err(BlockError::State(StateError::WrongArity { .. }))
    ));
}
