//! Built-in block types and the config-driven shape compiler.

pub mod axis_cube;
pub mod carpet;
pub mod crops;
pub mod cube;
pub mod slab;
pub mod snow_layer;

pub use axis_cube::{AxisCube, CubeAxis};
pub use carpet::Carpet;
pub use crops::Crops;
pub use cube::Cube;
pub use slab::{Half, Slab};
pub use snow_layer::SnowLayer;

use mapview_geom::{BLOCK_GRID, Facing, ModelFace, TextureRef};

use crate::config::{BiomeTint, BlockDef, TexturesDef, TintConfig, TintDef};
use crate::error::BlockError;
use crate::factory::BlockKind;
use crate::state::StateAllocator;
use crate::texture::TextureSource;
use crate::types::FaceRole;

/// Growth stages assumed for crops when the shape table leaves `stages` out.
pub const DEFAULT_CROP_STAGES: i32 = 8;
const MAX_CROP_STAGES: i32 = 16;

/// Offset of the face that closes the unit cube on `facing`'s side.
#[inline]
pub fn outer_offset(facing: Facing) -> f32 {
    match facing {
        Facing::Top | Facing::Left | Facing::Front => BLOCK_GRID,
        Facing::Bottom | Facing::Right | Facing::Back => 0.0,
    }
}

/// Textures resolved once per block type, by face role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleTextures {
    pub top: TextureRef,
    pub bottom: TextureRef,
    pub side: TextureRef,
}

impl RoleTextures {
    pub fn uniform(texture: TextureRef) -> Self {
        Self {
            top: texture,
            bottom: texture,
            side: texture,
        }
    }

    #[inline]
    pub fn for_facing(&self, facing: Facing) -> TextureRef {
        match FaceRole::of(facing) {
            FaceRole::Top => self.top,
            FaceRole::Bottom => self.bottom,
            FaceRole::Side | FaceRole::All => self.side,
        }
    }

    pub fn resolve(
        block: &str,
        def: &TexturesDef,
        textures: &dyn TextureSource,
    ) -> Result<Self, BlockError> {
        let pick = |role: FaceRole| -> Result<TextureRef, BlockError> {
            let name = def.name_for(role).ok_or_else(|| BlockError::InvalidDefinition {
                block: block.to_string(),
                reason: format!("no texture for {role:?} faces"),
            })?;
            lookup_texture(block, name, textures)
        };
        Ok(Self {
            top: pick(FaceRole::Top)?,
            bottom: pick(FaceRole::Bottom)?,
            side: pick(FaceRole::Side)?,
        })
    }
}

pub(crate) fn lookup_texture(
    block: &str,
    name: &str,
    textures: &dyn TextureSource,
) -> Result<TextureRef, BlockError> {
    textures
        .texture(name)
        .ok_or_else(|| BlockError::UnknownTexture {
            block: block.to_string(),
            texture: name.to_string(),
        })
}

/// Tint per face role; `None` leaves the face white.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoleTints {
    pub top: Option<TintConfig>,
    pub bottom: Option<TintConfig>,
    pub side: Option<TintConfig>,
}

impl RoleTints {
    pub fn from_def(def: Option<&TintDef>) -> Self {
        let Some(def) = def else {
            return Self::default();
        };
        Self {
            top: def.top.or(def.all),
            bottom: def.bottom.or(def.all),
            side: def.side.or(def.all),
        }
    }

    pub fn for_facing(&self, facing: Facing) -> Option<TintConfig> {
        match FaceRole::of(facing) {
            FaceRole::Top => self.top,
            FaceRole::Bottom => self.bottom,
            FaceRole::Side | FaceRole::All => self.side,
        }
    }

    pub fn apply(&self, facing: Facing, face: &mut ModelFace) {
        match self.for_facing(facing) {
            Some(TintConfig::Biome(BiomeTint::Grass)) => {
                face.use_grass_biome_colour();
            }
            Some(TintConfig::Biome(BiomeTint::Foliage)) => {
                face.use_foliage_biome_colour();
            }
            Some(TintConfig::Rgb([r, g, b])) => {
                face.colour(r, g, b);
            }
            None => {}
        }
    }
}

/// Builds the geometry rule named by `def.shape`, declaring its axes on `states`.
pub(crate) fn compile_kind(
    def: &BlockDef,
    states: &mut StateAllocator,
    textures: &dyn TextureSource,
) -> Result<Box<dyn BlockKind>, BlockError> {
    let block = def.name.as_str();
    let shape = def.shape.as_ref().map(|s| s.kind()).unwrap_or("cube");
    let tex_def = def.textures.clone().unwrap_or_default();
    let tints = RoleTints::from_def(def.tint.as_ref());

    if def.cullable.is_some() && shape != "cube" {
        log::warn!("block `{block}`: `cullable` only applies to cube shapes; ignored");
    }

    let kind: Box<dyn BlockKind> = match shape {
        "cube" => {
            let textures = RoleTextures::resolve(block, &tex_def, textures)?;
            Box::new(Cube::new(textures, tints, def.cullable.unwrap_or(true)))
        }
        "snow_layer" => {
            let textures = RoleTextures::resolve(block, &tex_def, textures)?;
            Box::new(SnowLayer::declare(states, textures.top)?.with_tints(tints))
        }
        "slab" => {
            let textures = RoleTextures::resolve(block, &tex_def, textures)?;
            Box::new(Slab::declare(states, textures, tints)?)
        }
        "axis_cube" | "log" => {
            let textures = RoleTextures::resolve(block, &tex_def, textures)?;
            Box::new(AxisCube::declare(states, textures.top, textures.side)?.with_tints(tints))
        }
        "carpet" => {
            let textures = RoleTextures::resolve(block, &tex_def, textures)?;
            Box::new(Carpet::new(textures, tints))
        }
        "crops" => {
            let stages = def
                .shape
                .as_ref()
                .and_then(|s| s.stages())
                .unwrap_or(DEFAULT_CROP_STAGES);
            if !(1..=MAX_CROP_STAGES).contains(&stages) {
                return Err(BlockError::InvalidDefinition {
                    block: block.to_string(),
                    reason: format!("crops need 1..={MAX_CROP_STAGES} stages, got {stages}"),
                });
            }
            let base = tex_def
                .name_for(FaceRole::All)
                .ok_or_else(|| BlockError::InvalidDefinition {
                    block: block.to_string(),
                    reason: "crops need `textures.all` as the stage texture prefix".into(),
                })?;
            let stage_textures = (0..stages)
                .map(|age| lookup_texture(block, &format!("{base}_{age}"), textures))
                .collect::<Result<Vec<_>, _>>()?;
            Box::new(Crops::declare(states, stage_textures)?.with_tints(tints))
        }
        other => {
            return Err(BlockError::UnknownShape {
                block: block.to_string(),
                shape: other.to_string(),
            });
        }
    };
    Ok(kind)
}
