use mapview_geom::{FaceRect, Facing, Model, ModelFace};

use super::{RoleTextures, RoleTints, outer_offset};
use crate::error::StateError;
use crate::factory::BlockKind;
use crate::state::{StateAllocator, StateEnum, StateInstance, StateKey, StateSchema, StateValue};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Half {
    Bottom,
    Top,
}

impl StateValue for Half {
    fn to_raw(self) -> i32 {
        self as i32
    }
    fn from_raw(raw: i32) -> Self {
        if raw == 1 { Half::Top } else { Half::Bottom }
    }
}

impl StateEnum for Half {
    const NAMES: &'static [&'static str] = &["bottom", "top"];
}

// Legacy data keeps the half in bit 3; the low bits belonged to the material variant.
const LEGACY_TOP_BIT: u8 = 0x8;

/// Half-height block, resting on the floor or hanging from the ceiling of its cell.
#[derive(Debug)]
pub struct Slab {
    half: StateKey<Half>,
    textures: RoleTextures,
    tints: RoleTints,
}

impl Slab {
    pub fn declare(
        states: &mut StateAllocator,
        textures: RoleTextures,
        tints: RoleTints,
    ) -> Result<Self, StateError> {
        Ok(Self {
            half: states.alloc_enum("half")?,
            textures,
            tints,
        })
    }

    #[inline]
    pub fn half(&self) -> StateKey<Half> {
        self.half
    }
}

impl BlockKind for Slab {
    fn build_model(&self, state: &StateInstance) -> Model {
        let (lo, hi) = match state.get(self.half) {
            Half::Bottom => (0.0, 8.0),
            Half::Top => (8.0, 16.0),
        };
        let mut model = Model::with_capacity(6);
        for facing in Facing::ALL {
            let (offset, rect, cullable) = match facing {
                Facing::Top => (hi, FaceRect::FULL, hi == 16.0),
                Facing::Bottom => (lo, FaceRect::FULL, lo == 0.0),
                _ => (
                    outer_offset(facing),
                    FaceRect::new(0.0, lo, 16.0, hi - lo),
                    true,
                ),
            };
            let face = model.add_face(ModelFace::quad(
                facing,
                self.textures.for_facing(facing),
                rect,
                offset,
                cullable,
            ));
            self.tints.apply(facing, face);
        }
        model
    }

    fn legacy_data(&self, state: &StateInstance) -> u8 {
        match state.get(self.half) {
            Half::Bottom => 0,
            Half::Top => LEGACY_TOP_BIT,
        }
    }

    fn state_from_legacy(
        &self,
        schema: &StateSchema,
        data: u8,
    ) -> Result<StateInstance, StateError> {
        let half = match data {
            0 => Half::Bottom,
            LEGACY_TOP_BIT => Half::Top,
            _ => return Err(StateError::LegacyData(data)),
        };
        schema.builder().set(self.half, half)?.build()
    }
}
