use mapview_geom::{FaceRect, Facing, Model, ModelFace, TextureRef};

use super::{RoleTints, outer_offset};
use crate::error::StateError;
use crate::factory::BlockKind;
use crate::state::{StateAllocator, StateEnum, StateInstance, StateKey, StateSchema, StateValue};

/// Axis the end caps of the block point along.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CubeAxis {
    Y,
    X,
    Z,
}

impl CubeAxis {
    #[inline]
    pub fn is_end(self, facing: Facing) -> bool {
        matches!(
            (self, facing),
            (CubeAxis::Y, Facing::Top | Facing::Bottom)
                | (CubeAxis::X, Facing::Left | Facing::Right)
                | (CubeAxis::Z, Facing::Front | Facing::Back)
        )
    }
}

impl StateValue for CubeAxis {
    fn to_raw(self) -> i32 {
        self as i32
    }
    fn from_raw(raw: i32) -> Self {
        match raw {
            1 => CubeAxis::X,
            2 => CubeAxis::Z,
            _ => CubeAxis::Y,
        }
    }
}

impl StateEnum for CubeAxis {
    const NAMES: &'static [&'static str] = &["y", "x", "z"];
}

// Orientation lives in bits 2-3 of the legacy data byte.
const LEGACY_SHIFT: u8 = 2;

/// Full cube with end textures on the two faces along its axis (logs, pillars).
#[derive(Debug)]
pub struct AxisCube {
    axis: StateKey<CubeAxis>,
    end: TextureRef,
    side: TextureRef,
    tints: RoleTints,
}

impl AxisCube {
    pub fn declare(
        states: &mut StateAllocator,
        end: TextureRef,
        side: TextureRef,
    ) -> Result<Self, StateError> {
        Ok(Self {
            axis: states.alloc_enum("axis")?,
            end,
            side,
            tints: RoleTints::default(),
        })
    }

    pub fn with_tints(mut self, tints: RoleTints) -> Self {
        self.tints = tints;
        self
    }

    #[inline]
    pub fn axis(&self) -> StateKey<CubeAxis> {
        self.axis
    }
}

impl BlockKind for AxisCube {
    fn build_model(&self, state: &StateInstance) -> Model {
        let axis = state.get(self.axis);
        let mut model = Model::with_capacity(6);
        for facing in Facing::ALL {
            let texture = if axis.is_end(facing) { self.end } else { self.side };
            let face = model.add_face(ModelFace::quad(
                facing,
                texture,
                FaceRect::FULL,
                outer_offset(facing),
                true,
            ));
            self.tints.apply(facing, face);
        }
        model
    }

    fn legacy_data(&self, state: &StateInstance) -> u8 {
        (state.get(self.axis).to_raw() as u8) << LEGACY_SHIFT
    }

    fn state_from_legacy(
        &self,
        schema: &StateSchema,
        data: u8,
    ) -> Result<StateInstance, StateError> {
        let axis = match data {
            0 => CubeAxis::Y,
            4 => CubeAxis::X,
            8 => CubeAxis::Z,
            _ => return Err(StateError::LegacyData(data)),
        };
        schema.builder().set(self.axis, axis)?.build()
    }
}
