use mapview_geom::{FaceRect, Facing, Model, ModelFace, TextureRef};

use super::RoleTints;
use crate::error::StateError;
use crate::factory::BlockKind;
use crate::state::{StateAllocator, StateInstance, StateKey, StateSchema};

pub const MIN_HEIGHT: i32 = 1;
pub const MAX_HEIGHT: i32 = 8;

/// Stackable snow, 2/16 of a block per layer.
#[derive(Debug)]
pub struct SnowLayer {
    height: StateKey<i32>,
    texture: TextureRef,
    tints: RoleTints,
}

impl SnowLayer {
    pub fn declare(states: &mut StateAllocator, texture: TextureRef) -> Result<Self, StateError> {
        Ok(Self {
            height: states.alloc_int("height", MIN_HEIGHT, MAX_HEIGHT)?,
            texture,
            tints: RoleTints::default(),
        })
    }

    pub fn with_tints(mut self, tints: RoleTints) -> Self {
        self.tints = tints;
        self
    }

    #[inline]
    pub fn height(&self) -> StateKey<i32> {
        self.height
    }
}

impl BlockKind for SnowLayer {
    fn build_model(&self, state: &StateInstance) -> Model {
        let height = state.get(self.height);
        let top = (height * 2) as f32;
        let t = self.texture;
        let side = FaceRect::new(0.0, 0.0, 16.0, top);

        // The top only hides the block above once the layer fills the whole cell.
        let faces = [
            (Facing::Top, FaceRect::FULL, top, height == MAX_HEIGHT),
            (Facing::Bottom, FaceRect::FULL, 0.0, true),
            (Facing::Left, side, 16.0, true),
            (Facing::Right, side, 0.0, true),
            (Facing::Front, side, 16.0, true),
            (Facing::Back, side, 0.0, true),
        ];
        let mut model = Model::with_capacity(faces.len());
        for (facing, rect, offset, cullable) in faces {
            let face = model.add_face(ModelFace::quad(facing, t, rect, offset, cullable));
            self.tints.apply(facing, face);
        }
        model
    }

    fn legacy_data(&self, state: &StateInstance) -> u8 {
        (state.get(self.height) - MIN_HEIGHT) as u8
    }

    fn state_from_legacy(
        &self,
        schema: &StateSchema,
        data: u8,
    ) -> Result<StateInstance, StateError> {
        schema
            .builder()
            .set(self.height, i32::from(data) + MIN_HEIGHT)
            .map_err(|_| StateError::LegacyData(data))?
            .build()
    }
}
