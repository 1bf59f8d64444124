use mapview_geom::{FaceRect, Facing, Model, ModelFace};

use super::{RoleTextures, RoleTints, outer_offset};
use crate::factory::BlockKind;
use crate::state::StateInstance;

/// Stateless full block.
#[derive(Debug)]
pub struct Cube {
    textures: RoleTextures,
    tints: RoleTints,
    cullable: bool,
}

impl Cube {
    pub fn new(textures: RoleTextures, tints: RoleTints, cullable: bool) -> Self {
        Self {
            textures,
            tints,
            cullable,
        }
    }
}

impl BlockKind for Cube {
    fn build_model(&self, _state: &StateInstance) -> Model {
        let mut model = Model::with_capacity(6);
        for facing in Facing::ALL {
            let face = model.add_face(ModelFace::quad(
                facing,
                self.textures.for_facing(facing),
                FaceRect::FULL,
                outer_offset(facing),
                self.cullable,
            ));
            self.tints.apply(facing, face);
        }
        model
    }
}
