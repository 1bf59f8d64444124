use mapview_geom::{FaceRect, Facing, Model, ModelFace};

use super::{RoleTextures, RoleTints, outer_offset};
use crate::factory::BlockKind;
use crate::state::StateInstance;

/// Thickness of a carpet on the 16-unit grid.
pub const CARPET_HEIGHT: f32 = 1.0;

#[derive(Debug)]
pub struct Carpet {
    textures: RoleTextures,
    tints: RoleTints,
}

impl Carpet {
    pub fn new(textures: RoleTextures, tints: RoleTints) -> Self {
        Self { textures, tints }
    }
}

impl BlockKind for Carpet {
    fn build_model(&self, _state: &StateInstance) -> Model {
        let mut model = Model::with_capacity(6);
        for facing in Facing::ALL {
            let (offset, rect, cullable) = match facing {
                Facing::Top => (CARPET_HEIGHT, FaceRect::FULL, false),
                Facing::Bottom => (0.0, FaceRect::FULL, true),
                _ => (
                    outer_offset(facing),
                    FaceRect::new(0.0, 0.0, 16.0, CARPET_HEIGHT),
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateAllocator;
    use mapview_geom::TextureRef;

    #[test]
    fn thin_slab_on_the_floor() {
        let carpet = Carpet::new(RoleTextures::uniform(TextureRef(9)), RoleTints::default());
        let state = StateAllocator::new().finish().builder().build().unwrap();
        let model = carpet.build_model(&state);
        let top = model.faces_facing(Facing::Top).next().unwrap();
        assert!(!top.is_cullable());
        assert!(top.vertices().iter().all(|v| v.y == 1.0 / 16.0));
        let side = model.faces_facing(Facing::Back).next().unwrap();
        assert!(side.vertices().iter().all(|v| v.y <= 1.0 / 16.0));
        assert!(side.is_cullable());
    }
}
