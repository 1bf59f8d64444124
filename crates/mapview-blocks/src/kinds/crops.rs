use mapview_geom::{FaceRect, Facing, Model, ModelFace, TextureRef};

use super::RoleTints;
use crate::error::StateError;
use crate::factory::BlockKind;
use crate::state::{StateAllocator, StateInstance, StateKey, StateSchema};

// Crop planes sit a quarter block in from each edge, forming a `#` when seen from above.
const PLANE_OFFSETS: [f32; 2] = [4.0, 12.0];

/// Growing plant drawn as two crossed pairs of double-sided planes, one texture per age.
#[derive(Debug)]
pub struct Crops {
    age: StateKey<i32>,
    stages: Vec<TextureRef>,
    tints: RoleTints,
}

impl Crops {
    /// `stages[n]` is the texture for age `n`; must be non-empty.
    pub fn declare(
        states: &mut StateAllocator,
        stages: Vec<TextureRef>,
    ) -> Result<Self, StateError> {
        let max_age = stages.len() as i32 - 1;
        Ok(Self {
            age: states.alloc_int("age", 0, max_age)?,
            stages,
            tints: RoleTints::default(),
        })
    }

    pub fn with_tints(mut self, tints: RoleTints) -> Self {
        self.tints = tints;
        self
    }

    #[inline]
    pub fn age(&self) -> StateKey<i32> {
        self.age
    }
}

impl BlockKind for Crops {
    fn build_model(&self, state: &StateInstance) -> Model {
        let age = state.get(self.age) as usize;
        let texture = self.stages[age];
        let mut model = Model::with_capacity(8);
        for offset in PLANE_OFFSETS {
            for facing in [Facing::Left, Facing::Right, Facing::Front, Facing::Back] {
                let face =
                    model.add_face(ModelFace::quad(facing, texture, FaceRect::FULL, offset, false));
                self.tints.apply(facing, face);
            }
        }
        model
    }

    fn legacy_data(&self, state: &StateInstance) -> u8 {
        state.get(self.age) as u8
    }

    fn state_from_legacy(
        &self,
        schema: &StateSchema,
        data: u8,
    ) -> Result<StateInstance, StateError> {
        schema
            .builder()
            .set(self.age, i32::from(data))
            .map_err(|_| StateError::LegacyData(data))?
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_age_uses_its_stage_texture() {
        let mut states = StateAllocator::new();
        let crops = Crops::declare(&mut states, (10..14).map(TextureRef).collect()).unwrap();
        let schema = states.finish();
        assert_eq!(schema.state_count(), 4);
        for state in schema.all_states() {
            let age = state.get(crops.age());
            let model = crops.build_model(&state);
            assert_eq!(model.len(), 8);
            assert!(model.faces().iter().all(|f| !f.is_cullable()));
            assert!(model.faces().iter().all(|f| f.texture() == TextureRef(10 + age as u16)));
            assert_eq!(crops.legacy_data(&state), age as u8);
        }
        assert_eq!(crops.state_from_legacy(&schema, 4), Err(StateError::LegacyData(4)));
    }

    #[test]
    fn planes_sit_inside_the_cell() {
        let mut states = StateAllocator::new();
        let crops = Crops::declare(&mut states, vec![TextureRef(0)]).unwrap();
        let schema = states.finish();
        let model = crops.build_model(&schema.all_states()[0]);
        let xs: Vec<f32> = model
            .faces_facing(Facing::Left)
            .map(|f| f.vertices()[0].x)
            .collect();
        assert_eq!(xs, vec![0.25, 0.75]);
    }

    #[test]
    fn no_stages_is_an_empty_domain() {
        let mut states = StateAllocator::new();
        assert_eq!(
            Crops::declare(&mut states, Vec::new()).unwrap_err(),
            StateError::EmptyDomain("age".into())
        );
    }
}
