use crate::face::ModelFace;
use crate::facing::Facing;

/// The faces generated for one block state. Built by a single call, then shared read-only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    faces: Vec<ModelFace>,
}

impl Model {
    pub fn new() -> Self {
        Self { faces: Vec::new() }
    }

    pub fn with_capacity(faces: usize) -> Self {
        Self {
            faces: Vec::with_capacity(faces),
        }
    }

    /// Appends `face` and returns it for further tweaks (tint, cullability).
    pub fn add_face(&mut self, face: ModelFace) -> &mut ModelFace {
        self.faces.push(face);
        let last = self.faces.len() - 1;
        &mut self.faces[last]
    }

    #[inline]
    pub fn faces(&self) -> &[ModelFace] {
        &self.faces
    }

    pub fn for_each_face(&self, mut visit: impl FnMut(&ModelFace)) {
        for face in &self.faces {
            visit(face);
        }
    }

    pub fn faces_facing(&self, facing: Facing) -> impl Iterator<Item = &ModelFace> + '_ {
        self.faces.iter().filter(move |f| f.facing() == facing)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}
