use mapview_geom::Facing;

use crate::state::StateInstance;

/// Dense index of a block type inside a [`crate::BlockRegistry`].
pub type BlockId = u16;

/// Handle for one placed block: its type plus a state validated against that type's schema.
/// Only [`crate::BlockFactory::create_block`] constructs one.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Block {
    id: BlockId,
    state: StateInstance,
}

impl Block {
    pub(crate) fn new(id: BlockId, state: StateInstance) -> Self {
        Self { id, state }
    }

    #[inline]
    pub fn id(&self) -> BlockId {
        self.id
    }

    #[inline]
    pub fn state(&self) -> &StateInstance {
        &self.state
    }
}

// Used by cube-like shapes to resolve which texture and tint to apply
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FaceRole {
    All,
    Top,
    Bottom,
    Side,
}

impl FaceRole {
    /// Classifies a facing into top/bottom/side.
    #[inline]
    pub fn of(facing: Facing) -> FaceRole {
        match facing {
            Facing::Top => FaceRole::Top,
            Facing::Bottom => FaceRole::Bottom,
            _ => FaceRole::Side,
        }
    }
}
