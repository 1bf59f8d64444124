use std::fmt;
use std::sync::Arc;

use mapview_geom::Model;

use crate::cache::{ModelCache, ModelCacheStats};
use crate::error::{BlockError, StateError};
use crate::state::{StateAllocator, StateInstance, StateSchema};
use crate::types::{Block, BlockId};

/// Geometry rule of one block type.
///
/// Axes are declared by the implementor's constructor against a [`StateAllocator`]; the
/// keys it gets back are what `build_model` reads. `build_model` must be a pure function
/// of the state values: the result is cached and shared.
pub trait BlockKind: Send + Sync {
    fn build_model(&self, state: &StateInstance) -> Model;

    /// Backward-compatible numeric encoding of `state` for world data and the wire format.
    fn legacy_data(&self, state: &StateInstance) -> u8 {
        let _ = state;
        0
    }

    /// Inverse of [`BlockKind::legacy_data`].
    fn state_from_legacy(
        &self,
        schema: &StateSchema,
        data: u8,
    ) -> Result<StateInstance, StateError> {
        if data == 0 && schema.is_empty() {
            schema.builder().build()
        } else {
            Err(StateError::LegacyData(data))
        }
    }
}

/// A registered block type: its frozen state schema, geometry rule and model cache.
pub struct BlockFactory {
    id: BlockId,
    name: String,
    legacy_id: u16,
    schema: StateSchema,
    kind: Box<dyn BlockKind>,
    cache: ModelCache,
}

impl BlockFactory {
    /// Runs `declare` against a fresh allocator and freezes the resulting schema.
    pub fn declare<K, F>(
        id: BlockId,
        name: &str,
        legacy_id: u16,
        declare: F,
    ) -> Result<Self, BlockError>
    where
        K: BlockKind + 'static,
        F: FnOnce(&mut StateAllocator) -> Result<K, BlockError>,
    {
        Self::declare_boxed(id, name, legacy_id, |states| {
            declare(states).map(|k| Box::new(k) as Box<dyn BlockKind>)
        })
    }

    pub(crate) fn declare_boxed<F>(
        id: BlockId,
        name: &str,
        legacy_id: u16,
        declare: F,
    ) -> Result<Self, BlockError>
    where
        F: FnOnce(&mut StateAllocator) -> Result<Box<dyn BlockKind>, BlockError>,
    {
        let mut states = StateAllocator::new();
        let kind = declare(&mut states)?;
        let schema = states.finish();
        log::debug!(
            "declared block `{}` (legacy id {}) with {} axes, {} states",
            name,
            legacy_id,
            schema.len(),
            schema.state_count()
        );
        Ok(Self {
            id,
            name: name.to_string(),
            legacy_id,
            schema,
            kind,
            cache: ModelCache::new(),
        })
    }

    #[inline]
    pub fn id(&self) -> BlockId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn legacy_id(&self) -> u16 {
        self.legacy_id
    }

    #[inline]
    pub fn schema(&self) -> &StateSchema {
        &self.schema
    }

    /// Binds `state` to this block type. Fails unless it holds one in-domain value per axis.
    pub fn create_block(&self, state: StateInstance) -> Result<Block, StateError> {
        self.schema.validate(&state)?;
        Ok(Block::new(self.id, state))
    }

    fn check_owner(&self, block: &Block) -> Result<(), StateError> {
        if block.id() != self.id {
            return Err(StateError::ForeignBlock {
                expected: self.id,
                found: block.id(),
            });
        }
        Ok(())
    }

    /// Returns the shared model for `block`, building and publishing it on first use.
    pub fn model(&self, block: &Block) -> Result<Arc<Model>, StateError> {
        self.check_owner(block)?;
        self.model_for_state(block.state())
    }

    pub fn model_for_state(&self, state: &StateInstance) -> Result<Arc<Model>, StateError> {
        self.schema.validate(state)?;
        Ok(self
            .cache
            .get_or_build(state, || self.kind.build_model(state)))
    }

    pub fn legacy_data(&self, state: &StateInstance) -> Result<u8, StateError> {
        self.schema.validate(state)?;
        Ok(self.kind.legacy_data(state))
    }

    pub fn state_from_legacy(&self, data: u8) -> Result<StateInstance, StateError> {
        self.kind.state_from_legacy(&self.schema, data)
    }

    pub fn cache_stats(&self) -> ModelCacheStats {
        self.cache.stats()
    }
}

impl fmt::Debug for BlockFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockFactory")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("legacy_id", &self.legacy_id)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}
