use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use mapview_geom::Model;

use crate::config::BlocksConfig;
use crate::error::BlockError;
use crate::factory::{BlockFactory, BlockKind};
use crate::kinds::compile_kind;
use crate::state::StateAllocator;
use crate::texture::{TextureCatalog, TextureSource};
use crate::types::{Block, BlockId};

/// All block types known to the viewer, addressable by dense id, name or legacy id.
#[derive(Default, Debug)]
pub struct BlockRegistry {
    pub textures: TextureCatalog,
    pub blocks: Vec<BlockFactory>,
    pub by_name: HashMap<String, BlockId>,
    pub by_legacy: HashMap<u16, BlockId>,
}

impl BlockRegistry {
    pub fn new(textures: TextureCatalog) -> Self {
        Self {
            textures,
            blocks: Vec::new(),
            by_name: HashMap::new(),
            by_legacy: HashMap::new(),
        }
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockFactory> {
        self.blocks.get(id as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&BlockFactory> {
        self.id_by_name(name).and_then(|id| self.get(id))
    }

    pub fn by_legacy_id(&self, legacy_id: u16) -> Option<&BlockFactory> {
        self.by_legacy.get(&legacy_id).and_then(|&id| self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockFactory> {
        self.blocks.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn load_from_paths(
        textures_path: impl AsRef<Path>,
        blocks_path: impl AsRef<Path>,
    ) -> Result<Self, BlockError> {
        let textures = TextureCatalog::from_path(textures_path)?;
        let blocks_path = blocks_path.as_ref();
        let blocks_toml = fs::read_to_string(blocks_path).map_err(|source| BlockError::Io {
            path: blocks_path.to_path_buf(),
            source,
        })?;
        let blocks_cfg: BlocksConfig = toml::from_str(&blocks_toml)?;
        Self::from_configs(textures, blocks_cfg)
    }

    pub fn from_configs(textures: TextureCatalog, cfg: BlocksConfig) -> Result<Self, BlockError> {
        let mut reg = BlockRegistry::new(textures);
        for def in &cfg.blocks {
            reg.register_boxed(&def.name, def.id, |states, textures| {
                compile_kind(def, states, textures)
            })?;
        }
        log::info!(
            "block registry: {} block types, {} states, {} textures",
            reg.len(),
            reg.iter().map(|b| b.schema().state_count()).sum::<usize>(),
            reg.textures.len()
        );
        Ok(reg)
    }

    /// Registers a block type declared in code. Names and legacy ids must be unique.
    pub fn register_with<K, F>(
        &mut self,
        name: &str,
        legacy_id: u16,
        declare: F,
    ) -> Result<BlockId, BlockError>
    where
        K: BlockKind + 'static,
        F: FnOnce(&mut StateAllocator, &dyn TextureSource) -> Result<K, BlockError>,
    {
        self.register_boxed(name, legacy_id, |states, textures| {
            declare(states, textures).map(|k| Box::new(k) as Box<dyn BlockKind>)
        })
    }

    fn register_boxed<F>(&mut self, name: &str, legacy_id: u16, declare: F) -> Result<BlockId, BlockError>
    where
        F: FnOnce(&mut StateAllocator, &dyn TextureSource) -> Result<Box<dyn BlockKind>, BlockError>,
    {
        if self.by_name.contains_key(name) {
            return Err(BlockError::DuplicateName(name.to_string()));
        }
        if self.by_legacy.contains_key(&legacy_id) {
            return Err(BlockError::DuplicateLegacyId(legacy_id));
        }
        let id = BlockId::try_from(self.blocks.len()).map_err(|_| BlockError::InvalidDefinition {
            block: name.to_string(),
            reason: "registry is full".into(),
        })?;
        let textures: &dyn TextureSource = &self.textures;
        let factory = BlockFactory::declare_boxed(id, name, legacy_id, |states| {
            declare(states, textures)
        })?;
        self.blocks.push(factory);
        self.by_name.insert(name.to_string(), id);
        self.by_legacy.insert(legacy_id, id);
        Ok(id)
    }

    /// Builds a block from textual properties; `None` only works for stateless types.
    pub fn make_block_by_name(
        &self,
        name: &str,
        props: Option<&HashMap<String, String>>,
    ) -> Result<Block, BlockError> {
        let factory = self
            .by_name(name)
            .ok_or_else(|| BlockError::UnknownBlock(name.to_string()))?;
        let state = match props {
            Some(props) => factory.schema().instance_from_props(props)?,
            None => factory.schema().builder().build()?,
        };
        Ok(factory.create_block(state)?)
    }

    /// Decodes a `(legacy id, data)` pair from world data.
    pub fn block_from_legacy(&self, legacy_id: u16, data: u8) -> Result<Block, BlockError> {
        let factory = self
            .by_legacy_id(legacy_id)
            .ok_or(BlockError::UnknownLegacyId(legacy_id))?;
        let state = factory.state_from_legacy(data)?;
        Ok(factory.create_block(state)?)
    }

    fn factory_of(&self, block: &Block) -> Result<&BlockFactory, BlockError> {
        self.get(block.id())
            .ok_or(BlockError::UnknownBlockId(block.id()))
    }

    /// Encodes `block` back into its `(legacy id, data)` pair.
    pub fn legacy_of(&self, block: &Block) -> Result<(u16, u8), BlockError> {
        let factory = self.factory_of(block)?;
        Ok((factory.legacy_id(), factory.legacy_data(block.state())?))
    }

    pub fn model(&self, block: &Block) -> Result<Arc<Model>, BlockError> {
        Ok(self.factory_of(block)?.model(block)?)
    }
}
