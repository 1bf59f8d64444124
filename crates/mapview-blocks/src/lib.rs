//! Block types, state schemas, model caches and the block registry.
#![forbid(unsafe_code)]

pub mod cache;
pub mod config;
pub mod error;
pub mod factory;
pub mod kinds;
pub mod registry;
pub mod state;
pub mod texture;
pub mod types;

pub use cache::{ModelCache, ModelCacheStats};
pub use error::{BlockError, StateError};
pub use factory::{BlockFactory, BlockKind};
pub use registry::BlockRegistry;
pub use state::{
    AxisDomain, StateAllocator, StateAxis, StateBuilder, StateEnum, StateInstance, StateKey,
    StateSchema, StateValue,
};
pub use texture::{TextureCatalog, TextureSource};
pub use types::{Block, BlockId, FaceRole};
