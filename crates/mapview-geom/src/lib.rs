//! Block-local geometry: vertices, facings, face templates and models (no renderer dependency).
#![forbid(unsafe_code)]

pub mod face;
pub mod facing;
pub mod model;
pub mod template;
pub mod vertex;

pub use face::{FaceRect, ModelFace, TextureRef, Tint};
pub use facing::Facing;
pub use model::Model;
pub use vertex::Vertex;

use thiserror::Error;

/// Errors raised when a facing cannot be resolved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeomError {
    #[error("unsupported face index {0} (expected 0..6)")]
    UnsupportedFacing(usize),
    #[error("unknown face name `{0}`")]
    UnknownFacing(String),
}

/// Number of grid units along one block edge; public setters take values on this grid.
pub const BLOCK_GRID: f32 = 16.0;
