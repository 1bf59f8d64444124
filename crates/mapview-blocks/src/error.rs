use std::path::PathBuf;

use thiserror::Error;

/// Failures while declaring axes or constructing state instances.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("state axis `{0}` is already registered")]
    DuplicateAxis(String),
    #[error("state axis `{0}` has an empty domain")]
    EmptyDomain(String),
    #[error("value {value} is outside the domain of axis `{axis}`")]
    DomainViolation { axis: String, value: i32 },
    #[error("no value supplied for axis `{0}`")]
    MissingAxis(String),
    #[error("unknown state axis `{0}`")]
    UnknownAxis(String),
    #[error("`{value}` is not a valid value for axis `{axis}`")]
    InvalidValue { axis: String, value: String },
    #[error("legacy data value {0} does not map to a state")]
    LegacyData(u8),
    #[error("state has {found} values but the schema declares {expected} axes")]
    WrongArity { expected: usize, found: usize },
    #[error("block handle of type {found} passed to block type {expected}")]
    ForeignBlock { expected: u16, found: u16 },
}

/// Registration and lookup failures for block types.
#[derive(Debug, Error)]
pub enum BlockError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error("block `{block}` references unknown texture `{texture}`")]
    UnknownTexture { block: String, texture: String },
    #[error("block `{block}` uses unknown shape `{shape}`")]
    UnknownShape { block: String, shape: String },
    #[error("invalid definition for block `{block}`: {reason}")]
    InvalidDefinition { block: String, reason: String },
    #[error("block `{0}` is already registered")]
    DuplicateName(String),
    #[error("legacy block id {0} is already registered")]
    DuplicateLegacyId(u16),
    #[error("unknown block `{0}`")]
    UnknownBlock(String),
    #[error("no block registered for legacy id {0}")]
    UnknownLegacyId(u16),
    #[error("no block registered with id {0}")]
    UnknownBlockId(u16),
    #[error("texture catalog is full ({0} entries)")]
    TooManyTextures(usize),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}
