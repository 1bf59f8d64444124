use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use mapview_geom::TextureRef;
use serde::Deserialize;

use crate::error::BlockError;

/// Resolves symbolic texture names to atlas handles. Implemented by whatever owns the atlas.
pub trait TextureSource {
    fn texture(&self, name: &str) -> Option<TextureRef>;
}

#[derive(Clone, Debug)]
pub struct TextureEntry {
    pub id: TextureRef,
    pub name: String,
    pub candidates: Vec<PathBuf>,
    pub render_tag: Option<String>,
}

/// Texture names known to the viewer, loaded from `textures.toml`.
#[derive(Default, Clone, Debug)]
pub struct TextureCatalog {
    pub entries: Vec<TextureEntry>,
    pub by_name: HashMap<String, TextureRef>,
}

impl TextureCatalog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Builds a catalogue from bare names; each name doubles as its own file stem.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self, BlockError> {
        let mut names: Vec<&str> = names.into_iter().collect();
        names.sort_unstable();
        names.dedup();
        let mut catalog = TextureCatalog::new();
        for name in names {
            catalog.push(name.to_string(), vec![PathBuf::from(format!("{name}.png"))], None)?;
        }
        Ok(catalog)
    }

    pub fn get(&self, id: TextureRef) -> Option<&TextureEntry> {
        self.entries.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(
        &mut self,
        name: String,
        candidates: Vec<PathBuf>,
        render_tag: Option<String>,
    ) -> Result<TextureRef, BlockError> {
        let id = u16::try_from(self.entries.len())
            .map(TextureRef)
            .map_err(|_| BlockError::TooManyTextures(self.entries.len()))?;
        self.by_name.insert(name.clone(), id);
        self.entries.push(TextureEntry {
            id,
            name,
            candidates,
            render_tag,
        });
        Ok(id)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, BlockError> {
        let cfg: TexturesConfig = toml::from_str(toml_str)?;
        let mut catalog = TextureCatalog::new();
        let mut entries: Vec<(String, TextureConfigEntry)> = cfg.textures.into_iter().collect();
        // HashMap iteration order is nondeterministic; sort names so TextureRef assignment is stable.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, entry) in entries {
            let (paths, render_tag) = match entry {
                TextureConfigEntry::Paths(v) => (v, None),
                TextureConfigEntry::Detail { paths, render_tag } => (paths, render_tag),
            };
            catalog.push(name, paths.into_iter().map(PathBuf::from).collect(), render_tag)?;
        }
        log::debug!("texture catalog: {} entries", catalog.len());
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BlockError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| BlockError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }
}

impl TextureSource for TextureCatalog {
    fn texture(&self, name: &str) -> Option<TextureRef> {
        self.by_name.get(name).copied()
    }
}

// --- Config ---

#[derive(Deserialize)]
pub struct TexturesConfig {
    pub textures: HashMap<String, TextureConfigEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum TextureConfigEntry {
    // Simple: name = ["assets/blocks/foo.png", ...]
    Paths(Vec<String>),
    // Detailed: name = { paths = ["..."], render_tag = "leaves" }
    Detail {
        paths: Vec<String>,
        render_tag: Option<String>,
    },
}
