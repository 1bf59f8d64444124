use serde::Deserialize;

use crate::types::FaceRole;

// Top-level blocks config file
#[derive(Deserialize, Debug)]
pub struct BlocksConfig {
    pub blocks: Vec<BlockDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    pub name: String,
    // Legacy numeric block id used by world data and the wire format
    pub id: u16,

    #[serde(default)]
    pub shape: Option<ShapeConfig>,

    #[serde(default)]
    pub textures: Option<TexturesDef>,

    #[serde(default)]
    pub tint: Option<TintDef>,

    // Only honoured by full cubes; partial shapes decide cullability per face
    #[serde(default)]
    pub cullable: Option<bool>,
}

// Shape config supports either a simple string ("cube") or a detailed table
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum ShapeConfig {
    Simple(String),
    Detailed(ShapeDetailed),
}

impl ShapeConfig {
    pub fn kind(&self) -> &str {
        match self {
            ShapeConfig::Simple(k) => k,
            ShapeConfig::Detailed(d) => &d.kind,
        }
    }

    pub fn stages(&self) -> Option<i32> {
        match self {
            ShapeConfig::Simple(_) => None,
            ShapeConfig::Detailed(d) => d.stages,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ShapeDetailed {
    pub kind: String,
    // Growth stages for crops
    #[serde(default)]
    pub stages: Option<i32>,
}

// Texture names by face role; role-specific entries win over `all`
#[derive(Deserialize, Debug, Clone, Default)]
pub struct TexturesDef {
    #[serde(default)]
    pub all: Option<String>,
    #[serde(default)]
    pub top: Option<String>,
    #[serde(default)]
    pub bottom: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
}

impl TexturesDef {
    pub fn name_for(&self, role: FaceRole) -> Option<&str> {
        let specific = match role {
            FaceRole::Top => self.top.as_ref(),
            FaceRole::Bottom => self.bottom.as_ref(),
            FaceRole::Side => self.side.as_ref(),
            FaceRole::All => None,
        };
        specific.or(self.all.as_ref()).map(|s| s.as_str())
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct TintDef {
    #[serde(default)]
    pub all: Option<TintConfig>,
    #[serde(default)]
    pub top: Option<TintConfig>,
    #[serde(default)]
    pub bottom: Option<TintConfig>,
    #[serde(default)]
    pub side: Option<TintConfig>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(untagged)]
pub enum TintConfig {
    Biome(BiomeTint),
    Rgb([u8; 3]),
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BiomeTint {
    Grass,
    Foliage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_and_detailed_shapes() {
        let cfg: BlocksConfig = toml::from_str(
            r#"
            [[blocks]]
            name = "grass"
            id = 2
            shape = "cube"
            textures = { top = "grass_top", bottom = "dirt", side = "grass_side" }
            tint = { top = "grass", side = [200, 180, 90] }

            [[blocks]]
            name = "wheat"
            id = 59
            shape = { kind = "crops", stages = 8 }
            textures = { all = "wheat_stage" }
        "#,
        )
        .unwrap();
        assert_eq!(cfg.blocks.len(), 2);
        let grass = &cfg.blocks[0];
        assert_eq!(grass.shape.as_ref().unwrap().kind(), "cube");
        let tint = grass.tint.as_ref().unwrap();
        assert_eq!(tint.top, Some(TintConfig::Biome(BiomeTint::Grass)));
        assert_eq!(tint.side, Some(TintConfig::Rgb([200, 180, 90])));
        let wheat = &cfg.blocks[1];
        assert_eq!(wheat.shape.as_ref().unwrap().kind(), "crops");
        assert_eq!(wheat.shape.as_ref().unwrap().stages(), Some(8));
    }
}
