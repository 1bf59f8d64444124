use crate::BLOCK_GRID;
use crate::facing::Facing;
use crate::template;
use crate::vertex::{RAW_COMPONENTS, RAW_U, RAW_V, Vertex};

/// Opaque handle into the texture atlas. Resolved to atlas-relative UVs at mesh assembly time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextureRef(pub u16);

/// A rectangle on the 16-unit block grid, relative to the face's own plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FaceRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FaceRect {
    pub const FULL: FaceRect = FaceRect::new(0.0, 0.0, BLOCK_GRID, BLOCK_GRID);

    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Resolved tint of a face as seen by the mesher.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tint {
    Fixed([u8; 3]),
    /// Sample the grass biome colour; `fallback` applies where no biome data exists.
    Grass { fallback: [u8; 3] },
    /// Sample the foliage biome colour; `fallback` applies where no biome data exists.
    Foliage { fallback: [u8; 3] },
}

impl Tint {
    #[inline]
    pub fn fallback(self) -> [u8; 3] {
        match self {
            Tint::Fixed(rgb) | Tint::Grass { fallback: rgb } | Tint::Foliage { fallback: rgb } => {
                rgb
            }
        }
    }
}

const WHITE: [u8; 3] = [255, 255, 255];

/// One quad of a block model.
///
/// Each vertex slot remembers which corner of the template it started as (a bit per raw
/// component, set when the template value was the high edge). Resizing rewrites by that role,
/// so slots stay position-independent and zero-sized faces can be resized again.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelFace {
    facing: Facing,
    vertices: [Vertex; 4],
    corners: [u8; 4],
    texture: TextureRef,
    cullable: bool,
    rgb: [u8; 3],
    grass_biome_colour: bool,
    foliage_biome_colour: bool,
}

impl ModelFace {
    /// Creates an uncullable, untinted face from the template for `facing`.
    pub fn new(facing: Facing, texture: TextureRef) -> Self {
        let vertices = template::vertices(facing);
        let mut corners = [0u8; 4];
        for (mask, vert) in corners.iter_mut().zip(vertices.iter()) {
            for i in 0..RAW_COMPONENTS {
                if vert.raw(i) > 0.5 {
                    *mask |= 1 << i;
                }
            }
        }
        Self {
            facing,
            vertices,
            corners,
            texture,
            cullable: false,
            rgb: WHITE,
            grass_biome_colour: false,
            foliage_biome_colour: false,
        }
    }

    /// Template copy moved to `offset` and sized to `rect` (texture coordinates included).
    pub fn quad(
        facing: Facing,
        texture: TextureRef,
        rect: FaceRect,
        offset: f32,
        cullable: bool,
    ) -> Self {
        let mut face = ModelFace::new(facing, texture);
        face.cullable = cullable;
        face.set_offset(offset);
        face.set_size(rect.x, rect.y, rect.width, rect.height);
        face
    }

    /// Moves the face along its normal to `offset / 16`.
    pub fn set_offset(&mut self, offset: f32) -> &mut Self {
        let axis = self.facing.normal_axis();
        let value = offset / BLOCK_GRID;
        for vert in &mut self.vertices {
            vert.set_raw(axis, value);
        }
        self
    }

    /// Positions and sizes the face within its plane, then maps the texture to the same rect.
    pub fn set_size(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        let (a, b) = self.facing.plane_axes();
        self.resize_components(a, b, x, y, width, height);
        self.set_texture_size(x, y, width, height)
    }

    /// Selects the region of the texture tile shown on this face.
    pub fn set_texture_size(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.resize_components(RAW_U, RAW_V, x, y, width, height);
        self
    }

    fn resize_components(&mut self, a: usize, b: usize, x: f32, y: f32, w: f32, h: f32) {
        let (a_lo, a_hi) = (x / BLOCK_GRID, (x + w) / BLOCK_GRID);
        let (b_lo, b_hi) = (y / BLOCK_GRID, (y + h) / BLOCK_GRID);
        for (vert, &mask) in self.vertices.iter_mut().zip(self.corners.iter()) {
            vert.set_raw(a, if mask & (1 << a) != 0 { a_hi } else { a_lo });
            vert.set_raw(b, if mask & (1 << b) != 0 { b_hi } else { b_lo });
        }
    }

    pub fn colour(&mut self, r: u8, g: u8, b: u8) -> &mut Self {
        self.rgb = [r, g, b];
        self
    }

    pub fn use_grass_biome_colour(&mut self) -> &mut Self {
        self.grass_biome_colour = true;
        self
    }

    pub fn use_foliage_biome_colour(&mut self) -> &mut Self {
        self.foliage_biome_colour = true;
        self
    }

    pub fn set_cullable(&mut self, cullable: bool) -> &mut Self {
        self.cullable = cullable;
        self
    }

    pub fn set_texture(&mut self, texture: TextureRef) -> &mut Self {
        self.texture = texture;
        self
    }

    /// Visits the four vertices in slot order.
    pub fn for_each(&self, mut visit: impl FnMut(&Vertex)) -> &Self {
        for vert in &self.vertices {
            visit(vert);
        }
        self
    }

    /// Mutable variant of [`ModelFace::for_each`]; only usable while the model is being built.
    pub fn for_each_mut(&mut self, mut visit: impl FnMut(&mut Vertex)) -> &mut Self {
        for vert in &mut self.vertices {
            visit(vert);
        }
        self
    }

    #[inline]
    pub fn facing(&self) -> Facing {
        self.facing
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex; 4] {
        &self.vertices
    }

    #[inline]
    pub fn texture(&self) -> TextureRef {
        self.texture
    }

    #[inline]
    pub fn is_cullable(&self) -> bool {
        self.cullable
    }

    #[inline]
    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }

    /// Grass wins when both biome flags are set.
    #[inline]
    pub fn tint(&self) -> Tint {
        if self.grass_biome_colour {
            Tint::Grass { fallback: self.rgb }
        } else if self.foliage_biome_colour {
            Tint::Foliage { fallback: self.rgb }
        } else {
            Tint::Fixed(self.rgb)
        }
    }
}
