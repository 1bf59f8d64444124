//! Canonical unit-square quads, one per facing. Every generated face starts from a copy.
//!
//! All templates sit on the plane `normal = 0`; `ModelFace::set_offset` moves them into place.
//! Vertex order triangulates as `TRIANGLE_INDICES` with outward winding.

use crate::facing::Facing;
use crate::vertex::Vertex;

/// Index pattern turning the four vertices of a face into two triangles.
pub const TRIANGLE_INDICES: [u16; 6] = [0, 1, 2, 1, 3, 2];

const fn v(x: f32, y: f32, z: f32, u: f32, v: f32) -> Vertex {
    Vertex::new(x, y, z, u, v)
}

const DEFAULT_FACES: [[Vertex; 4]; 6] = [
    // Top
    [
        v(0.0, 0.0, 0.0, 0.0, 0.0),
        v(1.0, 0.0, 0.0, 1.0, 0.0),
        v(0.0, 0.0, 1.0, 0.0, 1.0),
        v(1.0, 0.0, 1.0, 1.0, 1.0),
    ],
    // Bottom
    [
        v(0.0, 0.0, 0.0, 0.0, 0.0),
        v(0.0, 0.0, 1.0, 0.0, 1.0),
        v(1.0, 0.0, 0.0, 1.0, 0.0),
        v(1.0, 0.0, 1.0, 1.0, 1.0),
    ],
    // Left
    [
        v(0.0, 0.0, 0.0, 1.0, 1.0),
        v(0.0, 0.0, 1.0, 0.0, 1.0),
        v(0.0, 1.0, 0.0, 1.0, 0.0),
        v(0.0, 1.0, 1.0, 0.0, 0.0),
    ],
    // Right
    [
        v(0.0, 0.0, 0.0, 0.0, 1.0),
        v(0.0, 1.0, 0.0, 0.0, 0.0),
        v(0.0, 0.0, 1.0, 1.0, 1.0),
        v(0.0, 1.0, 1.0, 1.0, 0.0),
    ],
    // Front
    [
        v(0.0, 0.0, 0.0, 0.0, 1.0),
        v(0.0, 1.0, 0.0, 0.0, 0.0),
        v(1.0, 0.0, 0.0, 1.0, 1.0),
        v(1.0, 1.0, 0.0, 1.0, 0.0),
    ],
    // Back
    [
        v(0.0, 0.0, 0.0, 1.0, 1.0),
        v(1.0, 0.0, 0.0, 0.0, 1.0),
        v(0.0, 1.0, 0.0, 1.0, 0.0),
        v(1.0, 1.0, 0.0, 0.0, 0.0),
    ],
];

/// Returns a fresh copy of the template quad for `facing`.
#[inline]
pub fn vertices(facing: Facing) -> [Vertex; 4] {
    DEFAULT_FACES[facing.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_are_planar_at_zero() {
        for f in Facing::ALL {
            for vert in vertices(f) {
                assert_eq!(vert.raw(f.normal_axis()), 0.0, "{f} template off-plane");
            }
        }
    }

    #[test]
    fn templates_cover_the_unit_square() {
        for f in Facing::ALL {
            let (a, b) = f.plane_axes();
            let verts = vertices(f);
            for (i, p) in verts.iter().enumerate() {
                for q in &verts[i + 1..] {
                    let same = p.raw(a) == q.raw(a) && p.raw(b) == q.raw(b);
                    assert!(!same, "{f} template has duplicate corners");
                }
            }
        }
    }

    #[test]
    fn copies_do_not_alias_the_table() {
        let mut top = vertices(Facing::Top);
        top[0].y = 0.5;
        assert_eq!(vertices(Facing::Top)[0].y, 0.0);
    }
}
