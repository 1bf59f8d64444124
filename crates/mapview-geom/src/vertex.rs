/// A single model vertex: position in the unit cube plus a texture coordinate
/// inside one atlas tile.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub u: f32,
    pub v: f32,
}

/// Raw component indices used by the axis-generic face math.
pub(crate) const RAW_X: usize = 0;
pub(crate) const RAW_Y: usize = 1;
pub(crate) const RAW_Z: usize = 2;
pub(crate) const RAW_U: usize = 3;
pub(crate) const RAW_V: usize = 4;
pub(crate) const RAW_COMPONENTS: usize = 5;

impl Vertex {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, u: f32, v: f32) -> Self {
        Self { x, y, z, u, v }
    }

    #[inline]
    pub fn position(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn tex_coord(&self) -> [f32; 2] {
        [self.u, self.v]
    }

    #[inline]
    pub(crate) fn raw(&self, i: usize) -> f32 {
        match i {
            RAW_X => self.x,
            RAW_Y => self.y,
            RAW_Z => self.z,
            RAW_U => self.u,
            RAW_V => self.v,
            _ => unreachable!("raw vertex component {i} out of range"),
        }
    }

    #[inline]
    pub(crate) fn set_raw(&mut self, i: usize, value: f32) {
        match i {
            RAW_X => self.x = value,
            RAW_Y => self.y = value,
            RAW_Z => self.z = value,
            RAW_U => self.u = value,
            RAW_V => self.v = value,
            _ => unreachable!("raw vertex component {i} out of range"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn raw_accessors_mirror_fields(v in any::<Vertex>()) {
            let fields = [v.x, v.y, v.z, v.u, v.v];
            for (i, f) in fields.iter().enumerate() {
                prop_assert_eq!(v.raw(i).to_bits(), f.to_bits());
            }
        }
    }

    #[test]
    fn set_raw_touches_only_one_component() {
        let mut v = Vertex::new(0.0, 0.0, 0.0, 0.0, 0.0);
        v.set_raw(RAW_V, 0.5);
        assert_eq!(v, Vertex::new(0.0, 0.0, 0.0, 0.0, 0.5));
        v.set_raw(RAW_Y, 1.0);
        assert_eq!(v.position(), [0.0, 1.0, 0.0]);
        assert_eq!(v.tex_coord(), [0.0, 0.5]);
    }

    #[test]
    fn copies_are_independent() {
        let a = Vertex::new(1.0, 0.0, 1.0, 1.0, 1.0);
        let mut b = a;
        b.x = 0.25;
        assert_eq!(a.x, 1.0);
        assert_eq!(b.x, 0.25);
    }
}
