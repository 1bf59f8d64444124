use std::fmt;
use std::str::FromStr;

use crate::GeomError;
use crate::vertex::{RAW_X, RAW_Y, RAW_Z};

/// Direction a model face points. `Left`/`Right` run along X, `Front`/`Back` along Z.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Facing {
    Top = 0,
    Bottom = 1,
    Left = 2,
    Right = 3,
    Front = 4,
    Back = 5,
}

impl Facing {
    pub const ALL: [Facing; 6] = [
        Facing::Top,
        Facing::Bottom,
        Facing::Left,
        Facing::Right,
        Facing::Front,
        Facing::Back,
    ];

    /// Returns the `[0..6)` index of this facing.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts an index `[0..6)` back into a `Facing`.
    #[inline]
    pub fn from_index(i: usize) -> Result<Facing, GeomError> {
        Facing::ALL
            .get(i)
            .copied()
            .ok_or(GeomError::UnsupportedFacing(i))
    }

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Facing::Top => "top",
            Facing::Bottom => "bottom",
            Facing::Left => "left",
            Facing::Right => "right",
            Facing::Front => "front",
            Facing::Back => "back",
        }
    }

    #[inline]
    pub fn opposite(self) -> Facing {
        match self {
            Facing::Top => Facing::Bottom,
            Facing::Bottom => Facing::Top,
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
            Facing::Front => Facing::Back,
            Facing::Back => Facing::Front,
        }
    }

    /// Returns the integer grid delta `(dx,dy,dz)` of the neighbour this face looks at.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Facing::Top => (0, 1, 0),
            Facing::Bottom => (0, -1, 0),
            Facing::Left => (1, 0, 0),
            Facing::Right => (-1, 0, 0),
            Facing::Front => (0, 0, 1),
            Facing::Back => (0, 0, -1),
        }
    }

    /// Raw vertex component moved by `set_offset`.
    #[inline]
    pub(crate) fn normal_axis(self) -> usize {
        match self {
            Facing::Top | Facing::Bottom => RAW_Y,
            Facing::Left | Facing::Right => RAW_X,
            Facing::Front | Facing::Back => RAW_Z,
        }
    }

    /// Raw vertex components `(width, height)` spanned by the face plane.
    #[inline]
    pub(crate) fn plane_axes(self) -> (usize, usize) {
        match self {
            Facing::Top | Facing::Bottom => (RAW_X, RAW_Z),
            Facing::Left | Facing::Right => (RAW_Z, RAW_Y),
            Facing::Front | Facing::Back => (RAW_X, RAW_Y),
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Facing {
    type Err = GeomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Facing::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| GeomError::UnknownFacing(s.to_string()))
    }
}
