use serde::{Deserialize, Serialize};

/// One of the four arena boundaries.
///
/// `Left`/`Right` bound the x axis at `0`/`width`; `Top`/`Bottom` bound the y axis at
/// `0`/`width` (screen coordinates, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

impl Wall {
    /// All walls in a fixed order.
    pub const ALL: [Wall; 4] = [Wall::Left, Wall::Right, Wall::Top, Wall::Bottom];

    /// Axis index whose velocity component this wall inverts (0 = x, 1 = y).
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            Wall::Left | Wall::Right => 0,
            Wall::Top | Wall::Bottom => 1,
        }
    }

    /// True for the wall at coordinate `width`, false for the one at `0`.
    #[inline]
    pub fn is_max(self) -> bool {
        matches!(self, Wall::Right | Wall::Bottom)
    }

    #[inline]
    pub(crate) fn index(self) -> u32 {
        match self {
            Wall::Left => 0,
            Wall::Right => 1,
            Wall::Top => 2,
            Wall::Bottom => 3,
        }
    }
}
