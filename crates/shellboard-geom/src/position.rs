use crate::{Error, Result, Size};

/// A location in character cells. Positions are relative to whatever the
/// caller considers the origin; the render pipeline treats them as offsets
/// from a parent.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Position {
    /// Construct a new position.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// True if both coordinates are zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Componentwise division that fails instead of panicking on a zero
    /// divisor.
    pub fn checked_div(&self, d: i32) -> Result<Self> {
        if d == 0 {
            return Err(Error::Geometry(format!("cannot divide {self:?} by zero")));
        }
        Ok(*self / d)
    }
}

impl From<(i32, i32)> for Position {
    #[inline]
    fn from(v: (i32, i32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

impl From<Size> for Position {
    fn from(s: Size) -> Self {
        Self {
            x: s.width,
            y: s.height,
        }
    }
}
