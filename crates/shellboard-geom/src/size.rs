use crate::{Error, Result, Position};

/// A width and height in character cells, with no location.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Size {
    /// Width in columns.
    pub width: i32,
    /// Height in rows.
    pub height: i32,
}

impl Size {
    /// Construct a new size.
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// A zero-valued size.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The number of cells covered.
    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    /// True if this size can completely enclose `other` in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.width >= other.width && self.height >= other.height
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

impl From<(i32, i32)> for Size {
    fn from(v: (i32, i32)) -> Self {
        Self {
            width: v.0,
            height: v.1,
        }
    }
}

impl From<Position> for Size {
    fn from(p: Position) -> Self {
        Self {
            width: p.x,
            height: p.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_and_contains() {
        let s = Size::new(4, 3);
        assert_eq!(s.area(), 12);
        assert!(s.contains(&Size::new(4, 1)));
        assert!(!s.contains(&Size::new(5, 1)));
        assert_eq!(Size::from(Position::new(2, 5)), Size::new(2, 5));
    }

    #[test]
    fn checked_div_by_zero() {
        assert!(Size::new(1, 1).checked_div(0).is_err());
    }
}
