//! Geometry primitives used across shellboard.
//!
//! Both [`Position`] and [`Size`] are two-component integer vectors. They
//! support componentwise `+ - * / %` against each other and against a scalar,
//! and convert freely into one another.

#![warn(missing_docs)]

/// Error types for geometry operations.
mod error;
/// Componentwise operator implementations.
mod ops;
/// Position type.
mod position;
/// Width/height size type.
mod size;

pub use error::{Error, Result};
pub use position::Position;
pub use size::Size;

/// The axis along which a container stacks its children.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Axis {
    /// Children are stacked left to right.
    Horizontal,
    /// Children are stacked top to bottom.
    Vertical,
}

impl Axis {
    /// The coordinate of `p` along this axis.
    pub fn coord(&self, p: Position) -> i32 {
        match self {
            Self::Horizontal => p.x,
            Self::Vertical => p.y,
        }
    }

    /// Return `p` with its coordinate along this axis replaced by `v`.
    pub fn with_coord(&self, p: Position, v: i32) -> Position {
        match self {
            Self::Horizontal => Position::new(v, p.y),
            Self::Vertical => Position::new(p.x, v),
        }
    }

    /// The extent of `s` along this axis.
    pub fn extent(&self, s: Size) -> i32 {
        match self {
            Self::Horizontal => s.width,
            Self::Vertical => s.height,
        }
    }

    /// The extent of `s` across this axis.
    pub fn cross_extent(&self, s: Size) -> i32 {
        match self {
            Self::Horizontal => s.height,
            Self::Vertical => s.width,
        }
    }

    /// Build a size from an extent along this axis and an extent across it.
    pub fn size(&self, along: i32, across: i32) -> Size {
        match self {
            Self::Horizontal => Size::new(along, across),
            Self::Vertical => Size::new(across, along),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_coordinates() {
        let p = Position::new(3, 7);
        assert_eq!(Axis::Horizontal.coord(p), 3);
        assert_eq!(Axis::Vertical.coord(p), 7);
        assert_eq!(Axis::Vertical.with_coord(p, 1), Position::new(3, 1));
        assert_eq!(Axis::Horizontal.with_coord(p, 1), Position::new(1, 7));
    }

    #[test]
    fn axis_sizes() {
        let s = Size::new(4, 2);
        assert_eq!(Axis::Horizontal.extent(s), 4);
        assert_eq!(Axis::Horizontal.cross_extent(s), 2);
        assert_eq!(Axis::Vertical.size(5, 9), Size::new(9, 5));
        assert_eq!(Axis::Horizontal.size(5, 9), Size::new(5, 9));
    }
}
