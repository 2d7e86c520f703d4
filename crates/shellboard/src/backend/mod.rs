//! Terminal drivers.

/// Crossterm terminal driver.
pub mod crossterm;

use crate::{Result, event::key::Key, geom::Position};

/// The terminal seen by a [`Root`](crate::Root): a write surface for
/// flattened paints and a blocking source of keys.
pub trait Backend {
    /// Prepare the terminal for drawing.
    fn start(&mut self) -> Result<()>;

    /// Restore the terminal. Called once on every exit path of the run loop.
    fn stop(&mut self) -> Result<()>;

    /// Blank the screen ahead of a frame.
    fn clear(&mut self) -> Result<()>;

    /// Write text at an absolute position. Text may span several lines; each
    /// line starts at `position.x`.
    fn paint(&mut self, position: Position, text: &str) -> Result<()>;

    /// Make the current frame visible.
    fn flush(&mut self) -> Result<()>;

    /// Block until the next key press.
    fn read_key(&mut self) -> Result<Key>;
}
