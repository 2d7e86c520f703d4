//! Focus position within a container's children.

use crate::{collection::Collection, element::Element};

/// Tracks which child of a [`Collection`] holds focus.
///
/// The controller stores only an index; the collection is passed to each
/// call so the owning container keeps sole ownership of its children.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CursorController {
    /// Index of the focused child.
    position: usize,
}

impl CursorController {
    /// A cursor at index 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// The focused index.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Place the cursor without checks.
    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    /// The focused child, if the index is in range.
    pub fn current<'a>(&self, children: &'a Collection) -> Option<&'a dyn Element> {
        children.get(self.position)
    }

    /// The focused child, mutably.
    pub fn current_mut<'a>(&self, children: &'a mut Collection) -> Option<&'a mut dyn Element> {
        children.get_mut(self.position)
    }

    /// Move by `step` strides until a child satisfying `pred` is found.
    ///
    /// Each attempt advances exactly one stride from the previous attempt.
    /// Returns the new index, or `None` if the search runs off either end or
    /// `step` is zero; in that case the cursor does not move.
    pub fn move_by(
        &mut self,
        children: &Collection,
        step: isize,
        pred: impl Fn(&dyn Element) -> bool,
    ) -> Option<usize> {
        if step == 0 {
            return None;
        }
        let len = children.len() as isize;
        let mut target = (self.position as isize).checked_add(step)?;
        while (0..len).contains(&target) {
            if children.get(target as usize).is_some_and(&pred) {
                self.position = target as usize;
                return Some(self.position);
            }
            target = target.checked_add(step)?;
        }
        None
    }

    /// Make sure the cursor rests on a child satisfying `pred`, searching
    /// forward first and then backward. Returns the resting index, or `None`
    /// if no child qualifies.
    pub fn settle(
        &mut self,
        children: &Collection,
        pred: impl Fn(&dyn Element) -> bool,
    ) -> Option<usize> {
        if children.is_empty() {
            self.position = 0;
            return None;
        }
        if self.position >= children.len() {
            self.position = children.len() - 1;
        }
        if self.current(children).is_some_and(&pred) {
            return Some(self.position);
        }
        self.move_by(children, 1, &pred)
            .or_else(|| self.move_by(children, -1, &pred))
    }
}
