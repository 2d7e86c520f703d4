//! The element contract and tree traversal.

use std::{
    any::{Any, type_name},
    rc::Rc,
};

use serde_json::Value;

use crate::{
    collection::Collection,
    error::{Error, Result},
    event::key::Key,
    flags,
    geom::{Position, Size},
    keyboard::Outcome,
    observer::Observer,
    render::{Buffer, Content},
    state::{ElementBase, ElementState},
};

/// A node in the widget tree.
///
/// Concrete elements embed an [`ElementBase`] and supply sizing, rendering
/// and key handling. Everything else - focus state, size bookkeeping and the
/// deferred render buffer - is provided in terms of those.
pub trait Element: Any {
    /// Shared element state.
    fn base(&self) -> &ElementBase;

    /// Mutable shared element state.
    fn base_mut(&mut self) -> &mut ElementBase;

    /// The size this element would like, computed from its content.
    fn measure(&self) -> Size;

    /// Produce this element's content: text for leaves, child buffers for
    /// containers.
    fn render(&self) -> Result<Content<'_>>;

    /// Route a key through this element's bindings.
    fn key_pressed(&mut self, key: &Key) -> Result<Vec<Outcome>>;

    /// Upcast for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Refresh the stored size from content, unless the size is fixed.
    fn get_size(&mut self) -> Size {
        if self.base().is_fixed_size() {
            return self.base().size;
        }
        let size = self.measure();
        self.base_mut().size = size;
        size
    }

    /// Bring derived state up to date before a frame.
    fn update(&mut self) -> Result<()> {
        self.get_size();
        Ok(())
    }

    /// A deferred render of this element at its stored position and size.
    fn build(&self) -> Buffer<'_> {
        let base = self.base();
        Buffer::new(move || self.render(), base.position, base.size)
    }

    /// Put the element on the focus chain.
    fn select(&mut self) {
        self.base_mut().state = ElementState::Selected;
    }

    /// Take the element off the focus chain.
    fn deselect(&mut self) {
        self.base_mut().state = ElementState::Missed;
    }

    /// Can the cursor rest on this element?
    fn is_focusable(&self) -> bool {
        let base = self.base();
        base.is_active() && !base.is_hidden()
    }

    /// Freeze the element at `size`.
    fn set_fixed_size(&mut self, size: Size) {
        let base = self.base_mut();
        base.flags.set(flags::FIXED_SIZE, true);
        base.size = size;
    }

    /// Return to content-driven sizing.
    fn set_floating_size(&mut self) {
        self.base_mut().flags.set(flags::FIXED_SIZE, false);
        self.get_size();
    }

    /// Set the focus marker drawn by containers. Leaves ignore it.
    fn set_cursor_marker(&mut self, _marker: &str) {}

    /// Route event and key observation to `observer`.
    fn set_observer(&mut self, observer: Rc<dyn Observer>) {
        self.base_mut().set_observer(observer);
    }

    /// Child elements, for containers.
    fn children(&self) -> Option<&Collection> {
        None
    }

    /// Mutable child elements, for containers.
    fn children_mut(&mut self) -> Option<&mut Collection> {
        None
    }

    /// Builder: set the tag.
    fn with_tag(mut self, tag: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.base_mut().tag = tag.into();
        self
    }

    /// Builder: set the position relative to the parent.
    fn with_position(mut self, position: impl Into<Position>) -> Self
    where
        Self: Sized,
    {
        self.base_mut().position = position.into();
        self
    }

    /// Builder: freeze the size.
    fn with_fixed_size(mut self, size: impl Into<Size>) -> Self
    where
        Self: Sized,
    {
        self.set_fixed_size(size.into());
        self
    }

    /// Builder: write a flag.
    fn with_flag(mut self, key: &str, value: bool) -> Self
    where
        Self: Sized,
    {
        self.base_mut().flags.set(key, value);
        self
    }

    /// Builder: register an event handler.
    fn with_event<F>(mut self, name: &str, handler: F) -> Self
    where
        Self: Sized,
        F: FnMut(&[Value]) -> Result<Value> + 'static,
    {
        self.base_mut().events.set(name, handler);
        self
    }
}

/// Downcast an element to a concrete type.
pub fn downcast<T: Element>(element: &dyn Element) -> Result<&T> {
    let kind = element.base().kind();
    element
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| Error::Type(format!("expected {}, found <{kind}>", type_name::<T>())))
}

/// Mutably downcast an element to a concrete type.
pub fn downcast_mut<T: Element>(element: &mut dyn Element) -> Result<&mut T> {
    let kind = element.base().kind();
    element
        .as_any_mut()
        .downcast_mut::<T>()
        .ok_or_else(|| Error::Type(format!("expected {}, found <{kind}>", type_name::<T>())))
}

/// Visit `root` and all its descendants, parents before children.
pub fn preorder<'a>(root: &'a dyn Element, f: &mut dyn FnMut(&'a dyn Element, usize)) {
    walk(root, 0, f);
}

/// Pre-order walk with depth tracking.
fn walk<'a>(e: &'a dyn Element, depth: usize, f: &mut dyn FnMut(&'a dyn Element, usize)) {
    f(e, depth);
    if let Some(children) = e.children() {
        for child in children.iter() {
            walk(child, depth + 1, f);
        }
    }
}

/// Mutably visit `root` and all its descendants, parents before children.
/// The first error stops the walk.
pub fn preorder_mut(
    root: &mut dyn Element,
    f: &mut dyn FnMut(&mut dyn Element) -> Result<()>,
) -> Result<()> {
    f(root)?;
    if let Some(children) = root.children_mut() {
        for child in children.iter_mut() {
            preorder_mut(child, f)?;
        }
    }
    Ok(())
}

/// The first element in pre-order with the given tag.
pub fn find_by_tag<'a>(root: &'a dyn Element, tag: &str) -> Option<&'a dyn Element> {
    if root.base().tag == tag {
        return Some(root);
    }
    root.children()?
        .iter()
        .find_map(|child| find_by_tag(child, tag))
}

/// Mutable variant of [`find_by_tag`].
pub fn find_by_tag_mut<'a>(root: &'a mut dyn Element, tag: &str) -> Option<&'a mut dyn Element> {
    if root.base().tag == tag {
        return Some(root);
    }
    for child in root.children_mut()?.iter_mut() {
        if let Some(found) = find_by_tag_mut(child, tag) {
            return Some(found);
        }
    }
    None
}

/// Find a tagged element and downcast it.
pub fn find_as<'a, T: Element>(root: &'a dyn Element, tag: &str) -> Result<&'a T> {
    let found =
        find_by_tag(root, tag).ok_or_else(|| Error::Invalid(format!("no element tagged {tag}")))?;
    downcast(found)
}

/// Find a tagged element and mutably downcast it.
pub fn find_as_mut<'a, T: Element>(root: &'a mut dyn Element, tag: &str) -> Result<&'a mut T> {
    let found = find_by_tag_mut(root, tag)
        .ok_or_else(|| Error::Invalid(format!("no element tagged {tag}")))?;
    downcast_mut(found)
}

/// The chain of selected elements from `root` down to the focused leaf.
/// Empty if `root` itself is not selected.
pub fn focus_chain(root: &dyn Element) -> Vec<&dyn Element> {
    let mut chain = Vec::new();
    let mut current = Some(root);
    while let Some(e) = current {
        if !e.base().is_selected() {
            break;
        }
        chain.push(e);
        current = e
            .children()
            .and_then(|c| c.iter().find(|child| child.base().is_selected()));
    }
    chain
}

/// The deepest selected element, if any.
pub fn focused(root: &dyn Element) -> Option<&dyn Element> {
    focus_chain(root).pop()
}
