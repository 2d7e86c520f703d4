//! Containers that stack their children and move focus between them.
//!
//! A [`Layout`] packs its visible children along one [`Axis`], drawing a
//! cursor marker before the focused child. Keys are first offered to the
//! focused child; navigation keys the child does not consume move the cursor
//! to the next focusable sibling.

use std::{any::Any, rc::Rc};

use unicode_width::UnicodeWidthStr;

use crate::{
    collection::Collection,
    cursor::CursorController,
    element::Element,
    error::{Error, Result},
    event::key::{Key, KeyCode},
    flags,
    geom::{Axis, Position, Size},
    keyboard::{KeyboardRouter, Outcome, any_of, none_of},
    observer::Observer,
    render::Content,
    state::{ElementBase, ElementState},
};

/// The marker drawn before the focused child unless configured otherwise.
pub const DEFAULT_CURSOR: &str = "> ";

/// Cursor predicate: can this child take focus?
fn focusable(e: &dyn Element) -> bool {
    e.is_focusable()
}

/// Keys that move the cursor backward and forward along `axis`.
fn navigation_keys(axis: Axis) -> (Vec<KeyCode>, Vec<KeyCode>) {
    match axis {
        Axis::Vertical => (
            vec![KeyCode::Up, KeyCode::BackTab],
            vec![KeyCode::Down, KeyCode::Tab],
        ),
        Axis::Horizontal => (
            vec![KeyCode::Left, KeyCode::BackTab],
            vec![KeyCode::Right, KeyCode::Tab],
        ),
    }
}

/// Layout state minus the key router.
#[derive(Debug)]
pub struct LayoutCore {
    /// Element state.
    pub base: ElementBase,
    /// Stacking direction.
    axis: Axis,
    /// Children in order.
    children: Collection,
    /// Focused child.
    cursor: CursorController,
    /// Drawn before the focused child.
    marker: String,
}

impl AsRef<ElementBase> for LayoutCore {
    fn as_ref(&self) -> &ElementBase {
        &self.base
    }
}

impl LayoutCore {
    /// The stacking direction.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The focused child.
    pub fn current(&self) -> Option<&dyn Element> {
        self.cursor.current(&self.children)
    }

    /// Offer a key to the focused child.
    fn forward(&mut self, key: &Key) -> Result<Vec<Outcome>> {
        match self.cursor.current_mut(&mut self.children) {
            Some(child) if child.is_focusable() => child.key_pressed(key),
            _ => Ok(vec![]),
        }
    }

    /// Pass a non-navigation key to the focused child.
    pub fn activate(&mut self, key: &Key) -> Result<Outcome> {
        Ok(Outcome::any(&self.forward(key)?))
    }

    /// Offer a navigation key to the focused child, then move the cursor by
    /// `step` if the child did not consume it.
    pub fn navigate(&mut self, key: &Key, step: isize) -> Result<Outcome> {
        if Outcome::any(&self.forward(key)?).is_handled() {
            return Ok(Outcome::Handle);
        }
        Ok(self.move_focus(step))
    }

    /// Move the cursor to the next focusable child `step` strides away,
    /// transferring selection if this layout is on the focus chain.
    pub fn move_focus(&mut self, step: isize) -> Outcome {
        let previous = self.cursor.position();
        let Some(next) = self.cursor.move_by(&self.children, step, focusable) else {
            return Outcome::Ignore;
        };
        tracing::debug!(
            kind = self.base.kind(),
            tag = %self.base.tag,
            previous,
            next,
            "move focus"
        );
        if self.base.is_selected() {
            if let Some(child) = self.children.get_mut(previous) {
                child.deselect();
            }
            if let Some(child) = self.children.get_mut(next) {
                child.select();
            }
        }
        Outcome::Handle
    }

    /// Settle the cursor and make the focused child the only selected one.
    fn sync_focus(&mut self) {
        self.cursor.settle(&self.children, focusable);
        self.children
            .for_each_where(|e| e.base().is_selected(), |e| e.deselect());
        if !self.base.is_selected() {
            return;
        }
        if let Some(child) = self.cursor.current_mut(&mut self.children) {
            if child.is_focusable() {
                child.select();
            }
        }
    }

    /// Extra space taken by the marker on each child along the stacking axis.
    fn marker_gap(&self) -> i32 {
        match self.axis {
            Axis::Horizontal => self.marker.width() as i32,
            Axis::Vertical => 0,
        }
    }
}

/// A container that stacks its children along an axis.
///
/// [`Layout::vertical`] stacks top to bottom and navigates with Up and Down;
/// [`Layout::horizontal`] stacks left to right and navigates with Left and
/// Right. Both also navigate with Tab and BackTab.
#[derive(Debug)]
pub struct Layout {
    /// Everything but the router.
    core: LayoutCore,
    /// Key bindings.
    keyboard: KeyboardRouter<LayoutCore>,
}

impl Layout {
    /// Construct an empty layout stacking along `axis`.
    pub fn new(axis: Axis) -> Self {
        let kind = match axis {
            Axis::Vertical => "vlayout",
            Axis::Horizontal => "hlayout",
        };
        let mut base = ElementBase::new(kind);
        base.flags.set(flags::ACTIVE, true);

        let (back, forward) = navigation_keys(axis);
        let nav: Vec<KeyCode> = back.iter().chain(forward.iter()).copied().collect();
        let mut keyboard = KeyboardRouter::default();
        keyboard
            .add_event(|c: &mut LayoutCore, k| c.activate(k), none_of(nav))
            .add_event(|c: &mut LayoutCore, k| c.navigate(k, -1), any_of(back))
            .add_event(|c: &mut LayoutCore, k| c.navigate(k, 1), any_of(forward));

        let mut l = Self {
            core: LayoutCore {
                base,
                axis,
                children: Collection::new(),
                cursor: CursorController::new(),
                marker: DEFAULT_CURSOR.to_string(),
            },
            keyboard,
        };
        l.get_size();
        l
    }

    /// A layout stacking top to bottom.
    pub fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    /// A layout stacking left to right.
    pub fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    /// The stacking direction.
    pub fn axis(&self) -> Axis {
        self.core.axis
    }

    /// Append a child and re-measure. Returns the child's index.
    pub fn add(&mut self, child: impl Element) -> usize {
        let index = self.core.children.append(child);
        if let Some(c) = self.core.children.get_mut(index) {
            c.set_cursor_marker(&self.core.marker);
        }
        self.get_size();
        index
    }

    /// Append a child at an explicit position. Positions only decide the
    /// stacking order; the packed offset is recomputed on render.
    pub fn add_at(&mut self, child: impl Element, position: impl Into<Position>) -> usize {
        self.add(child.with_position(position))
    }

    /// Builder: append a child.
    pub fn child(mut self, child: impl Element) -> Self {
        self.add(child);
        self
    }

    /// The children.
    pub fn elements(&self) -> &Collection {
        &self.core.children
    }

    /// The children, mutably.
    pub fn elements_mut(&mut self) -> &mut Collection {
        &mut self.core.children
    }

    /// The child at `index` as a concrete type.
    pub fn child_as<T: Element>(&self, index: usize) -> Result<&T> {
        self.core.children.get_as(index)
    }

    /// The child at `index` as a concrete type, mutably.
    pub fn child_as_mut<T: Element>(&mut self, index: usize) -> Result<&mut T> {
        self.core.children.get_as_mut(index)
    }

    /// The cursor.
    pub fn cursor(&self) -> &CursorController {
        &self.core.cursor
    }

    /// The focused child.
    pub fn focused(&self) -> Option<&dyn Element> {
        self.core.current()
    }

    /// Move the cursor to a focusable child.
    pub fn focus(&mut self, index: usize) -> Result<()> {
        if !self.core.children.get(index).is_some_and(focusable) {
            return Err(Error::Invalid(format!("child {index} cannot take focus")));
        }
        let step = index as isize - self.core.cursor.position() as isize;
        if step != 0 {
            self.core.move_focus(step);
        }
        Ok(())
    }

    /// The focus marker.
    pub fn cursor_marker(&self) -> &str {
        &self.core.marker
    }

    /// The layout's key bindings.
    pub fn keyboard_mut(&mut self) -> &mut KeyboardRouter<LayoutCore> {
        &mut self.keyboard
    }
}

impl Element for Layout {
    fn base(&self) -> &ElementBase {
        &self.core.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.core.base
    }

    fn measure(&self) -> Size {
        let axis = self.core.axis;
        let gap = self.core.marker_gap();
        let mut along = 0;
        let mut across = 0;
        for child in self.core.children.iter().filter(|c| !c.base().is_hidden()) {
            let size = child.base().size;
            along += axis.extent(size) + gap;
            across = across.max(axis.cross_extent(size));
        }
        axis.size(along, across)
    }

    fn update(&mut self) -> Result<()> {
        for child in self.core.children.iter_mut() {
            child.update()?;
        }
        self.get_size();
        self.core.sync_focus();
        Ok(())
    }

    fn render(&self) -> Result<Content<'_>> {
        let axis = self.core.axis;
        let gap = self.core.marker_gap();
        let marker = self.core.marker.as_str();

        let mut buffers: Vec<_> = self
            .core
            .children
            .iter()
            .filter(|c| !c.base().is_hidden())
            .map(|c| {
                let b = c.build();
                let base = c.base();
                if base.is_active() && base.is_selected() {
                    b.prefixed(marker)
                } else {
                    b
                }
            })
            .collect();
        buffers.sort_by_key(|b| axis.coord(b.position));

        let mut offset = 0;
        for b in &mut buffers {
            b.position = axis.with_coord(b.position, offset);
            offset += axis.extent(b.size) + gap;
        }
        Ok(Content::Children(buffers))
    }

    fn key_pressed(&mut self, key: &Key) -> Result<Vec<Outcome>> {
        self.keyboard.key_pressed(&mut self.core, key)
    }

    fn select(&mut self) {
        self.core.base.state = ElementState::Selected;
        if let Some(child) = self.core.cursor.current_mut(&mut self.core.children) {
            if child.is_focusable() {
                child.select();
            }
        }
    }

    fn deselect(&mut self) {
        self.core.base.state = ElementState::Missed;
        if let Some(child) = self.core.cursor.current_mut(&mut self.core.children) {
            child.deselect();
        }
    }

    fn is_focusable(&self) -> bool {
        let base = self.base();
        base.is_active() && !base.is_hidden() && self.core.children.iter().any(focusable)
    }

    fn set_cursor_marker(&mut self, marker: &str) {
        self.core.marker = marker.to_string();
        for child in self.core.children.iter_mut() {
            child.set_cursor_marker(marker);
        }
        self.get_size();
    }

    fn set_observer(&mut self, observer: Rc<dyn Observer>) {
        self.core.base.set_observer(observer.clone());
        self.keyboard.set_observer(observer);
    }

    fn children(&self) -> Option<&Collection> {
        Some(&self.core.children)
    }

    fn children_mut(&mut self) -> Option<&mut Collection> {
        Some(&mut self.core.children)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        element,
        render::{Paint, flatten},
        widgets::{Button, CheckBox, Label},
    };

    /// Count selected leaves in a tree.
    fn selected_count(root: &dyn Element) -> usize {
        let mut n = 0;
        element::preorder(root, &mut |e, _| {
            if e.children().is_none() && e.base().is_selected() {
                n += 1;
            }
        });
        n
    }

    fn tags(l: &Layout) -> Option<String> {
        l.focused().map(|e| e.base().tag.clone())
    }

    #[test]
    fn vertical_measure() {
        let mut l = Layout::vertical();
        l.add(Label::new("ab"));
        l.add(Label::new("abcd\nxy"));
        assert_eq!(l.base().size, Size::new(4, 3));
        l.elements_mut().set_flag(flags::HIDDEN, true, |e| e.base().size.height == 2);
        l.get_size();
        assert_eq!(l.base().size, Size::new(2, 1));
    }

    #[test]
    fn horizontal_measure_includes_marker() {
        let mut l = Layout::horizontal();
        l.add(Label::new("abc"));
        l.add(Label::new("de"));
        assert_eq!(l.base().size, Size::new(3 + 2 + 2 + 2, 1));
    }

    #[test]
    fn vertical_packing() -> Result<()> {
        let mut l = Layout::vertical();
        l.add(Label::new("a"));
        l.add(Label::new("b\nc"));
        l.add(Label::new("d"));
        let Content::Children(buffers) = l.render()? else {
            panic!("expected children");
        };
        let ys: Vec<i32> = buffers.iter().map(|b| b.position.y).collect();
        assert_eq!(ys, vec![0, 1, 3]);
        Ok(())
    }

    #[test]
    fn horizontal_packing() -> Result<()> {
        let mut l = Layout::horizontal();
        l.add(Label::new("abc"));
        l.add(Label::new("de"));
        let Content::Children(buffers) = l.render()? else {
            panic!("expected children");
        };
        let xs: Vec<i32> = buffers.iter().map(|b| b.position.x).collect();
        assert_eq!(xs, vec![0, 5]);
        Ok(())
    }

    #[test]
    fn order_follows_position() -> Result<()> {
        let mut l = Layout::vertical();
        l.add_at(Label::new("second").with_tag("s"), (0, 5));
        l.add_at(Label::new("first").with_tag("f"), (3, 1));
        let paints = flatten(&l.build())?;
        assert_eq!(
            paints,
            vec![Paint::new((3, 0), "first"), Paint::new((0, 1), "second")]
        );
        Ok(())
    }

    #[test]
    fn navigation_skips_labels() -> Result<()> {
        let mut l = Layout::vertical();
        l.add(Button::new("A").with_tag("a"));
        l.add(Label::new("--"));
        l.add(Button::new("B").with_tag("b"));
        l.select();
        l.update()?;
        assert_eq!(tags(&l), Some("a".into()));

        assert_eq!(l.key_pressed(&KeyCode::Down.into())?, vec![Outcome::Handle]);
        assert_eq!(tags(&l), Some("b".into()));
        assert_eq!(selected_count(&l), 1);

        assert_eq!(l.key_pressed(&KeyCode::Down.into())?, vec![Outcome::Ignore]);
        assert_eq!(tags(&l), Some("b".into()));

        l.key_pressed(&KeyCode::BackTab.into())?;
        assert_eq!(tags(&l), Some("a".into()));
        Ok(())
    }

    #[test]
    fn marker_on_focused_child() -> Result<()> {
        let mut l = Layout::vertical();
        l.add(Label::new("Title"));
        l.add(Button::new("OK"));
        l.add(CheckBox::new("Wrap"));
        l.select();
        l.update()?;
        let paints = flatten(&l.build())?;
        assert_eq!(
            paints,
            vec![
                Paint::new((0, 0), "Title"),
                Paint::new((0, 1), "> OK"),
                Paint::new((0, 2), "[ ] Wrap"),
            ]
        );
        Ok(())
    }

    #[test]
    fn keys_reach_the_focused_leaf() -> Result<()> {
        let mut row = Layout::horizontal().with_tag("row");
        row.add(CheckBox::new("x").with_tag("x"));
        row.add(CheckBox::new("y").with_tag("y"));
        let mut l = Layout::vertical();
        l.add(Button::new("top"));
        l.add(row);
        l.select();
        l.update()?;

        l.key_pressed(&KeyCode::Down.into())?;
        l.key_pressed(&KeyCode::Right.into())?;
        assert_eq!(l.key_pressed(&' '.into())?, vec![Outcome::Handle]);

        let row = l.child_as::<Layout>(1)?;
        assert!(!row.child_as::<CheckBox>(0)?.is_checked());
        assert!(row.child_as::<CheckBox>(1)?.is_checked());
        assert_eq!(selected_count(&l), 1);
        Ok(())
    }

    #[test]
    fn tab_leaves_nested_layout_at_edge() -> Result<()> {
        let mut row = Layout::horizontal();
        row.add(Button::new("a"));
        row.add(Button::new("b"));
        let mut l = Layout::vertical();
        l.add(row);
        l.add(Button::new("c").with_tag("c"));
        l.select();
        l.update()?;

        l.key_pressed(&KeyCode::Tab.into())?;
        assert_eq!(l.cursor().position(), 0);
        l.key_pressed(&KeyCode::Tab.into())?;
        assert_eq!(tags(&l), Some("c".into()));
        assert_eq!(selected_count(&l), 1);
        Ok(())
    }

    #[test]
    fn unfocusable_layout_is_skipped() -> Result<()> {
        let mut l = Layout::vertical();
        l.add(Layout::horizontal().child(Label::new("static")));
        l.add(Button::new("b").with_tag("b"));
        l.select();
        l.update()?;
        assert_eq!(tags(&l), Some("b".into()));
        Ok(())
    }

    #[test]
    fn focus_by_index() -> Result<()> {
        let mut l = Layout::vertical();
        l.add(Button::new("a"));
        l.add(Label::new("-"));
        l.add(Button::new("c").with_tag("c"));
        l.select();
        l.update()?;
        l.focus(2)?;
        assert_eq!(tags(&l), Some("c".into()));
        assert!(matches!(l.focus(1), Err(Error::Invalid(_))));
        assert_eq!(selected_count(&l), 1);
        Ok(())
    }

    #[test]
    fn marker_propagates() {
        let mut l = Layout::vertical();
        l.add(Layout::horizontal().child(Button::new("a")));
        l.set_cursor_marker("* ");
        let inner = l.child_as::<Layout>(0);
        assert!(inner.is_ok_and(|i| i.cursor_marker() == "* "));
    }

    #[test]
    fn deactivated_focus_moves_on() -> Result<()> {
        let mut l = Layout::vertical();
        l.add(Button::new("a").with_tag("a"));
        l.add(Button::new("b").with_tag("b"));
        l.select();
        l.update()?;
        assert_eq!(tags(&l), Some("a".into()));

        l.elements_mut()
            .set_flag(flags::ACTIVE, false, |e| e.base().tag == "a");
        l.update()?;
        assert_eq!(selected_count(&l), 1);
        assert_eq!(tags(&l), Some("b".into()));
        assert!(!l.elements().get(0).is_some_and(|e| e.base().is_selected()));
        Ok(())
    }
}
