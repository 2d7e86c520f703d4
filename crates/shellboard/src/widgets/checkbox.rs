//! Two-state toggles.

use std::{any::Any, rc::Rc};

use serde_json::Value;

use super::{WidgetCore, text_size};
use crate::{
    element::Element,
    error::Result,
    event::key::{Key, KeyCode},
    flags,
    geom::Size,
    keyboard::{KeyboardRouter, Outcome, any_of},
    observer::Observer,
    render::Content,
    state::ElementBase,
};

/// Name of the event fired after a checkbox toggles. The single argument is
/// the new state.
pub const ON_CHANGE: &str = "on_change";

/// Width of the box drawn before the text.
const BOX_WIDTH: i32 = 4;

/// A focusable labelled toggle. Enter or Space flips the state.
#[derive(Debug)]
pub struct CheckBox {
    /// Text and element state.
    core: WidgetCore,
    /// Key bindings.
    keyboard: KeyboardRouter<WidgetCore>,
}

/// Flip the checked flag and report the new state.
fn toggle(core: &mut WidgetCore) -> Result<bool> {
    let checked = !core.base.flags.is_set(flags::CHECKED);
    core.base.flags.set(flags::CHECKED, checked);
    core.base.call_event(ON_CHANGE, &[Value::Bool(checked)])?;
    Ok(checked)
}

impl CheckBox {
    /// Construct an unchecked box with a no-op change handler.
    pub fn new(text: impl Into<String>) -> Self {
        let mut core = WidgetCore::new("checkbox", text);
        core.base.flags.set(flags::ACTIVE, true);
        core.base.flags.set(flags::CHECKED, false);
        core.base.events.set(ON_CHANGE, |_| Ok(Value::Null));

        let mut keyboard = KeyboardRouter::default();
        keyboard.add_event(
            |c: &mut WidgetCore, _| {
                toggle(c)?;
                Ok(Outcome::Handle)
            },
            any_of([KeyCode::Enter, KeyCode::Char(' ')]),
        );

        let mut cb = Self { core, keyboard };
        cb.get_size();
        cb
    }

    /// Builder: start checked.
    pub fn checked(mut self) -> Self {
        self.set_checked(true);
        self
    }

    /// Builder: replace the change handler.
    pub fn on_change(mut self, mut f: impl FnMut(bool) + 'static) -> Self {
        self.core.base.events.set(ON_CHANGE, move |args| {
            f(args.first().and_then(Value::as_bool).unwrap_or(false));
            Ok(Value::Null)
        });
        self
    }

    /// Is the box checked?
    pub fn is_checked(&self) -> bool {
        self.core.base.flags.is_set(flags::CHECKED)
    }

    /// Set the state without firing `on_change`.
    pub fn set_checked(&mut self, checked: bool) {
        self.core.base.flags.set(flags::CHECKED, checked);
    }

    /// Flip the state, firing `on_change`.
    pub fn toggle(&mut self) -> Result<bool> {
        toggle(&mut self.core)
    }

    /// The label text.
    pub fn text(&self) -> &str {
        self.core.text()
    }

    /// Replace the text and re-measure.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.core.set_text(text);
        self.get_size();
    }

    /// The checkbox's key bindings.
    pub fn keyboard_mut(&mut self) -> &mut KeyboardRouter<WidgetCore> {
        &mut self.keyboard
    }
}

impl Element for CheckBox {
    fn base(&self) -> &ElementBase {
        &self.core.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.core.base
    }

    fn measure(&self) -> Size {
        let s = text_size(self.core.text());
        Size::new(s.width + BOX_WIDTH, s.height)
    }

    fn render(&self) -> Result<Content<'_>> {
        let mark = if self.is_checked() { "[x] " } else { "[ ] " };
        let text = self
            .core
            .text()
            .split('\n')
            .enumerate()
            .map(|(i, line)| {
                if i == 0 {
                    format!("{mark}{line}")
                } else {
                    format!("    {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        Ok(Content::Text(text))
    }

    fn key_pressed(&mut self, key: &Key) -> Result<Vec<Outcome>> {
        self.keyboard.key_pressed(&mut self.core, key)
    }

    fn set_observer(&mut self, observer: Rc<dyn Observer>) {
        self.core.base.set_observer(observer.clone());
        self.keyboard.set_observer(observer);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
