//! Push buttons.

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

/// Name of the event fired when a button is pressed.
pub const ON_CLICK: &str = "on_click";

/// A focusable text element that fires `on_click` on Enter.
#[derive(Debug)]
pub struct Button {
    /// Text and element state.
    core: WidgetCore,
    /// Key bindings.
    keyboard: KeyboardRouter<WidgetCore>,
}

impl Button {
    /// Construct a button with a no-op click handler.
    pub fn new(text: impl Into<String>) -> Self {
        let mut core = WidgetCore::new("button", text);
        core.base.flags.set(flags::ACTIVE, true);
        core.base.events.set(ON_CLICK, |_| Ok(Value::Null));

        let mut keyboard = KeyboardRouter::default();
        keyboard.add_event(
            |c: &mut WidgetCore, _| {
                c.base.call_event(ON_CLICK, &[])?;
                Ok(Outcome::Handle)
            },
            any_of([KeyCode::Enter]),
        );

        let mut b = Self { core, keyboard };
        b.get_size();
        b
    }

    /// Builder: replace the click handler.
    pub fn on_click(mut self, mut f: impl FnMut() + 'static) -> Self {
        self.core.base.events.set(ON_CLICK, move |_| {
            f();
            Ok(Value::Null)
        });
        self
    }

    /// The button text.
    pub fn text(&self) -> &str {
        self.core.text()
    }

    /// Replace the text and re-measure.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.core.set_text(text);
        self.get_size();
    }

    /// The button's key bindings.
    pub fn keyboard_mut(&mut self) -> &mut KeyboardRouter<WidgetCore> {
        &mut self.keyboard
    }
}

impl Element for Button {
    fn base(&self) -> &ElementBase {
        &self.core.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.core.base
    }

    fn measure(&self) -> Size {
        text_size(self.core.text())
    }

    fn render(&self) -> Result<Content<'_>> {
        Ok(Content::Text(self.core.text().to_string()))
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
