//! Static text.

use std::{any::Any, rc::Rc};

use super::{WidgetCore, text_size};
use crate::{
    element::Element,
    error::Result,
    event::key::Key,
    geom::Size,
    keyboard::{KeyboardRouter, Outcome},
    observer::Observer,
    render::Content,
    state::ElementBase,
};

/// Static text. Labels never take focus.
#[derive(Debug)]
pub struct Label {
    /// Text and element state.
    core: WidgetCore,
    /// Key bindings; empty unless the application adds some.
    keyboard: KeyboardRouter<WidgetCore>,
}

impl Label {
    /// Construct a label sized to its text.
    pub fn new(text: impl Into<String>) -> Self {
        let mut l = Self {
            core: WidgetCore::new("label", text),
            keyboard: KeyboardRouter::default(),
        };
        l.get_size();
        l
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

    /// The label's key bindings.
    pub fn keyboard_mut(&mut self) -> &mut KeyboardRouter<WidgetCore> {
        &mut self.keyboard
    }
}

impl Element for Label {
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
