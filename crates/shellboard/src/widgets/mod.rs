//! Leaf widgets.

mod button;
mod checkbox;
mod label;

pub use button::Button;
pub use checkbox::CheckBox;
pub use label::Label;

use unicode_width::UnicodeWidthStr;

use crate::{geom::Size, state::ElementBase};

/// State shared by the text-bearing leaf widgets: everything except the key
/// router, so bindings can borrow it while the router is borrowed too.
#[derive(Debug)]
pub struct WidgetCore {
    /// Element state.
    pub base: ElementBase,
    /// Display text, possibly spanning several lines.
    text: String,
}

impl WidgetCore {
    /// Construct a core of the given kind holding `text`.
    pub fn new(kind: &'static str, text: impl Into<String>) -> Self {
        Self {
            base: ElementBase::new(kind),
            text: text.into(),
        }
    }

    /// The display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the display text. The caller is responsible for re-measuring.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl AsRef<ElementBase> for WidgetCore {
    fn as_ref(&self) -> &ElementBase {
        &self.base
    }
}

/// The display size of a block of text: the widest line by terminal column
/// width, by the number of lines.
pub fn text_size(text: &str) -> Size {
    let mut width = 0;
    let mut height = 0;
    for line in text.split('\n') {
        width = width.max(line.width());
        height += 1;
    }
    Size::new(width as i32, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_text() {
        assert_eq!(text_size("Hello"), Size::new(5, 1));
        assert_eq!(text_size("ab\nabcd\n"), Size::new(4, 3));
        assert_eq!(text_size(""), Size::new(0, 1));
        assert_eq!(text_size("日本"), Size::new(4, 1));
    }
}
