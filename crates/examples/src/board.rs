//! A small settings board.

use std::{cell::Cell, rc::Rc};

use shellboard::{
    Button, CheckBox, Element, Label, Layout, Result, Root, backend::Backend,
};

/// Tag of the status line.
pub const STATUS: &str = "status";

/// Counters shared between the board's handlers and the application.
#[derive(Debug, Default, Clone)]
pub struct BoardState {
    /// Number of times Save was pressed.
    pub saves: Rc<Cell<usize>>,
    /// Set by Reset, consumed by [`tick`].
    pub reset: Rc<Cell<bool>>,
}

/// A settings board: a title, two toggles, a row of buttons and a status
/// line.
pub fn board(state: &BoardState) -> Layout {
    let saves = state.saves.clone();
    let reset = state.reset.clone();

    let mut buttons = Layout::horizontal().with_tag("buttons");
    buttons.add(
        Button::new("Save")
            .with_tag("save")
            .on_click(move || saves.set(saves.get() + 1)),
    );
    buttons.add(
        Button::new("Reset")
            .with_tag("reset")
            .on_click(move || reset.set(true)),
    );

    let mut root = Layout::vertical().with_tag("board");
    root.add(Label::new("Editor settings\n==============="));
    root.add(CheckBox::new("Wrap lines").with_tag("wrap"));
    root.add(CheckBox::new("Line numbers").with_tag("numbers"));
    root.add(buttons);
    root.add(Label::new("").with_tag(STATUS));
    root
}

/// Render the state of the toggles and the save count into the status line.
pub fn sync_status<B: Backend>(root: &mut Root<B>, state: &BoardState) -> Result<()> {
    let onoff = |b: bool| if b { "on" } else { "off" };
    let wrap = root.find::<CheckBox>("wrap")?.is_checked();
    let numbers = root.find::<CheckBox>("numbers")?.is_checked();
    let status = format!(
        "wrap: {}, numbers: {}, saves: {}",
        onoff(wrap),
        onoff(numbers),
        state.saves.get()
    );
    root.find_mut::<Label>(STATUS)?.set_text(status);
    Ok(())
}

/// Uncheck every toggle on the board.
pub fn reset<B: Backend>(root: &mut Root<B>) -> Result<()> {
    for tag in ["wrap", "numbers"] {
        root.find_mut::<CheckBox>(tag)?.set_checked(false);
    }
    Ok(())
}

/// Per-key housekeeping: apply a pending reset, then refresh the status line.
pub fn tick<B: Backend>(root: &mut Root<B>, state: &BoardState) -> Result<()> {
    if state.reset.replace(false) {
        reset(root)?;
    }
    sync_status(root, state)
}
