use pretty_assertions::assert_eq;
use shellboard::{
    Key, KeyCode, Options, Result, Root, Size,
    backend::test::TestBackend,
    event::key::Ctrl,
    root::INTERRUPTED,
};

use crate::board::{BoardState, board, tick};

fn run(keys: Vec<Key>, options: Options) -> Result<(Root<TestBackend>, BoardState)> {
    let state = BoardState::default();
    let mut root = Root::new(TestBackend::with_keys(keys)).with_options(options);
    root.set_layout(board(&state))?;
    tick(&mut root, &state)?;
    let code = root.run_with(|r| tick(r, &state))?;
    assert_eq!(code, INTERRUPTED);
    Ok((root, state))
}

#[test]
fn initial_screen() -> Result<()> {
    let (root, _) = run(vec![Ctrl + 'c'], Options::default())?;
    assert_eq!(
        root.backend().screen(Size::new(40, 6)),
        vec![
            "Editor settings",
            "===============",
            "> [ ] Wrap lines",
            "[ ] Line numbers",
            "Save  Reset",
            "wrap: off, numbers: off, saves: 0",
        ]
    );
    Ok(())
}

#[test]
fn toggle_and_save() -> Result<()> {
    let keys = vec![
        Key::from(' '),
        KeyCode::Down.into(),
        KeyCode::Enter.into(),
        KeyCode::Down.into(),
        KeyCode::Enter.into(),
        KeyCode::Enter.into(),
        Ctrl + 'c',
    ];
    let (root, state) = run(keys, Options::default())?;
    assert_eq!(state.saves.get(), 2);
    assert!(root.backend().contains_text("wrap: on, numbers: on, saves: 2"));
    assert!(root.backend().contains_text("> Save"));
    Ok(())
}

#[test]
fn reset_clears_toggles() -> Result<()> {
    let keys = vec![
        Key::from(' '),
        KeyCode::Tab.into(),
        KeyCode::Tab.into(),
        KeyCode::Right.into(),
        KeyCode::Enter.into(),
        Ctrl + 'c',
    ];
    let (root, _) = run(keys, Options::default())?;
    assert!(root.backend().contains_text("wrap: off, numbers: off, saves: 0"));
    assert!(root.backend().contains_text("> Reset"));
    Ok(())
}

#[test]
fn configured_cursor_and_hidden_toggle() -> Result<()> {
    let options = Options::from_json(
        r#"{ "cursor": "* ", "flags": { "numbers": { "is_hidden": true } } }"#,
    )?;
    let (root, _) = run(vec![KeyCode::Down.into(), Ctrl + 'c'], options)?;
    let screen = root.backend().screen(Size::new(40, 5));
    assert_eq!(screen[2], "[ ] Wrap lines");
    // The prefixed Save spills into the gap reserved after it.
    assert_eq!(screen[3], "* SaveReset");
    Ok(())
}
