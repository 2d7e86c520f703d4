//! The application façade: owns the top layout and drives the run loop.

use std::rc::Rc;

use crate::{
    backend::Backend,
    dump::dump,
    element::{self, Element},
    error::{Error, Result},
    event::key::Key,
    keyboard::Outcome,
    observer::Observer,
    options::{CtrlCBehavior, Options},
    render::{Paint, flatten},
};

/// Exit status returned when the loop stops on Ctrl+C.
pub const INTERRUPTED: i32 = 130;

/// Owns the top-level layout and a backend.
///
/// A frame is: update the tree, build and flatten it, paint the result. The
/// run loop alternates frames with reading and routing one key at a time.
pub struct Root<B: Backend> {
    /// Terminal driver.
    backend: B,
    /// The installed top layout.
    layout: Option<Box<dyn Element>>,
    /// Run options.
    options: Options,
}

impl<B: Backend> Root<B> {
    /// Construct a root with default options and no layout.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            layout: None,
            options: Options::default(),
        }
    }

    /// Builder: replace the options. Takes effect on the next
    /// [`Root::set_layout`].
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// The run options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Install the top layout. The configured cursor marker and flag
    /// overrides are applied, and the layout is put on the focus chain.
    pub fn set_layout(&mut self, layout: impl Element) -> Result<()> {
        let mut layout: Box<dyn Element> = Box::new(layout);
        layout.set_cursor_marker(&self.options.cursor);
        let overrides = &self.options.flags;
        element::preorder_mut(layout.as_mut(), &mut |e| {
            if let Some(flags) = overrides.get(&e.base().tag) {
                for (name, value) in flags {
                    e.base_mut().flags.try_set(name.as_str(), value)?;
                }
            }
            Ok(())
        })?;
        layout.select();
        self.layout = Some(layout);
        Ok(())
    }

    /// Route handler observation for the whole tree to `observer`.
    pub fn set_observer(&mut self, observer: Rc<dyn Observer>) -> Result<()> {
        element::preorder_mut(self.layout_mut()?, &mut |e| {
            e.set_observer(observer.clone());
            Ok(())
        })
    }

    /// The top layout.
    pub fn layout(&self) -> Result<&dyn Element> {
        self.layout.as_deref().ok_or(Error::NoLayout)
    }

    /// The top layout, mutably.
    pub fn layout_mut(&mut self) -> Result<&mut dyn Element> {
        self.layout.as_deref_mut().ok_or(Error::NoLayout)
    }

    /// Find an element by tag and downcast it.
    pub fn find<T: Element>(&self, tag: &str) -> Result<&T> {
        element::find_as(self.layout()?, tag)
    }

    /// Find an element by tag and mutably downcast it.
    pub fn find_mut<T: Element>(&mut self, tag: &str) -> Result<&mut T> {
        element::find_as_mut(self.layout_mut()?, tag)
    }

    /// Bring the tree up to date: sizes, cursors and selection.
    pub fn update(&mut self) -> Result<()> {
        self.layout_mut()?.update()
    }

    /// Route one key from the focused path down.
    pub fn route(&mut self, key: &Key) -> Result<Vec<Outcome>> {
        let outcomes = self.layout_mut()?.key_pressed(key)?;
        if !Outcome::any(&outcomes).is_handled() {
            tracing::debug!(%key, "key not handled");
        }
        Ok(outcomes)
    }

    /// Read one key from the backend and route it.
    pub fn read_keys(&mut self) -> Result<Vec<Outcome>> {
        let key = self.backend.read_key()?;
        self.route(&key)
    }

    /// Build and flatten the tree into absolute writes.
    pub fn paints(&self) -> Result<Vec<Paint>> {
        flatten(&self.layout()?.build())
    }

    /// Draw one frame.
    pub fn refresh(&mut self) -> Result<()> {
        let paints = self.paints()?;
        self.backend.clear()?;
        for p in &paints {
            self.backend.paint(p.position, &p.text)?;
        }
        self.backend.flush()
    }

    /// Debug dump of the tree.
    pub fn dump(&self) -> Result<String> {
        dump(self.layout()?)
    }

    /// Run until Ctrl+C or an error.
    pub fn run(&mut self) -> Result<i32> {
        self.run_with(|_| Ok(()))
    }

    /// Run until Ctrl+C or an error, calling `tick` after every routed key.
    ///
    /// The backend is stopped on every exit path. Ctrl+C returns
    /// [`INTERRUPTED`]; with [`CtrlCBehavior::DumpTreeAndExit`] the tree is
    /// dumped to stderr first.
    pub fn run_with<F>(&mut self, tick: F) -> Result<i32>
    where
        F: FnMut(&mut Self) -> Result<()>,
    {
        self.layout()?;
        self.backend.start()?;
        let result = self.drive(tick);
        let stopped = self.backend.stop();

        match &result {
            Ok(INTERRUPTED) if self.options.ctrl_c == CtrlCBehavior::DumpTreeAndExit => {
                eprintln!("\nCtrl+C pressed - element tree dump:");
                self.eprint_dump();
            }
            Err(e @ Error::Render(_)) => {
                eprintln!("Render error: {e}");
                self.eprint_dump();
            }
            Err(e) => tracing::error!(error = %e, "run loop failed"),
            Ok(_) => {}
        }

        let code = result?;
        stopped?;
        Ok(code)
    }

    /// The loop body, without terminal setup or teardown.
    fn drive<F>(&mut self, mut tick: F) -> Result<i32>
    where
        F: FnMut(&mut Self) -> Result<()>,
    {
        loop {
            self.update()?;
            self.refresh()?;
            let key = self.backend.read_key()?;
            if key.is_interrupt() {
                return Ok(INTERRUPTED);
            }
            self.route(&key)?;
            tick(self)?;
        }
    }

    /// Write the tree dump to stderr.
    fn eprint_dump(&self) {
        match self.dump() {
            Ok(s) => eprintln!("{s}"),
            Err(e) => eprintln!("Failed to dump element tree: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        backend::test::TestBackend,
        event::key::{Ctrl, KeyCode},
        flags,
        layout::Layout,
        widgets::{Button, CheckBox, Label},
    };

    #[test]
    fn no_layout() {
        let mut r = Root::new(TestBackend::new());
        assert_eq!(r.update(), Err(Error::NoLayout));
        assert!(matches!(r.paints(), Err(Error::NoLayout)));
        assert_eq!(r.run(), Err(Error::NoLayout));
        assert!(!r.backend().started);
    }

    #[test]
    fn frame() -> Result<()> {
        let mut r = Root::new(TestBackend::new());
        let mut l = Layout::vertical();
        l.add(Label::new("Title"));
        l.add(Button::new("OK"));
        r.set_layout(l)?;
        r.update()?;
        r.refresh()?;
        assert_eq!(
            r.backend().screen((10, 2).into()),
            vec!["Title".to_string(), "> OK".to_string()]
        );
        Ok(())
    }

    #[test]
    fn run_until_interrupt() -> Result<()> {
        let clicks = Rc::new(Cell::new(0));
        let c = clicks.clone();
        let mut l = Layout::vertical();
        l.add(Button::new("A"));
        l.add(Button::new("B").on_click(move || c.set(c.get() + 1)));

        let keys: Vec<Key> = vec![KeyCode::Down.into(), KeyCode::Enter.into(), Ctrl + 'c'];
        let mut r = Root::new(TestBackend::with_keys(keys));
        r.set_layout(l)?;
        assert_eq!(r.run()?, INTERRUPTED);
        assert_eq!(clicks.get(), 1);

        let b = r.backend();
        assert!(!b.started);
        assert_eq!(b.stops, 1);
        assert_eq!(b.frames.len(), 3);
        assert!(b.contains_text("> B"));
        Ok(())
    }

    #[test]
    fn exhausted_input_still_stops() -> Result<()> {
        let mut r = Root::new(TestBackend::with_keys([KeyCode::Down]));
        r.set_layout(Layout::vertical().child(Button::new("A")))?;
        assert!(matches!(r.run(), Err(Error::RunLoop(_))));
        assert_eq!(r.backend().stops, 1);
        Ok(())
    }

    #[test]
    fn tick_sees_the_tree() -> Result<()> {
        let mut l = Layout::vertical();
        l.add(CheckBox::new("wrap").with_tag("wrap"));
        l.add(Label::new("off").with_tag("status"));
        let keys = vec![Key::from(' '), Ctrl + 'c'];
        let mut r = Root::new(TestBackend::with_keys(keys));
        r.set_layout(l)?;
        r.run_with(|r| {
            let on = r.find::<CheckBox>("wrap")?.is_checked();
            r.find_mut::<Label>("status")?
                .set_text(if on { "on" } else { "off" });
            Ok(())
        })?;
        assert!(r.backend().contains_text("on"));
        Ok(())
    }

    #[test]
    fn options_apply() -> Result<()> {
        let opts = Options::default()
            .with_cursor("* ")
            .with_flag("b", flags::HIDDEN, true);
        let mut r = Root::new(TestBackend::new()).with_options(opts);
        let mut l = Layout::vertical();
        l.add(Button::new("a").with_tag("a"));
        l.add(Button::new("b").with_tag("b"));
        r.set_layout(l)?;
        r.update()?;
        assert_eq!(
            r.paints()?,
            vec![Paint::new((0, 0), "* a")]
        );
        Ok(())
    }

    #[test]
    fn inactive_override_skips_child() -> Result<()> {
        let opts = Options::default().with_flag("a", flags::ACTIVE, false);
        let mut r = Root::new(TestBackend::new()).with_options(opts);
        let mut l = Layout::vertical();
        l.add(Button::new("a").with_tag("a"));
        l.add(Button::new("b").with_tag("b"));
        r.set_layout(l)?;
        r.update()?;
        assert!(!r.find::<Button>("a")?.base().is_selected());
        assert!(r.find::<Button>("b")?.base().is_selected());
        assert_eq!(
            r.paints()?,
            vec![Paint::new((0, 0), "a"), Paint::new((0, 1), "> b")]
        );
        Ok(())
    }

    #[test]
    fn bad_override() {
        let opts = Options::from_json(r#"{"flags": {"a": {"is_hidden": 3}}}"#);
        let mut r = Root::new(TestBackend::new()).with_options(opts.unwrap_or_default());
        let res = r.set_layout(Layout::vertical().child(Button::new("a").with_tag("a")));
        assert!(matches!(res, Err(Error::Type(_))));
    }
}
