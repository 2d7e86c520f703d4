use std::{
    io::{self, Stderr, Write},
    panic,
};

use color_backtrace::{BacktracePrinter, default_output_stream};
use crossterm::{
    self, ExecutableCommand, QueueableCommand, cursor as ccursor, event as cevent, style, terminal,
};
use scopeguard::guard;

use super::Backend;
use crate::{
    Result,
    error::Error,
    event::key::{Key, KeyCode, Mods},
    geom::Position,
    root::Root,
};

/// Map IO results into shellboard errors.
fn translate_result<T>(e: io::Result<T>) -> Result<T> {
    e.map_err(|e| Error::Backend(e.to_string()))
}

/// Translate a crossterm key event. Codes with no counterpart become
/// `KeyCode::Null`.
fn translate_key(k: cevent::KeyEvent) -> Key {
    use cevent::KeyCode as C;
    let code = match k.code {
        C::Char(c) => KeyCode::Char(c),
        C::F(n) => KeyCode::F(n),
        C::Enter => KeyCode::Enter,
        C::Tab => KeyCode::Tab,
        C::BackTab => KeyCode::BackTab,
        C::Backspace => KeyCode::Backspace,
        C::Delete => KeyCode::Delete,
        C::Insert => KeyCode::Insert,
        C::Esc => KeyCode::Esc,
        C::Up => KeyCode::Up,
        C::Down => KeyCode::Down,
        C::Left => KeyCode::Left,
        C::Right => KeyCode::Right,
        C::Home => KeyCode::Home,
        C::End => KeyCode::End,
        C::PageUp => KeyCode::PageUp,
        C::PageDown => KeyCode::PageDown,
        _ => KeyCode::Null,
    };
    let m = k.modifiers;
    Key {
        mods: Mods {
            shift: m.contains(cevent::KeyModifiers::SHIFT),
            ctrl: m.contains(cevent::KeyModifiers::CONTROL),
            alt: m.contains(cevent::KeyModifiers::ALT),
        },
        key: code,
    }
}

/// Terminal coordinates of line `line` of a write at `loc`, or `None` when
/// they fall outside the `u16` range.
fn line_origin(loc: Position, line: usize) -> Option<(u16, u16)> {
    let y = i32::try_from(line).ok().and_then(|l| loc.y.checked_add(l))?;
    Some((u16::try_from(loc.x).ok()?, u16::try_from(y).ok()?))
}

/// A [`Backend`] drawing to stderr through crossterm.
#[derive(Debug)]
pub struct CrosstermBackend {
    /// Output handle.
    fp: Stderr,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self { fp: io::stderr() }
    }
}

impl CrosstermBackend {
    /// Enter alternate screen and raw mode.
    fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.fp.execute(terminal::EnterAlternateScreen)?;
        self.fp.execute(ccursor::Hide)?;
        Ok(())
    }

    /// Leave alternate screen and restore terminal state.
    fn exit(&mut self) -> io::Result<()> {
        self.fp.execute(terminal::LeaveAlternateScreen)?;
        self.fp.execute(ccursor::Show)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Queue a multi-line write, one cursor move per line. Lines starting
    /// outside the terminal's coordinate range are dropped.
    fn text(&mut self, loc: Position, txt: &str) -> io::Result<()> {
        for (i, line) in txt.split('\n').enumerate() {
            let Some((x, y)) = line_origin(loc, i) else {
                continue;
            };
            self.fp.queue(ccursor::MoveTo(x, y))?;
            self.fp.queue(style::Print(line))?;
        }
        Ok(())
    }
}

impl Backend for CrosstermBackend {
    fn start(&mut self) -> Result<()> {
        translate_result(self.enter())
    }

    fn stop(&mut self) -> Result<()> {
        translate_result(self.exit())
    }

    fn clear(&mut self) -> Result<()> {
        translate_result(self.fp.queue(terminal::Clear(terminal::ClearType::All)).map(|_| ()))
    }

    fn paint(&mut self, position: Position, text: &str) -> Result<()> {
        translate_result(self.text(position, text))
    }

    fn flush(&mut self) -> Result<()> {
        translate_result(self.fp.flush())
    }

    fn read_key(&mut self) -> Result<Key> {
        loop {
            match translate_result(cevent::read())? {
                cevent::Event::Key(k) if k.kind != cevent::KeyEventKind::Release => {
                    return Ok(translate_key(k));
                }
                _ => continue,
            }
        }
    }
}

/// Run `root` on the terminal until Ctrl+C or an error. Returns the exit
/// status.
pub fn runloop(root: &mut Root<CrosstermBackend>) -> Result<i32> {
    runloop_with(root, |_| Ok(()))
}

/// Like [`runloop`], calling `tick` after every routed key.
pub fn runloop_with<F>(root: &mut Root<CrosstermBackend>, tick: F) -> Result<i32>
where
    F: FnMut(&mut Root<CrosstermBackend>) -> Result<()>,
{
    let _panic_hook = if root.options().install_panic_hook {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|pi| {
            let mut stderr = io::stderr();
            #[allow(unused_must_use)]
            {
                crossterm::execute!(stderr, terminal::LeaveAlternateScreen, ccursor::Show);
                terminal::disable_raw_mode();
                BacktracePrinter::new().print_panic_info(pi, &mut default_output_stream());
            }
        }));
        Some(guard(previous, |hook| {
            panic::set_hook(hook);
        }))
    } else {
        None
    };

    root.run_with(tick)
}
