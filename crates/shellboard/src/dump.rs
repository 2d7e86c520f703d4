//! Debug dumps of the element tree.

use std::io::Write;

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{element::Element, error::Result};

/// Traverses an element tree and returns a string showing the kind, tag,
/// geometry, focus state and flags of each element. Output is colored with
/// ANSI escapes. This is a debug function.
pub fn dump(root: &dyn Element) -> Result<String> {
    let mut buffer = Buffer::ansi();
    dump_element(&mut buffer, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Like [`dump`], without color.
pub fn dump_plain(root: &dyn Element) -> Result<String> {
    let mut buffer = Buffer::no_color();
    dump_element(&mut buffer, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Write one element line, then recurse into children.
fn dump_element(buffer: &mut Buffer, e: &dyn Element, level: usize) -> Result<()> {
    let base = e.base();
    let indent = "    ".repeat(level);
    write!(buffer, "{indent}")?;

    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(buffer, "{}", base.kind())?;
    buffer.reset()?;

    if !base.tag.is_empty() {
        write!(buffer, " #{}", base.tag)?;
    }
    if base.is_selected() {
        buffer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(buffer, " SELECTED")?;
        buffer.reset()?;
    }

    let p = base.position;
    let s = base.size;
    write!(buffer, " @ {},{} {}x{}", p.x, p.y, s.width, s.height)?;

    let set: Vec<&str> = base
        .flags
        .iter()
        .filter(|(_, v)| *v)
        .map(|(k, _)| k)
        .collect();
    if !set.is_empty() {
        buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(buffer, " [{}]", set.join(", "))?;
        buffer.reset()?;
    }
    writeln!(buffer)?;

    if let Some(children) = e.children() {
        for child in children.iter() {
            dump_element(buffer, child, level + 1)?;
        }
    }
    Ok(())
}
