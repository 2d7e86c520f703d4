//! Lazy render buffers and the flatten pipeline.
//!
//! Building an element produces a [`Buffer`]: a render function paired with a
//! position and size. Resolving the render function yields either literal
//! text or a list of child buffers whose positions are offsets from their
//! parent. [`flatten`] walks the tree, accumulating offsets, and produces the
//! absolute [`Paint`]s a terminal driver draws.

use std::fmt;

use crate::{
    error::Result,
    geom::{Position, Size},
};

/// The result of resolving a buffer.
pub enum Content<'a> {
    /// A leaf: text drawn at the buffer's position.
    Text(String),
    /// Child buffers, positioned relative to the parent buffer.
    Children(Vec<Buffer<'a>>),
}

impl fmt::Debug for Content<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(t) => f.debug_tuple("Text").field(t).finish(),
            Self::Children(c) => f.debug_tuple("Children").field(c).finish(),
        }
    }
}

/// A render function.
pub type RenderFn<'a> = Box<dyn Fn() -> Result<Content<'a>> + 'a>;

/// A lazy, recursive render node.
pub struct Buffer<'a> {
    /// Produces the buffer's content on demand.
    render: RenderFn<'a>,
    /// Offset from the parent buffer; absolute only for the tree root.
    pub position: Position,
    /// Area covered.
    pub size: Size,
}

impl fmt::Debug for Buffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("position", &self.position)
            .field("size", &self.size)
            .finish()
    }
}

impl<'a> Buffer<'a> {
    /// Construct a buffer from a render function.
    pub fn new<F>(render: F, position: Position, size: Size) -> Self
    where
        F: Fn() -> Result<Content<'a>> + 'a,
    {
        Self {
            render: Box::new(render),
            position,
            size,
        }
    }

    /// Construct a leaf buffer that always renders `text`.
    pub fn text(text: impl Into<String>, position: Position, size: Size) -> Self {
        let text = text.into();
        Self::new(move || Ok(Content::Text(text.clone())), position, size)
    }

    /// Run the render function.
    pub fn resolve(&self) -> Result<Content<'a>> {
        (self.render)()
    }

    /// Wrap the render function so that text content is prefixed with
    /// `prefix`. Child lists pass through unchanged.
    pub fn prefixed(self, prefix: &'a str) -> Self {
        let inner = self.render;
        Self {
            render: Box::new(move || {
                Ok(match inner()? {
                    Content::Text(t) => Content::Text(format!("{prefix}{t}")),
                    children => children,
                })
            }),
            position: self.position,
            size: self.size,
        }
    }
}

/// A single absolute-position text write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paint {
    /// Absolute screen position.
    pub position: Position,
    /// Text to draw. May span several lines.
    pub text: String,
}

impl Paint {
    /// Construct a paint.
    pub fn new(position: impl Into<Position>, text: impl Into<String>) -> Self {
        Self {
            position: position.into(),
            text: text.into(),
        }
    }
}

/// Resolve a buffer tree into absolute writes, in tree order. The root
/// buffer's position is taken as absolute. Any render failure aborts the
/// flatten.
pub fn flatten(root: &Buffer<'_>) -> Result<Vec<Paint>> {
    let mut out = Vec::new();
    flatten_into(root, root.position, &mut out)?;
    Ok(out)
}

/// Resolve `buffer`, drawn at absolute position `origin`, appending to `out`.
fn flatten_into(buffer: &Buffer<'_>, origin: Position, out: &mut Vec<Paint>) -> Result<()> {
    match buffer.resolve()? {
        Content::Text(text) => out.push(Paint {
            position: origin,
            text,
        }),
        Content::Children(children) => {
            for child in &children {
                flatten_into(child, origin + child.position, out)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::Error;

    #[test]
    fn leaf() -> Result<()> {
        let b = Buffer::text("hi", Position::new(2, 3), Size::new(2, 1));
        assert_eq!(flatten(&b)?, vec![Paint::new((2, 3), "hi")]);
        Ok(())
    }

    #[test]
    fn nested_offsets_accumulate() -> Result<()> {
        let root = Buffer::new(
            || {
                Ok(Content::Children(vec![
                    Buffer::text("a", Position::new(0, 0), Size::new(1, 1)),
                    Buffer::new(
                        || {
                            Ok(Content::Children(vec![Buffer::text(
                                "b",
                                Position::new(1, 1),
                                Size::new(1, 1),
                            )]))
                        },
                        Position::new(5, 2),
                        Size::new(2, 2),
                    ),
                ]))
            },
            Position::new(10, 10),
            Size::new(10, 10),
        );
        assert_eq!(
            flatten(&root)?,
            vec![Paint::new((10, 10), "a"), Paint::new((16, 13), "b")]
        );
        Ok(())
    }

    #[test]
    fn deterministic() -> Result<()> {
        let root = Buffer::new(
            || {
                Ok(Content::Children(vec![
                    Buffer::text("x", Position::new(0, 1), Size::new(1, 1)),
                    Buffer::text("y", Position::new(0, 0), Size::new(1, 1)),
                ]))
            },
            Position::zero(),
            Size::new(1, 2),
        );
        assert_eq!(flatten(&root)?, flatten(&root)?);
        Ok(())
    }

    #[test]
    fn prefixed_text_only() -> Result<()> {
        let leaf = Buffer::text("ok", Position::zero(), Size::new(2, 1)).prefixed("> ");
        assert_eq!(flatten(&leaf)?, vec![Paint::new((0, 0), "> ok")]);

        let parent = Buffer::new(
            || {
                Ok(Content::Children(vec![Buffer::text(
                    "c",
                    Position::zero(),
                    Size::new(1, 1),
                )]))
            },
            Position::zero(),
            Size::new(1, 1),
        )
        .prefixed("> ");
        assert_eq!(flatten(&parent)?, vec![Paint::new((0, 0), "c")]);
        Ok(())
    }

    #[test]
    fn errors_abort() {
        let root = Buffer::new(
            || {
                Ok(Content::Children(vec![
                    Buffer::text("fine", Position::zero(), Size::new(4, 1)),
                    Buffer::new(
                        || Err(Error::Render("bad subtree".into())),
                        Position::zero(),
                        Size::zero(),
                    ),
                ]))
            },
            Position::zero(),
            Size::zero(),
        );
        assert_eq!(
            flatten(&root),
            Err(Error::Render("bad subtree".into()))
        );
    }
}
