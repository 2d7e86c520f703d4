//! Observation of handler invocation.
//!
//! Event registries and keyboard routers report every dispatch to an
//! [`Observer`] handed to them at construction. The owner of the registry is
//! identified by an [`Identity`] passed in at call time, so helpers never hold
//! a reference back to the element that owns them.

use std::{cell::RefCell, fmt, rc::Rc};

use crate::event::key::Key;

/// The kind and tag of an element, used to label log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity<'a> {
    /// Element kind, e.g. `button` or `vlayout`.
    pub kind: &'static str,
    /// Application-assigned tag, possibly empty.
    pub tag: &'a str,
}

impl fmt::Display for Identity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tag.is_empty() {
            write!(f, "<{}>", self.kind)
        } else {
            write!(f, "<{}> (tag={})", self.kind, self.tag)
        }
    }
}

/// Receives a notification for every handler dispatch.
pub trait Observer {
    /// A named event was called with the given truncated argument summary.
    fn event(&self, owner: Identity<'_>, name: &str, args: &str);

    /// A key was routed through a keyboard router, firing `fired` handlers.
    fn keyboard(&self, owner: Identity<'_>, key: &Key, fired: usize);
}

/// The default observer, which forwards to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn event(&self, owner: Identity<'_>, name: &str, args: &str) {
        tracing::trace!(
            target: "shellboard::event",
            kind = owner.kind,
            tag = owner.tag,
            "{owner} calls event <{name}> (args={args})"
        );
    }

    fn keyboard(&self, owner: Identity<'_>, key: &Key, fired: usize) {
        tracing::trace!(
            target: "shellboard::keyboard",
            kind = owner.kind,
            tag = owner.tag,
            "{owner} key {key} fired {fired} handler(s)"
        );
    }
}

/// Shared handle to the default observer.
pub fn default_observer() -> Rc<dyn Observer> {
    Rc::new(TracingObserver)
}

/// An observer that keeps a log of what it saw. Useful in tests.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    /// Recorded lines, one per notification.
    pub lines: RefCell<Vec<String>>,
}

impl RecordingObserver {
    /// Construct a shared recording observer.
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// A copy of all recorded lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl Observer for RecordingObserver {
    fn event(&self, owner: Identity<'_>, name: &str, args: &str) {
        self.lines
            .borrow_mut()
            .push(format!("{owner} event {name} ({args})"));
    }

    fn keyboard(&self, owner: Identity<'_>, key: &Key, fired: usize) {
        self.lines
            .borrow_mut()
            .push(format!("{owner} key {key} fired {fired}"));
    }
}
