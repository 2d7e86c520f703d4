//! State shared by every element.

use std::{fmt, rc::Rc};

use serde_json::Value;

use crate::{
    error::Result,
    event::EventRegistry,
    flags::{self, FlagsStore},
    geom::{Position, Size},
    observer::{Identity, Observer},
};

/// Focus state of an element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementState {
    /// Not on the focus chain.
    #[default]
    Missed,
    /// On the focus chain.
    Selected,
}

impl fmt::Display for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missed => write!(f, "missed"),
            Self::Selected => write!(f, "selected"),
        }
    }
}

/// The data every element carries, embedded in each concrete element type.
#[derive(Debug)]
pub struct ElementBase {
    /// Element kind, fixed at construction.
    kind: &'static str,
    /// Offset relative to the parent.
    pub position: Position,
    /// Current size.
    pub size: Size,
    /// Application-assigned tag.
    pub tag: String,
    /// Focus state.
    pub state: ElementState,
    /// Capability switches.
    pub flags: FlagsStore,
    /// Named event handlers.
    pub events: EventRegistry,
}

impl ElementBase {
    /// Construct the base for an element of the given kind. The standard
    /// flags start out `false`.
    pub fn new(kind: &'static str) -> Self {
        tracing::trace!(target: "shellboard::create", kind, "create element");
        let mut flags = FlagsStore::new();
        flags.set(flags::ACTIVE, false);
        flags.set(flags::FIXED_SIZE, false);
        flags.set(flags::HIDDEN, false);
        Self {
            kind,
            position: Position::zero(),
            size: Size::zero(),
            tag: String::new(),
            state: ElementState::Missed,
            flags,
            events: EventRegistry::default(),
        }
    }

    /// The element kind.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Kind and tag, for log output.
    pub fn identity(&self) -> Identity<'_> {
        Identity {
            kind: self.kind,
            tag: &self.tag,
        }
    }

    /// Route event observation to a different observer.
    pub fn set_observer(&mut self, observer: Rc<dyn Observer>) {
        self.events.set_observer(observer);
    }

    /// Call a named event on this element.
    pub fn call_event(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        let owner = Identity {
            kind: self.kind,
            tag: &self.tag,
        };
        self.events.call(owner, name, args)
    }

    /// Is the element on the focus chain?
    pub fn is_selected(&self) -> bool {
        self.state == ElementState::Selected
    }

    /// Can the element take focus?
    pub fn is_active(&self) -> bool {
        self.flags.is_set(flags::ACTIVE)
    }

    /// Is the element hidden?
    pub fn is_hidden(&self) -> bool {
        self.flags.is_set(flags::HIDDEN)
    }

    /// Is the element's size frozen?
    pub fn is_fixed_size(&self) -> bool {
        self.flags.is_set(flags::FIXED_SIZE)
    }
}

impl AsRef<Self> for ElementBase {
    fn as_ref(&self) -> &Self {
        self
    }
}
