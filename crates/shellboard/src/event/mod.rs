//! Named, per-element event slots.

pub mod key;

use std::{collections::BTreeMap, fmt, rc::Rc};

use serde_json::Value;

use crate::{
    error::{Error, Result},
    observer::{Identity, Observer, default_observer},
};

/// A handler installed under an event name.
pub type Handler = Box<dyn FnMut(&[Value]) -> Result<Value>>;

/// Maximum number of arguments shown when an event call is logged.
const SHOWN_ARGS: usize = 2;

/// Summarize call arguments for logging: the first two values, followed by
/// `...` if there are more, or `None` if there are none.
pub fn summarize_args(args: &[Value]) -> String {
    if args.is_empty() {
        return "None".into();
    }
    let mut out = args
        .iter()
        .take(SHOWN_ARGS)
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if args.len() > SHOWN_ARGS {
        out.push_str(", ...");
    }
    out
}

/// A map from event name to the currently installed handler.
///
/// Setting a name installs or replaces its handler. Calling a name runs the
/// installed handler and reports the call to the registry's observer;
/// calling a name that was never set is an error.
pub struct EventRegistry {
    /// Installed handlers.
    handlers: BTreeMap<String, Handler>,
    /// Notified on every call.
    observer: Rc<dyn Observer>,
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new(default_observer())
    }
}

impl EventRegistry {
    /// Construct an empty registry reporting to `observer`.
    pub fn new(observer: Rc<dyn Observer>) -> Self {
        Self {
            handlers: BTreeMap::new(),
            observer,
        }
    }

    /// Replace the observer.
    pub fn set_observer(&mut self, observer: Rc<dyn Observer>) {
        self.observer = observer;
    }

    /// Install or replace the handler for `name`.
    pub fn set<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: FnMut(&[Value]) -> Result<Value> + 'static,
    {
        self.handlers.insert(name.into(), Box::new(handler));
    }

    /// Is there a handler for `name`?
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered event names, in order.
    pub fn names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    /// Call the handler installed under `name`, on behalf of `owner`.
    pub fn call(&mut self, owner: Identity<'_>, name: &str, args: &[Value]) -> Result<Value> {
        let handler = self
            .handlers
            .get_mut(name)
            .ok_or_else(|| Error::MissingHandler(format!("{name} on {owner}")))?;
        self.observer.event(owner, name, &summarize_args(args));
        handler(args)
    }
}
