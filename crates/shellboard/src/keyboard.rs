//! Ordered key bindings for a single element.

use std::{fmt, rc::Rc};

use crate::{
    error::Result,
    event::key::{Key, KeyCode},
    observer::{Observer, default_observer},
    state::ElementBase,
};

/// The result of a key handler.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Outcome {
    /// The key was acted on.
    Handle,
    /// The handler declined the key.
    Ignore,
}

impl Outcome {
    /// Was the key acted on?
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handle)
    }

    /// Collapse a list of handler results: handled if any handler acted.
    pub fn any(outcomes: &[Self]) -> Self {
        if outcomes.iter().any(Self::is_handled) {
            Self::Handle
        } else {
            Self::Ignore
        }
    }
}

/// Decides whether a binding applies to a key.
pub type Predicate = Box<dyn Fn(&Key) -> bool>;

/// Acts on a key. `C` is the state the binding operates on - the element
/// minus its router.
pub type KeyHandler<C> = Box<dyn FnMut(&mut C, &Key) -> Result<Outcome>>;

/// Match any key.
pub fn any_key() -> impl Fn(&Key) -> bool + 'static {
    |_| true
}

/// Match keys whose code is one of `codes`, ignoring modifiers.
pub fn any_of(codes: impl IntoIterator<Item = KeyCode>) -> impl Fn(&Key) -> bool + 'static {
    let codes: Vec<KeyCode> = codes.into_iter().collect();
    move |k| codes.contains(&k.key)
}

/// Match keys whose code is none of `codes`, ignoring modifiers.
pub fn none_of(codes: impl IntoIterator<Item = KeyCode>) -> impl Fn(&Key) -> bool + 'static {
    let codes: Vec<KeyCode> = codes.into_iter().collect();
    move |k| !codes.contains(&k.key)
}

/// A single binding.
pub struct KeyboardEvent<C> {
    /// Applicability test.
    predicate: Predicate,
    /// Action.
    handler: KeyHandler<C>,
}

/// An append-only list of key bindings.
///
/// Every binding whose predicate accepts a key fires, in registration order,
/// and the handler results are returned in that order.
pub struct KeyboardRouter<C> {
    /// Bindings in registration order.
    events: Vec<KeyboardEvent<C>>,
    /// Notified after every dispatch.
    observer: Rc<dyn Observer>,
}

impl<C> fmt::Debug for KeyboardRouter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardRouter")
            .field("events", &self.events.len())
            .finish()
    }
}

impl<C> Default for KeyboardRouter<C> {
    fn default() -> Self {
        Self::new(default_observer())
    }
}

impl<C> KeyboardRouter<C> {
    /// Construct an empty router reporting to `observer`.
    pub fn new(observer: Rc<dyn Observer>) -> Self {
        Self {
            events: Vec::new(),
            observer,
        }
    }

    /// Replace the observer.
    pub fn set_observer(&mut self, observer: Rc<dyn Observer>) {
        self.observer = observer;
    }

    /// Append a binding.
    pub fn add_event<H, P>(&mut self, handler: H, predicate: P) -> &mut Self
    where
        H: FnMut(&mut C, &Key) -> Result<Outcome> + 'static,
        P: Fn(&Key) -> bool + 'static,
    {
        self.events.push(KeyboardEvent {
            predicate: Box::new(predicate),
            handler: Box::new(handler),
        });
        self
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<C: AsRef<ElementBase>> KeyboardRouter<C> {
    /// Run every binding that accepts `key` against `target`. A handler error
    /// aborts the dispatch.
    pub fn key_pressed(&mut self, target: &mut C, key: &Key) -> Result<Vec<Outcome>> {
        let mut outcomes = Vec::new();
        for event in &mut self.events {
            if (event.predicate)(key) {
                outcomes.push((event.handler)(target, key)?);
            }
        }
        self.observer
            .keyboard(target.as_ref().identity(), key, outcomes.len());
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, observer::RecordingObserver};

    /// Minimal binding target that records which handlers ran.
    struct Target {
        /// Element state.
        base: ElementBase,
        /// Handler names, in the order they fired.
        log: Vec<&'static str>,
    }

    impl AsRef<ElementBase> for Target {
        fn as_ref(&self) -> &ElementBase {
            &self.base
        }
    }

    fn target() -> Target {
        Target {
            base: ElementBase::new("test"),
            log: vec![],
        }
    }

    #[test]
    fn dispatch_order() -> Result<()> {
        let mut r = KeyboardRouter::default();
        r.add_event(
            |t: &mut Target, _| {
                t.log.push("h1");
                Ok(Outcome::Handle)
            },
            any_of([KeyCode::Enter]),
        );
        r.add_event(
            |t: &mut Target, _| {
                t.log.push("h2");
                Ok(Outcome::Ignore)
            },
            any_key(),
        );
        let mut t = target();
        let out = r.key_pressed(&mut t, &KeyCode::Enter.into())?;
        assert_eq!(out, vec![Outcome::Handle, Outcome::Ignore]);
        assert_eq!(t.log, vec!["h1", "h2"]);
        Ok(())
    }

    #[test]
    fn non_matching_keys() -> Result<()> {
        let mut r = KeyboardRouter::default();
        r.add_event(|_: &mut Target, _| Ok(Outcome::Handle), any_of([KeyCode::Up]));
        r.add_event(
            |_: &mut Target, _| Ok(Outcome::Handle),
            none_of([KeyCode::Up, KeyCode::Down]),
        );
        let mut t = target();
        assert_eq!(r.key_pressed(&mut t, &KeyCode::Down.into())?, vec![]);
        assert_eq!(r.key_pressed(&mut t, &'x'.into())?, vec![Outcome::Handle]);
        assert_eq!(r.len(), 2);
        Ok(())
    }

    #[test]
    fn duplicate_predicates_all_fire() -> Result<()> {
        let mut r = KeyboardRouter::default();
        for _ in 0..3 {
            r.add_event(|_: &mut Target, _| Ok(Outcome::Handle), any_key());
        }
        let out = r.key_pressed(&mut target(), &'a'.into())?;
        assert_eq!(out.len(), 3);
        Ok(())
    }

    #[test]
    fn handler_errors_propagate() {
        let mut r = KeyboardRouter::default();
        r.add_event(
            |_: &mut Target, _| Err(Error::Invalid("boom".into())),
            any_key(),
        );
        assert!(r.key_pressed(&mut target(), &'a'.into()).is_err());
    }

    #[test]
    fn dispatch_is_observed() -> Result<()> {
        let rec = RecordingObserver::shared();
        let mut r = KeyboardRouter::new(rec.clone());
        r.add_event(|_: &mut Target, _| Ok(Outcome::Handle), any_key());
        r.key_pressed(&mut target(), &'q'.into())?;
        assert_eq!(rec.lines(), vec!["<test> key q fired 1".to_string()]);
        Ok(())
    }

    #[test]
    fn collapse() {
        assert_eq!(Outcome::any(&[]), Outcome::Ignore);
        assert_eq!(
            Outcome::any(&[Outcome::Ignore, Outcome::Handle]),
            Outcome::Handle
        );
    }
}
