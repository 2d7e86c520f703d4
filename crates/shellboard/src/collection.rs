//! An ordered, heterogeneous list of elements.

use std::fmt;

use serde_json::Value;

use crate::{
    element::{self, Element},
    error::{Error, Result},
};

/// An ordered list of boxed elements with filtering and broadcast helpers.
///
/// Order is insertion order. Insertion is type-checked at compile time; the
/// runtime type check is on retrieval with [`Collection::get_as`].
#[derive(Default)]
pub struct Collection {
    /// Elements in order.
    items: Vec<Box<dyn Element>>,
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.items.iter().map(|e| e.base().identity().to_string()))
            .finish()
    }
}

impl Collection {
    /// Construct an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an element, returning its index.
    pub fn append(&mut self, element: impl Element) -> usize {
        self.push_boxed(Box::new(element))
    }

    /// Append an already boxed element, returning its index.
    pub fn push_boxed(&mut self, element: Box<dyn Element>) -> usize {
        self.items.push(element);
        self.items.len() - 1
    }

    /// Insert an element before `index`. `index` may equal the length.
    pub fn insert(&mut self, index: usize, element: impl Element) -> Result<()> {
        if index > self.items.len() {
            return Err(Error::Invalid(format!(
                "insert at {index} in collection of {}",
                self.items.len()
            )));
        }
        self.items.insert(index, Box::new(element));
        Ok(())
    }

    /// Remove and return the element at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Box<dyn Element>> {
        if index >= self.items.len() {
            return Err(Error::Invalid(format!(
                "remove at {index} in collection of {}",
                self.items.len()
            )));
        }
        Ok(self.items.remove(index))
    }

    /// The element at `index`.
    pub fn get(&self, index: usize) -> Option<&dyn Element> {
        self.items.get(index).map(Box::as_ref)
    }

    /// The element at `index`, mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut dyn Element> {
        self.items.get_mut(index).map(Box::as_mut)
    }

    /// The element at `index` as a concrete type.
    pub fn get_as<T: Element>(&self, index: usize) -> Result<&T> {
        let e = self
            .get(index)
            .ok_or_else(|| Error::Invalid(format!("no element at {index}")))?;
        element::downcast(e)
    }

    /// The element at `index` as a concrete type, mutably.
    pub fn get_as_mut<T: Element>(&mut self, index: usize) -> Result<&mut T> {
        let e = self
            .get_mut(index)
            .ok_or_else(|| Error::Invalid(format!("no element at {index}")))?;
        element::downcast_mut(e)
    }

    /// Iterate in order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Element> {
        self.items.iter().map(Box::as_ref)
    }

    /// Iterate mutably in order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut dyn Element> {
        self.items.iter_mut().map(Box::as_mut)
    }

    /// Elements matching `pred`, in order.
    pub fn filter(&self, pred: impl Fn(&dyn Element) -> bool) -> Vec<&dyn Element> {
        self.iter().filter(|e| pred(*e)).collect()
    }

    /// Project every element through `f`, in order.
    pub fn map<T>(&self, f: impl Fn(&dyn Element) -> T) -> Vec<T> {
        self.iter().map(f).collect()
    }

    /// Indices of elements matching `pred`, in order.
    pub fn indices(&self, pred: impl Fn(&dyn Element) -> bool) -> Vec<usize> {
        self.iter()
            .enumerate()
            .filter(|(_, e)| pred(*e))
            .map(|(i, _)| i)
            .collect()
    }

    /// Apply `f` to every element matching `pred`. Returns the number of
    /// elements touched.
    pub fn for_each_where(
        &mut self,
        pred: impl Fn(&dyn Element) -> bool,
        mut f: impl FnMut(&mut dyn Element),
    ) -> usize {
        let mut n = 0;
        for e in self.iter_mut() {
            if pred(e) {
                f(e);
                n += 1;
            }
        }
        n
    }

    /// Write a flag on every element matching `pred`.
    pub fn set_flag(
        &mut self,
        key: &str,
        value: bool,
        pred: impl Fn(&dyn Element) -> bool,
    ) -> usize {
        self.for_each_where(pred, |e| e.base_mut().flags.set(key, value))
    }

    /// Call the named event on every element matching `pred`, collecting
    /// return values in order. The matching set is fixed before any handler
    /// runs. The first error stops the broadcast.
    pub fn call_event(
        &mut self,
        name: &str,
        pred: impl Fn(&dyn Element) -> bool,
        args: &[Value],
    ) -> Result<Vec<Value>> {
        let targets = self.indices(pred);
        let mut results = Vec::with_capacity(targets.len());
        for i in targets {
            if let Some(e) = self.items.get_mut(i) {
                results.push(e.base_mut().call_event(name, args)?);
            }
        }
        Ok(results)
    }
}
