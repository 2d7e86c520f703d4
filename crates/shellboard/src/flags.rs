//! Per-element boolean switches.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Error, Result};

/// The element can take focus.
pub const ACTIVE: &str = "is_active_element";
/// The element's size is frozen; auto-sizing leaves it untouched.
pub const FIXED_SIZE: &str = "is_fixed_size";
/// The element is excluded from sizing, rendering and navigation.
pub const HIDDEN: &str = "is_hidden";
/// A checkbox is checked.
pub const CHECKED: &str = "is_checked";

/// A string-keyed store of booleans scoped to one element.
///
/// Reading a key that was never written is distinct from reading `false`:
/// [`FlagsStore::get`] returns `None` and logs a warning.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlagsStore {
    /// Flag values by name.
    flags: BTreeMap<String, bool>,
}

impl FlagsStore {
    /// Construct an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a flag. Unset flags yield `None` and a warning.
    pub fn get(&self, key: &str) -> Option<bool> {
        let value = self.flags.get(key).copied();
        if value.is_none() {
            tracing::warn!(flag = key, "read of unset flag");
        }
        value
    }

    /// Read a flag, treating an unset flag as `false` without a warning.
    pub fn is_set(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    /// Has this flag been written?
    pub fn contains(&self, key: &str) -> bool {
        self.flags.contains_key(key)
    }

    /// Write a flag.
    pub fn set(&mut self, key: impl Into<String>, value: bool) {
        self.flags.insert(key.into(), value);
    }

    /// Write a flag from a dynamically typed value. Anything other than a
    /// JSON boolean is rejected.
    pub fn try_set(&mut self, key: impl Into<String>, value: &Value) -> Result<()> {
        let key = key.into();
        match value {
            Value::Bool(b) => {
                self.flags.insert(key, *b);
                Ok(())
            }
            other => Err(Error::Type(format!(
                "flag {key} must be a boolean, got {other}"
            ))),
        }
    }

    /// Remove a flag, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<bool> {
        self.flags.remove(key)
    }

    /// Iterate over all flags in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
