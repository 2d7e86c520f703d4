//! Run loop options, loadable from JSON.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::{error::Result, layout::DEFAULT_CURSOR};

/// Ctrl+C handling policy for the run loop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CtrlCBehavior {
    /// Stop the run loop with status 130.
    #[default]
    Exit,
    /// Dump the element tree to stderr and stop the run loop with status 130.
    DumpTreeAndExit,
}

/// Options for a [`Root`](crate::Root).
///
/// Every field has a default, so a partial JSON object is accepted:
///
/// ```json
/// { "cursor": "* ", "flags": { "wrap": { "is_hidden": true } } }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Marker drawn before the focused child of every layout.
    pub cursor: String,
    /// Ctrl+C handling.
    pub ctrl_c: CtrlCBehavior,
    /// Install a panic hook that restores the terminal before printing a
    /// backtrace. Only the crossterm run loop honours this.
    pub install_panic_hook: bool,
    /// Flag overrides applied when a layout is installed, keyed by element
    /// tag and then by flag name. Values must be booleans.
    pub flags: BTreeMap<String, BTreeMap<String, Value>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            cursor: DEFAULT_CURSOR.to_string(),
            ctrl_c: CtrlCBehavior::Exit,
            install_panic_hook: false,
            flags: BTreeMap::new(),
        }
    }
}

impl Options {
    /// Parse options from a JSON document.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Builder: set the cursor marker.
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = cursor.into();
        self
    }

    /// Builder: set the Ctrl+C policy.
    pub fn with_ctrl_c(mut self, ctrl_c: CtrlCBehavior) -> Self {
        self.ctrl_c = ctrl_c;
        self
    }

    /// Builder: install the terminal-restoring panic hook.
    pub fn with_panic_hook(mut self) -> Self {
        self.install_panic_hook = true;
        self
    }

    /// Builder: override a flag on elements with the given tag.
    pub fn with_flag(mut self, tag: impl Into<String>, flag: impl Into<String>, value: bool) -> Self {
        self.flags
            .entry(tag.into())
            .or_default()
            .insert(flag.into(), Value::Bool(value));
        self
    }
}
