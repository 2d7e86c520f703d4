//! Error type shared across the crate.

use std::{io, result::Result as StdResult};

use thiserror::Error;

use crate::geom;

/// Result type for shellboard operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    #[error("type: {0}")]
    /// A value of the wrong type was supplied where a specific type is
    /// required.
    Type(String),
    #[error("no handler registered for event: {0}")]
    /// An event was called by a name that was never registered.
    MissingHandler(String),
    #[error("render: {0}")]
    /// Rendering failure.
    Render(String),
    #[error("geometry: {0}")]
    /// Geometry failure.
    Geometry(String),
    #[error("backend: {0}")]
    /// Terminal driver failure.
    Backend(String),
    #[error("runloop: {0}")]
    /// Run loop failure.
    RunLoop(String),
    #[error("invalid: {0}")]
    /// Invalid input error.
    Invalid(String),
    #[error("config: {0}")]
    /// Malformed options.
    Config(String),
    /// The root was driven before a layout was set.
    #[error("no layout set")]
    NoLayout,
    #[error("internal: {0}")]
    /// Internal error.
    Internal(String),
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
