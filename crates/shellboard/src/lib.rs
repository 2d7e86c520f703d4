//! Shellboard: a retained-mode widget toolkit for character-cell terminals.
//!
//! Applications compose a tree of [`Element`]s - labels, buttons, checkboxes
//! and horizontal or vertical [`Layout`]s - and hand the top layout to a
//! [`Root`]. The root drives a synchronous loop: update the tree, read one
//! key and route it down the focus chain, then build the tree into a
//! [`render::Buffer`] and flatten it into absolute text writes for the
//! terminal [`backend::Backend`].
//!
//! # Module Organization
//!
//! - [`geom`] - Position, Size and Axis
//! - [`element`] - The element contract and tree traversal
//! - [`widgets`] - Leaf widgets
//! - [`layout`] - Containers and focus navigation
//! - [`render`] - Buffers and the flatten pipeline
//! - [`backend`] - Terminal drivers

#![warn(missing_docs)]

pub mod backend;
pub mod collection;
pub mod cursor;
pub mod dump;
pub mod element;
pub mod error;
pub mod event;
pub mod flags;
pub mod keyboard;
pub mod layout;
pub mod observer;
pub mod options;
pub mod render;
pub mod root;
pub mod state;
pub mod widgets;

pub use shellboard_geom as geom;

pub use collection::Collection;
pub use cursor::CursorController;
pub use element::Element;
pub use error::{Error, Result};
pub use event::key::{Key, KeyCode};
pub use geom::{Axis, Position, Size};
pub use keyboard::{KeyboardRouter, Outcome};
pub use layout::Layout;
pub use options::{CtrlCBehavior, Options};
pub use root::Root;
pub use state::{ElementBase, ElementState};
pub use widgets::{Button, CheckBox, Label};
