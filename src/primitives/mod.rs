//! UI Primitives - Component building blocks.
//!
//! This module provides the builders that produce [`Node`]s:
//! - [`container`], [`row`], [`column`], [`fragment`] - layout containers
//! - [`text`], [`heading`] - text display
//! - [`button`], [`text_input`], [`checkbox`] - interactive controls
//! - [`list`], [`show`], [`switch`] / [`case`] - control flow wrappers
//! - [`scroll`] - fixed viewport over one child
//!
//! # Reactivity
//!
//! Props can be:
//! - Static values: `"label".into()`
//! - Signals: `my_signal.into()` (stays connected!)
//! - Getters: `derive(move || compute_label())`
//!
//! The key is to pass props directly - don't extract values before binding!
//!
//! ```ignore
//! // CORRECT - signal stays connected
//! text(label_signal.clone());
//!
//! // WRONG - extracts value, breaks reactivity
//! text(label_signal.get());
//! ```
//!
//! [`Node`]: crate::engine::Node

mod container;
mod control_flow;
mod input;
mod scroll;
mod text;
mod types;

pub use container::{column, container, fragment, row};
pub use control_flow::{case, list, show, switch, Case};
pub use input::{button, checkbox, text_input};
pub use scroll::{scroll, scroll_by, scroll_state, scroll_to};
pub use text::{heading, text};
pub use types::*;

pub(crate) use input::{click, edit_key, insert_char, place_cursor, submit, toggle};
