//! State Module - Runtime interaction state
//!
//! This module contains the state systems that power interactivity:
//!
//! - **Focus** - Tab / BackTab cycling over interactive nodes
//! - **Keyboard** - Key identities
//! - **Mouse** - Pointer types and hit testing
//! - **Scroll** - Scroll container offsets with clamping
//! - **Text edit** - Cursor-aware editing of text input values

mod focus;
mod keyboard;
mod mouse;
pub mod scroll;
mod text_edit;

pub use focus::*;
pub use keyboard::*;
pub use mouse::*;
pub use scroll::ScrollState;
pub use text_edit::{window_start, TextEditor};
