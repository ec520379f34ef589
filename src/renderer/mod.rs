//! Renderer - from laid-out nodes to cells.
//!
//! - [`Display`] is the output seam (terminal, in-memory buffer)
//! - [`FrameBuffer`] is the in-memory display used by tests and headless runs
//! - [`draw_tree`] paints a laid-out tree onto any display
//!
//! The drawer reads prop values with tracking, so drawing inside the
//! runtime's render tracker subscribes it to every signal shown on screen.

mod buffer;
mod display;
mod draw;

pub use buffer::{FrameBuffer, CONTINUATION};
pub use display::Display;
pub use draw::{draw_tree, DrawContext};
