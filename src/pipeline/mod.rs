//! Application Pipeline
//!
//! This module connects the component tree to a host device.
//!
//! # Pipeline Architecture
//!
//! ```text
//! Host events → App::dispatch → handlers write signals
//!                                     │
//!                          render tracker marks dirty
//!                                     │
//!                   compute_layout → draw_tree → Host (Display)
//! ```
//!
//! ## Key Design Principles
//!
//! - **One tracker**: every signal read during layout and drawing subscribes
//!   a single reaction, which only raises the dirty flag
//! - **Full redraw**: a dirty frame clears and repaints the whole grid
//! - **Swappable host**: [`TerminalHost`] for crossterm, [`HeadlessHost`]
//!   for tests and scripted runs

mod config;
mod host;
mod mount;
mod terminal;

pub use config::{RuntimeConfig, DEFAULT_BLINK_INTERVAL, DEFAULT_IDLE_POLL};
pub use host::{HeadlessHost, Host, HostEvent};
pub use mount::{request_stop, run, App, StopHandle};
pub use terminal::{convert_event, TerminalHost};
