//! # spark-grid
//!
//! Reactive Character-Grid UI Runtime for Rust.
//!
//! Interfaces are built as a tree of nodes whose props can be bound to
//! signals. Changing a signal repaints whatever read it; control flow
//! wrappers rebuild their part of the tree when their inputs change.
//!
//! ## Architecture
//!
//! ```text
//! signals / stores ──► node props ──► layout (measure + position)
//!        ▲                                   │
//!        │                                   ▼
//!   event handlers ◄── App loop ◄──── draw into a Display
//! ```
//!
//! ## Modules
//!
//! - [`reactive`] - Signals, effects, memos, batching, stores
//! - [`engine`] - Nodes, the component tree, lifecycle
//! - [`primitives`] - Builders (text, button, list, show, scroll, ...)
//! - [`layout`] - Two-pass measure/position layout on the cell grid
//! - [`renderer`] - Display trait, frame buffer, tree drawing
//! - [`state`] - Focus, keys, mouse hit testing, scroll state, text editing
//! - [`pipeline`] - Hosts and the application loop
//! - [`theme`] - Color themes
//!
//! ## Example
//!
//! ```ignore
//! use spark_grid::prelude::*;
//!
//! let count = signal(0);
//! let label = count.clone();
//! let mut host = TerminalHost::new()?;
//! run(&mut host, RuntimeConfig::default(), move || {
//!     column(vec![
//!         text(derive(move || format!("Count: {}", label.get()))),
//!         button(ButtonProps::new("+1", move || count.update(|c| *c += 1))),
//!     ])
//! })?;
//! ```

pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod primitives;
pub mod reactive;
pub mod renderer;
pub mod state;
pub mod theme;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{Error, Result};

pub use engine::{live_node_count, ComponentType, Node, NodeId, NodeKind};

pub use reactive::{
    batch, create_effect, create_memo, create_reaction, create_scope, create_signal,
    create_store, signal, untrack, Effect, ReadSignal, Scope, SetStore, Signal, Store,
    WriteSignal,
};

pub use primitives::{
    button, case, checkbox, column, container, derive, fragment, heading, list, row, scroll,
    scroll_by, scroll_state, scroll_to, show, switch, text, text_input, ButtonProps, Callback,
    Case, CheckboxProps, Cleanup, ContainerProps, InputProps, PropValue, ScrollProps,
};

pub use layout::{compute_layout, string_width};

pub use renderer::{draw_tree, Display, DrawContext, FrameBuffer};

pub use state::{FocusManager, Key, MouseButton, ScrollDirection, ScrollState};

pub use pipeline::{
    request_stop, run, App, HeadlessHost, Host, HostEvent, RuntimeConfig, StopHandle,
    TerminalHost,
};

pub use theme::{get_preset, preset_names, Theme};

/// Everything needed to build and run an application.
pub mod prelude {
    pub use crate::engine::Node;
    pub use crate::pipeline::{request_stop, run, HeadlessHost, RuntimeConfig, TerminalHost};
    pub use crate::primitives::{
        button, case, checkbox, column, container, derive, fragment, heading, list, row, scroll,
        show, switch, text, text_input, ButtonProps, CheckboxProps, ContainerProps, InputProps,
        PropValue, ScrollProps,
    };
    pub use crate::reactive::{
        batch, create_effect, create_memo, create_signal, create_store, signal, untrack, Signal,
    };
    pub use crate::types::{AlignItems, Color, Dimension, FlexDirection, JustifyContent, Style};
}
