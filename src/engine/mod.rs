//! UI Engine - the node tree and node identity.
//!
//! The engine manages the core data structure every other layer walks:
//! - Node: owned children, weak parent, typed props, computed geometry
//! - Registry: unique ids and live-node accounting
//!
//! # Architecture
//!
//! ```text
//! Node (Container) ─owns─▶ [Node (Text), Node (Button), Node (List) ─owns─▶ [...]]
//!        ▲                       │
//!        └────── weak parent ────┘
//! ```
//!
//! Control-flow wrappers (list, show, switch) replace their own children
//! from inside an effect; everything else is fixed at build time.

mod node;
mod registry;

pub use node::*;
pub use registry::{live_node_count, NodeId};
