//! Node Registry - identity allocation and live-node accounting.
//!
//! Every node gets a unique, never-reused id at creation. The registry also
//! counts how many node instances are alive so tests and diagnostics can
//! check that discarded subtrees are really freed.

use std::cell::Cell;
use std::fmt;

// =============================================================================
// Registry State
// =============================================================================

thread_local! {
    /// Counter for generating unique node ids.
    static ID_COUNTER: Cell<u64> = const { Cell::new(0) };

    /// Number of node instances currently alive.
    static LIVE_NODES: Cell<usize> = const { Cell::new(0) };
}

/// Unique identity of a node instance.
///
/// Ids are never reused, so two nodes with the same id are the same instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

// =============================================================================
// Allocation
// =============================================================================

/// Allocate an id for a new node and count it as alive.
pub(crate) fn allocate_id() -> NodeId {
    LIVE_NODES.with(|live| live.set(live.get() + 1));
    ID_COUNTER.with(|counter| {
        let id = counter.get();
        counter.set(id + 1);
        NodeId(id)
    })
}

/// Count a node as freed.
pub(crate) fn release_id(_id: NodeId) {
    LIVE_NODES.with(|live| live.set(live.get().saturating_sub(1)));
}

/// Number of node instances currently alive on this thread.
pub fn live_node_count() -> usize {
    LIVE_NODES.with(|live| live.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = allocate_id();
        let b = allocate_id();
        assert_ne!(a, b);
        assert!(b > a);
        release_id(a);
        release_id(b);
    }

    #[test]
    fn test_live_count() {
        let before = live_node_count();
        let id = allocate_id();
        assert_eq!(live_node_count(), before + 1);
        release_id(id);
        assert_eq!(live_node_count(), before);
    }

    #[test]
    fn test_display() {
        let id = allocate_id();
        assert!(id.to_string().starts_with('n'));
        release_id(id);
    }
}
