//! Focus management.
//!
//! Tracks which interactive node (button, text input, checkbox) holds focus
//! and moves focus in tree pre-order for Tab / BackTab navigation. The focus
//! slot holds a weak handle, so a node that gets unmounted and dropped by a
//! control-flow wrapper simply stops being focused.

use crate::engine::{Node, NodeId, WeakNode};

// =============================================================================
// Focus State
// =============================================================================

/// Focus management state.
#[derive(Default)]
pub struct FocusManager {
    focused: Option<WeakNode>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently focused node, if it is still alive and mounted.
    pub fn focused(&self) -> Option<Node> {
        self.focused
            .as_ref()
            .and_then(WeakNode::upgrade)
            .filter(Node::is_mounted)
    }

    /// Id of the focused node.
    pub fn focused_id(&self) -> Option<NodeId> {
        self.focused().map(|node| node.id())
    }

    /// Check if `node` is the focused node.
    pub fn is_focused(&self, node: &Node) -> bool {
        self.focused().is_some_and(|focused| focused.ptr_eq(node))
    }

    /// Focus a specific node.
    ///
    /// Ignored unless the node is interactive and mounted.
    pub fn focus(&mut self, node: &Node) {
        if !node.is_interactive() || !node.is_mounted() {
            return;
        }
        tracing::debug!(target: "spark_grid::state", node = %node.id(), "focus");
        self.focused = Some(node.downgrade());
    }

    /// Clear focus.
    pub fn blur(&mut self) {
        if self.focused.take().is_some() {
            tracing::debug!(target: "spark_grid::state", "blur");
        }
    }

    /// Focus the next focusable node after the current one (wraps around).
    pub fn focus_next(&mut self, root: &Node) {
        let focusables = focusable_nodes(root);
        if focusables.is_empty() {
            return;
        }

        let next = match self.position_in(&focusables) {
            Some(i) => &focusables[(i + 1) % focusables.len()],
            None => &focusables[0],
        };
        self.focus(next);
    }

    /// Focus the previous focusable node before the current one (wraps around).
    pub fn focus_previous(&mut self, root: &Node) {
        let focusables = focusable_nodes(root);
        let Some(last) = focusables.last() else {
            return;
        };

        let prev = match self.position_in(&focusables) {
            Some(0) | None => last,
            Some(i) => &focusables[i - 1],
        };
        self.focus(prev);
    }

    fn position_in(&self, focusables: &[Node]) -> Option<usize> {
        let current = self.focused()?;
        focusables.iter().position(|node| node.ptr_eq(&current))
    }
}

/// Every mounted interactive node under `root`, in pre-order.
pub fn focusable_nodes(root: &Node) -> Vec<Node> {
    let mut out = Vec::new();
    collect_focusable(root, &mut out);
    out
}

fn collect_focusable(node: &Node, out: &mut Vec<Node>) {
    if !node.is_mounted() {
        return;
    }
    if node.is_interactive() {
        out.push(node.clone());
    }
    for child in node.children() {
        collect_focusable(&child, out);
    }
}
