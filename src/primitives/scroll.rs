//! Scroll Primitive - A fixed viewport over one taller or wider child.
//!
//! The viewport size comes from [`ScrollProps`]; the child is laid out
//! unconstrained and shifted by the scroll offset. The runtime scrolls the
//! innermost container under the pointer on wheel events; the functions
//! below scroll programmatically. Offsets are clamped to the range computed
//! by the last layout pass.

use crate::engine::{Node, NodeKind};
use crate::state::ScrollState;
use crate::types::Style;

use super::types::ScrollProps;

/// Create a scroll container around `child`.
pub fn scroll(props: ScrollProps, child: Node) -> Node {
    let style = Style {
        width: Some(props.width),
        height: Some(props.height),
        ..props.style
    };
    let node = Node::new(NodeKind::Scroll(ScrollState::new(props.show_scrollbar)), style);
    node.append_child(child);
    node
}

/// Scroll state of a scroll container, `None` for other nodes.
pub fn scroll_state(node: &Node) -> Option<ScrollState> {
    node.with_kind(|kind| match kind {
        NodeKind::Scroll(state) => Some(*state),
        _ => None,
    })
}

/// Scroll a container by a delta, clamped.
///
/// Returns `true` if the offset changed.
pub fn scroll_by(node: &Node, delta_x: i32, delta_y: i32) -> bool {
    node.with_kind_mut(|kind| match kind {
        NodeKind::Scroll(state) => state.scroll_by(delta_x, delta_y),
        _ => false,
    })
}

/// Set a container's offset, clamped.
pub fn scroll_to(node: &Node, x: u16, y: u16) {
    node.with_kind_mut(|kind| {
        if let NodeKind::Scroll(state) = kind {
            state.scroll_to(x, y);
        }
    });
}
