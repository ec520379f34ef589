//! Mouse Module - pointer types and hit testing.
//!
//! Hit testing walks the tree depth-first with children before their parent,
//! so the innermost node under the pointer wins. A node whose origin is
//! clipped away by a scroll container is never hit, but its children are
//! still considered, matching what the renderer draws.

use crate::engine::{ComponentType, Node};
use crate::layout::{child_clip, origin_visible};
use crate::types::Rect;

// =============================================================================
// TYPES
// =============================================================================

/// Mouse button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
}

/// Wheel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Vertical delta for one notch of `step` lines.
    pub fn delta(&self, step: u16) -> i32 {
        match self {
            Self::Up => -i32::from(step),
            Self::Down => i32::from(step),
        }
    }
}

// =============================================================================
// HIT TESTING
// =============================================================================

/// Innermost interactive node under `(x, y)`.
pub fn hit_test(root: &Node, x: u16, y: u16) -> Option<Node> {
    find_at(root, i32::from(x), i32::from(y), None, &Node::is_interactive)
}

/// Innermost scroll container under `(x, y)`.
pub fn scroll_container_at(root: &Node, x: u16, y: u16) -> Option<Node> {
    find_at(root, i32::from(x), i32::from(y), None, &|node: &Node| {
        node.component_type() == ComponentType::Scroll
    })
}

fn find_at(
    node: &Node,
    x: i32,
    y: i32,
    clip: Option<Rect>,
    accept: &dyn Fn(&Node) -> bool,
) -> Option<Node> {
    if !node.is_mounted() {
        return None;
    }

    let inner = child_clip(node, clip);
    for child in node.children().iter().rev() {
        if let Some(hit) = find_at(child, x, y, inner, accept) {
            return Some(hit);
        }
    }

    let rect = node.rect();
    (accept(node) && origin_visible(&rect, clip) && rect.contains(x, y)).then(|| node.clone())
}
