//! Layout Module
//!
//! Two-pass layout over the node tree for a character grid.
//!
//! # Algorithm
//!
//! 1. **Measure** (bottom-up): natural size per node type, overridden by
//!    explicit `width` / `height` directives. Scroll containers measure their
//!    child unconstrained and record content and viewport sizes.
//! 2. **Position** (top-down): origins from `direction`, `justify`, `align`
//!    and `gap`. Scroll containers offset their child by the scroll position.
//!
//! # Reactivity
//!
//! Prop values are read with tracking, so running the layout inside the
//! runtime's render tracker subscribes it to every signal the layout reads.
//!
//! # Clipping
//!
//! Clipping is all-or-nothing per node origin: a node is drawn (and can be
//! hit) only if its origin lies inside the viewport of every enclosing
//! scroll container.

mod measure;
mod position;
mod text_measure;

pub use measure::{measure, Space, DEFAULT_INPUT_WIDTH};
pub use position::position;
pub use text_measure::*;

use crate::engine::{ComponentType, Node};
use crate::types::Rect;

/// Lay out the tree under `root` for a display of `width` x `height` cells.
pub fn compute_layout(root: &Node, width: u16, height: u16) {
    let size = measure(root, (Some(width), Some(height)), (width, height));
    position(root, 0, 0);
    tracing::debug!(
        target: "spark_grid::layout",
        width,
        height,
        root_width = size.0,
        root_height = size.1,
        "layout pass"
    );
}

/// Clip rect that applies to the children of `node`.
///
/// Scroll containers narrow the clip to their viewport. Everything else
/// passes the incoming clip through.
pub fn child_clip(node: &Node, clip: Option<Rect>) -> Option<Rect> {
    if node.component_type() != ComponentType::Scroll {
        return clip;
    }
    let viewport = node.rect();
    Some(clip.map_or(viewport, |outer| outer.intersect(&viewport)))
}

/// Check if a node at `rect` survives origin clipping.
pub fn origin_visible(rect: &Rect, clip: Option<Rect>) -> bool {
    clip.is_none_or(|clip| clip.contains(rect.x, rect.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_visible() {
        let clip = Some(Rect::new(0, 2, 10, 3));
        assert!(origin_visible(&Rect::new(0, 2, 4, 1), clip));
        assert!(origin_visible(&Rect::new(3, 4, 40, 9), clip));
        assert!(!origin_visible(&Rect::new(0, 1, 4, 5), clip));
        assert!(!origin_visible(&Rect::new(0, 5, 4, 1), clip));
        assert!(origin_visible(&Rect::new(-5, -5, 1, 1), None));
    }
}
