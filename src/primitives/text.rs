//! Text Primitives - Display text and headings.
//!
//! Pure display nodes. Cannot have children.
//!
//! # Reactivity
//!
//! Content can be a static string, signal, or getter. When the content
//! source changes, the display updates automatically.
//!
//! # Example
//!
//! ```ignore
//! use spark_grid::primitives::{derive, heading, text};
//! use spark_grid::reactive::signal;
//!
//! heading(1, "Inventory");
//!
//! let count = signal(0);
//! let reader = count.clone();
//! text(derive(move || format!("Count: {}", reader.get())));
//!
//! // Update count - text updates automatically
//! count.set(42);
//! ```

use crate::engine::{Node, NodeKind};
use crate::types::Style;

use super::types::PropValue;

/// Create a text node.
pub fn text(content: impl Into<PropValue<String>>) -> Node {
    Node::new(NodeKind::Text(content.into()), Style::default())
}

/// Create a heading node. Level 1 is the most prominent.
pub fn heading(level: u8, content: impl Into<PropValue<String>>) -> Node {
    Node::new(
        NodeKind::Heading {
            level: level.max(1),
            content: content.into(),
        },
        Style::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ComponentType;
    use crate::reactive::signal;

    #[test]
    fn test_text_reads_signal() {
        let content = signal(String::from("one"));
        let node = text(content.clone());
        content.set("two".to_string());

        let shown = node.with_kind(|kind| match kind {
            NodeKind::Text(value) => value.get(),
            _ => String::new(),
        });
        assert_eq!(shown, "two");
    }

    #[test]
    fn test_heading_level_floor() {
        let node = heading(0, "title");
        assert_eq!(node.component_type(), ComponentType::Heading);
        let level = node.with_kind(|kind| match kind {
            NodeKind::Heading { level, .. } => *level,
            _ => 0,
        });
        assert_eq!(level, 1);
    }
}
