//! Container Primitives - Nodes that lay out children along a main axis.
//!
//! - [`container`] - children with explicit style directives
//! - [`row`] / [`column`] - shorthands for the two directions
//! - [`fragment`] - plain grouping with default style
//!
//! # Example
//!
//! ```ignore
//! use spark_grid::primitives::{container, text, ContainerProps};
//! use spark_grid::types::{Style, JustifyContent, Dimension};
//!
//! container(ContainerProps {
//!     style: Style {
//!         justify: JustifyContent::Center,
//!         width: Some(Dimension::FillDisplay),
//!         ..Style::row()
//!     },
//!     children: vec![text("left"), text("right")],
//! });
//! ```

use crate::engine::{Node, NodeKind};
use crate::types::Style;

use super::types::ContainerProps;

// =============================================================================
// Container Component
// =============================================================================

/// Create a container.
pub fn container(props: ContainerProps) -> Node {
    with_children(Node::new(NodeKind::Container, props.style), props.children)
}

/// Horizontal container with default spacing.
pub fn row(children: Vec<Node>) -> Node {
    container(ContainerProps {
        style: Style::row(),
        children,
    })
}

/// Vertical container with default spacing.
pub fn column(children: Vec<Node>) -> Node {
    container(ContainerProps {
        style: Style::column(),
        children,
    })
}

/// Group children without a container of their own.
pub fn fragment(children: Vec<Node>) -> Node {
    with_children(Node::new(NodeKind::Fragment, Style::default()), children)
}

fn with_children(node: Node, children: Vec<Node>) -> Node {
    for child in children {
        node.append_child(child);
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ComponentType;
    use crate::primitives::text;
    use crate::types::FlexDirection;

    #[test]
    fn test_row_and_column() {
        let r = row(vec![text("a"), text("b")]);
        assert_eq!(r.component_type(), ComponentType::Container);
        assert_eq!(r.style().direction, FlexDirection::Row);
        assert_eq!(r.child_count(), 2);

        let c = column(vec![text("a")]);
        assert_eq!(c.style().direction, FlexDirection::Column);
    }

    #[test]
    fn test_children_keep_order_and_parent() {
        let first = text("first");
        let second = text("second");
        let parent = column(vec![first.clone(), second.clone()]);

        let children = parent.children();
        assert!(children[0].ptr_eq(&first));
        assert!(children[1].ptr_eq(&second));
        assert!(second.parent().is_some_and(|p| p.ptr_eq(&parent)));
    }

    #[test]
    fn test_fragment() {
        let group = fragment(vec![text("x")]);
        assert_eq!(group.component_type(), ComponentType::Fragment);
        assert_eq!(group.child_count(), 1);
    }
}
