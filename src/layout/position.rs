//! Position pass.
//!
//! Walks top-down from an origin and assigns each node its rect from the
//! size computed by the measure pass. Containers distribute leftover main
//! axis space according to `justify` and place each child on the cross
//! axis according to `align`. A scroll container shifts its child by the
//! current scroll offset, which can push the child's origin above or left
//! of the viewport.

use crate::engine::{ComponentType, Node, NodeKind};
use crate::types::{AlignItems, JustifyContent, Rect, Style};

/// Place `node` at `(x, y)` with its measured size, then its subtree.
pub fn position(node: &Node, x: i32, y: i32) {
    let (width, height) = node.measured();
    let rect = Rect::new(x, y, width, height);
    node.set_rect(rect);

    let component = node.component_type();
    if component == ComponentType::Scroll {
        let offset = node.with_kind(|kind| match kind {
            NodeKind::Scroll(scroll) => scroll.offset(),
            _ => (0, 0),
        });
        if let Some(child) = node.first_child() {
            position(&child, x - i32::from(offset.0), y - i32::from(offset.1));
        }
    } else if component.is_container_like() {
        position_children(node, &node.style(), rect);
    }
}

fn position_children(node: &Node, style: &Style, rect: Rect) {
    let children = node.children();
    if children.is_empty() {
        return;
    }

    let row = style.direction.is_row();
    let (main_size, cross_size) = if row {
        (rect.width, rect.height)
    } else {
        (rect.height, rect.width)
    };

    let sizes: Vec<(u16, u16)> = children
        .iter()
        .map(|child| {
            let (w, h) = child.measured();
            if row { (w, h) } else { (h, w) }
        })
        .collect();

    let count = children.len() as i32;
    let gap = i32::from(style.gap);
    let used: i32 = sizes.iter().map(|(main, _)| i32::from(*main)).sum::<i32>() + gap * (count - 1);
    let remaining = (i32::from(main_size) - used).max(0);

    let mut offset = match style.justify {
        JustifyContent::Start | JustifyContent::SpaceBetween => 0,
        JustifyContent::Center => remaining / 2,
        JustifyContent::End => remaining,
    };

    for (i, (child, (child_main, child_cross))) in children.iter().zip(&sizes).enumerate() {
        let free_cross = (i32::from(cross_size) - i32::from(*child_cross)).max(0);
        let cross_offset = match style.align {
            AlignItems::Start => 0,
            AlignItems::Center => free_cross / 2,
            AlignItems::End => free_cross,
        };

        if row {
            position(child, rect.x + offset, rect.y + cross_offset);
        } else {
            position(child, rect.x + cross_offset, rect.y + offset);
        }

        offset += i32::from(*child_main) + gap;
        if style.justify == JustifyContent::SpaceBetween && count > 1 {
            offset += space_between_share(remaining, count - 1, i as i32);
        }
    }
}

/// Extra space for gap `index` when `remaining` is split over `gaps` gaps.
///
/// The remainder of the division goes to the first gaps.
fn space_between_share(remaining: i32, gaps: i32, index: i32) -> i32 {
    remaining / gaps + i32::from(index < remaining % gaps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;
    use crate::state::ScrollState;
    use crate::types::Dimension;

    fn text(content: &str) -> Node {
        Node::new(NodeKind::Text(content.into()), Style::default())
    }

    fn container(style: Style, children: Vec<Node>) -> Node {
        let node = Node::new(NodeKind::Container, style);
        for child in children {
            node.append_child(child);
        }
        node
    }

    fn fixed_row(justify: JustifyContent, width: u16) -> (Node, Vec<Node>) {
        let children = vec![text("ab"), text("cd"), text("ef")];
        let style = Style {
            justify,
            width: Some(Dimension::Cells(width)),
            ..Style::row()
        };
        (container(style, children.clone()), children)
    }

    fn xs(children: &[Node]) -> Vec<i32> {
        children.iter().map(|c| c.rect().x).collect()
    }

    #[test]
    fn test_justify_start() {
        let (row, children) = fixed_row(JustifyContent::Start, 20);
        compute_layout(&row, 80, 24);
        assert_eq!(xs(&children), vec![0, 3, 6]);
    }

    #[test]
    fn test_justify_center_and_end() {
        let (row, children) = fixed_row(JustifyContent::Center, 20);
        compute_layout(&row, 80, 24);
        // used = 6 + 2 gaps = 8, remaining = 12
        assert_eq!(xs(&children), vec![6, 9, 12]);

        let (row, children) = fixed_row(JustifyContent::End, 20);
        compute_layout(&row, 80, 24);
        assert_eq!(xs(&children), vec![12, 15, 18]);
    }

    #[test]
    fn test_justify_space_between() {
        let (row, children) = fixed_row(JustifyContent::SpaceBetween, 21);
        compute_layout(&row, 80, 24);
        // remaining = 13 over 2 gaps: 7 then 6
        assert_eq!(xs(&children), vec![0, 10, 19]);
    }

    #[test]
    fn test_align_cross_axis() {
        let children = vec![text("a"), text("abcde")];
        let style = Style {
            align: AlignItems::Center,
            ..Style::column()
        };
        let column = container(style, children.clone());
        compute_layout(&column, 80, 24);
        assert_eq!(children[0].rect(), Rect::new(2, 0, 1, 1));
        assert_eq!(children[1].rect(), Rect::new(0, 2, 5, 1));

        let children = vec![text("a"), text("abcde")];
        let style = Style {
            align: AlignItems::End,
            ..Style::column()
        };
        let column = container(style, children.clone());
        compute_layout(&column, 80, 24);
        assert_eq!(children[0].rect().x, 4);
    }

    #[test]
    fn test_nested_origins() {
        let leaf = text("xy");
        let inner = container(Style::row(), vec![text("abc"), leaf.clone()]);
        let outer = container(Style::column(), vec![text("top"), inner]);
        compute_layout(&outer, 80, 24);
        assert_eq!(leaf.rect(), Rect::new(4, 2, 2, 1));
    }

    #[test]
    fn test_scroll_offsets_child() {
        let content = container(Style::column(), (0..10).map(|_| text("line")).collect());
        let style = Style {
            width: Some(Dimension::Cells(10)),
            height: Some(Dimension::Cells(5)),
            ..Style::default()
        };
        let scroll = Node::new(NodeKind::Scroll(ScrollState::new(true)), style);
        scroll.append_child(content.clone());
        let root = container(Style::column(), vec![text("header"), scroll.clone()]);

        compute_layout(&root, 80, 24);
        assert_eq!(scroll.rect(), Rect::new(0, 2, 10, 5));
        assert_eq!(content.rect().y, 2);

        scroll.with_kind_mut(|kind| {
            if let NodeKind::Scroll(state) = kind {
                state.scroll_by(0, 4);
            }
        });
        compute_layout(&root, 80, 24);
        assert_eq!(content.rect().y, -2);
    }
}
