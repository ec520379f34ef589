//! Measure pass.
//!
//! Computes every node's size bottom-up. Each node receives the space its
//! parent can offer (`None` on an axis means unconstrained, as inside a
//! scroll container) and the display size for `FillDisplay`.
//!
//! Natural sizes:
//! - text / heading: `(display width, 1)`
//! - button: `(label width + 2, 1)` for the surrounding brackets
//! - checkbox: `(3, 1)`
//! - text input: `(explicit width or DEFAULT_INPUT_WIDTH, 1)`
//! - containers and wrappers: main axis is the sum of the children plus the
//!   gap between each pair, cross axis is the largest child
//!
//! Explicit `width` / `height` directives override the natural size.

use crate::engine::{ComponentType, Node, NodeKind};
use crate::types::{Dimension, Style};

use super::text_measure::string_width;

/// Width of a text input without an explicit width.
pub const DEFAULT_INPUT_WIDTH: u16 = 16;

/// Space offered along each axis. `None` means unconstrained.
pub type Space = (Option<u16>, Option<u16>);

/// Resolve an explicit size directive.
///
/// `FillParent` under unconstrained space resolves to `None` so the natural
/// size is used instead.
fn resolve(dim: Option<Dimension>, available: Option<u16>, display: u16) -> Option<u16> {
    match dim? {
        Dimension::Cells(n) => Some(n),
        Dimension::FillParent => available,
        Dimension::FillDisplay => Some(display),
    }
}

/// Measure `node` and its subtree, storing each size on the node.
pub fn measure(node: &Node, space: Space, display: (u16, u16)) -> (u16, u16) {
    let style = node.style();
    let own_w = resolve(style.width, space.0, display.0);
    let own_h = resolve(style.height, space.1, display.1);

    let natural = match node.component_type() {
        ComponentType::Text | ComponentType::Heading => {
            let content = node.with_kind(|kind| match kind {
                NodeKind::Text(content) | NodeKind::Heading { content, .. } => Some(content.clone()),
                _ => None,
            });
            (content.map_or(0, |c| string_width(&c.get())), 1)
        }
        ComponentType::Button => {
            let label = node.with_kind(|kind| match kind {
                NodeKind::Button { label, .. } => Some(label.clone()),
                _ => None,
            });
            let width = label.map_or(0, |l| string_width(&l.get()));
            (width.saturating_add(2), 1)
        }
        ComponentType::Checkbox => (3, 1),
        ComponentType::TextInput => {
            let width = node.with_kind(|kind| match kind {
                NodeKind::TextInput(input) => input.width,
                _ => None,
            });
            (width.unwrap_or(DEFAULT_INPUT_WIDTH), 1)
        }
        ComponentType::Scroll => {
            let content = match node.first_child() {
                Some(child) => measure(&child, (None, None), display),
                None => (0, 0),
            };
            let viewport = (own_w.unwrap_or(content.0), own_h.unwrap_or(content.1));
            node.with_kind_mut(|kind| {
                if let NodeKind::Scroll(scroll) = kind {
                    scroll.set_sizes(content, viewport);
                }
            });
            node.set_measured(viewport);
            return viewport;
        }
        ComponentType::Container
        | ComponentType::Fragment
        | ComponentType::List
        | ComponentType::Show
        | ComponentType::Switch
        | ComponentType::Case => {
            let inner = (own_w.or(space.0), own_h.or(space.1));
            measure_children(node, &style, inner, display)
        }
    };

    let size = (own_w.unwrap_or(natural.0), own_h.unwrap_or(natural.1));
    node.set_measured(size);
    size
}

/// Natural size of a container from its children.
fn measure_children(node: &Node, style: &Style, space: Space, display: (u16, u16)) -> (u16, u16) {
    let children = node.children();
    if children.is_empty() {
        return (0, 0);
    }

    let row = style.direction.is_row();
    let gaps = u32::from(style.gap) * (children.len() as u32 - 1);
    let mut main = gaps;
    let mut cross = 0u16;

    for child in &children {
        let (w, h) = measure(child, space, display);
        let (child_main, child_cross) = if row { (w, h) } else { (h, w) };
        main += u32::from(child_main);
        cross = cross.max(child_cross);
    }

    let main = main.min(u32::from(u16::MAX)) as u16;
    if row { (main, cross) } else { (cross, main) }
}
