//! Tree drawer - paints the laid-out node tree onto a [`Display`].
//!
//! Depth-first, parents before children, so later siblings and children
//! paint over earlier cells. Every write is clipped to the display grid.
//!
//! # Colors
//!
//! A node's own `fg` / `bg` directives win. Otherwise the theme default for
//! the node type applies, and nodes without a default background inherit the
//! nearest ancestor's. The focused node is drawn inverted.
//!
//! # Clipping
//!
//! A node whose origin falls outside an enclosing scroll viewport is not
//! drawn, but its children are still visited: a child can be visible while
//! its parent's origin has scrolled away.

use crate::engine::{ComponentType, Node, NodeId, NodeKind};
use crate::error::Result;
use crate::layout::{char_width, child_clip, origin_visible};
use crate::primitives::PropValue;
use crate::state::scroll::{THUMB_CHAR, TRACK_CHAR};
use crate::state::window_start;
use crate::theme::Theme;
use crate::types::{Attr, Color, Rect};

use super::display::Display;

/// Per-frame drawing inputs.
pub struct DrawContext<'a> {
    pub theme: &'a Theme,
    /// Node holding focus, drawn inverted.
    pub focused: Option<NodeId>,
    /// Cursor blink phase. The input cursor shows while `true`.
    pub blink: bool,
}

/// Colors and attributes of one write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pen {
    fg: Color,
    bg: Color,
    attrs: Attr,
}

/// Clear the display, draw the tree under `root`, flush.
pub fn draw_tree<D: Display + ?Sized>(display: &mut D, root: &Node, ctx: &DrawContext<'_>) -> Result<()> {
    display.clear()?;

    let background = ctx.theme.background;
    if background != Color::Reset {
        let (width, height) = display.size();
        fill_rect(display, Rect::new(0, 0, width, height), background)?;
    }

    draw_node(display, root, ctx, None, background)?;
    display.flush()
}

fn draw_node<D: Display + ?Sized>(
    display: &mut D,
    node: &Node,
    ctx: &DrawContext<'_>,
    clip: Option<Rect>,
    inherited_bg: Color,
) -> Result<()> {
    if !node.is_mounted() {
        return Ok(());
    }

    let rect = node.rect();
    let style = node.style();
    let visible = origin_visible(&rect, clip);
    let component = node.component_type();
    let bg = style.bg.unwrap_or(inherited_bg);

    if visible {
        if component.is_container_like() || component == ComponentType::Scroll {
            if let Some(own_bg) = style.bg {
                fill_rect(display, rect, own_bg)?;
            }
        } else {
            draw_leaf(display, node, ctx, rect, inherited_bg)?;
        }
    }

    let inner = child_clip(node, clip);
    for child in node.children() {
        draw_node(display, &child, ctx, inner, bg)?;
    }

    if visible && component == ComponentType::Scroll {
        draw_scrollbar(display, node, ctx.theme, rect, bg)?;
    }
    Ok(())
}

/// What a leaf shows, read out of the node before calling any getter.
enum LeafContent {
    Text(String),
    Heading(u8, String),
    Button(String),
    Checkbox(bool),
    Input {
        value: String,
        placeholder: String,
        cursor: usize,
    },
}

fn leaf_content(node: &Node) -> Option<LeafContent> {
    enum Props {
        Text(PropValue<String>),
        Heading(u8, PropValue<String>),
        Button(PropValue<String>),
        Checkbox(PropValue<bool>),
        Input(PropValue<String>, String, usize),
    }

    let props = node.with_kind(|kind| match kind {
        NodeKind::Text(content) => Some(Props::Text(content.clone())),
        NodeKind::Heading { level, content } => Some(Props::Heading(*level, content.clone())),
        NodeKind::Button { label, .. } => Some(Props::Button(label.clone())),
        NodeKind::Checkbox { checked, .. } => Some(Props::Checkbox(checked.clone())),
        NodeKind::TextInput(input) => Some(Props::Input(
            input.value.clone(),
            input.placeholder.clone(),
            input.cursor,
        )),
        _ => None,
    })?;

    Some(match props {
        Props::Text(content) => LeafContent::Text(content.get()),
        Props::Heading(level, content) => LeafContent::Heading(level, content.get()),
        Props::Button(label) => LeafContent::Button(label.get()),
        Props::Checkbox(checked) => LeafContent::Checkbox(checked.get()),
        Props::Input(value, placeholder, cursor) => LeafContent::Input {
            value: value.get(),
            placeholder,
            cursor,
        },
    })
}

fn draw_leaf<D: Display + ?Sized>(
    display: &mut D,
    node: &Node,
    ctx: &DrawContext<'_>,
    rect: Rect,
    inherited_bg: Color,
) -> Result<()> {
    let Some(content) = leaf_content(node) else {
        return Ok(());
    };

    let style = node.style();
    let (default_fg, default_bg) = ctx.theme.colors_for(node.component_type());
    let focused = ctx.focused == Some(node.id());
    let mut pen = Pen {
        fg: style.fg.unwrap_or(default_fg),
        bg: style.bg.or(default_bg).unwrap_or(inherited_bg),
        attrs: style.attrs,
    };
    if focused {
        pen.attrs |= Attr::INVERSE;
    }

    match content {
        LeafContent::Text(text) => put_text(display, rect.x, rect.y, &text, pen),
        LeafContent::Heading(level, text) => {
            if style.fg.is_none() {
                pen.fg = ctx.theme.heading(level);
            }
            pen.attrs |= Attr::BOLD;
            put_text(display, rect.x, rect.y, &text, pen)
        }
        LeafContent::Button(label) => put_text(display, rect.x, rect.y, &format!("[{label}]"), pen),
        LeafContent::Checkbox(checked) => {
            let glyph = if checked { "[x]" } else { "[ ]" };
            put_text(display, rect.x, rect.y, glyph, pen)
        }
        LeafContent::Input {
            value,
            placeholder,
            cursor,
        } => draw_input(display, rect, pen, ctx, focused, &value, &placeholder, cursor),
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_input<D: Display + ?Sized>(
    display: &mut D,
    rect: Rect,
    pen: Pen,
    ctx: &DrawContext<'_>,
    focused: bool,
    value: &str,
    placeholder: &str,
    cursor: usize,
) -> Result<()> {
    let width = usize::from(rect.width);
    put_text(display, rect.x, rect.y, &" ".repeat(width), pen)?;

    if !focused && value.is_empty() {
        let muted = Pen {
            fg: ctx.theme.text_muted,
            ..pen
        };
        let shown: String = placeholder.chars().take(width).collect();
        return put_text(display, rect.x, rect.y, &shown, muted);
    }

    // Slide the visible window so the cursor cell stays inside the field
    let cursor = cursor.min(value.chars().count());
    let start = window_start(value, cursor, rect.width);
    let mut used = 0u16;
    let shown: String = value
        .chars()
        .skip(start)
        .take_while(|&ch| {
            used = used.saturating_add(char_width(ch));
            used <= rect.width
        })
        .collect();
    put_text(display, rect.x, rect.y, &shown, pen)?;

    if focused && ctx.blink && width > 0 {
        let under = value.chars().nth(cursor).unwrap_or(' ');
        let cursor_pen = Pen {
            attrs: pen.attrs ^ Attr::INVERSE,
            ..pen
        };
        let offset: i32 = value
            .chars()
            .skip(start)
            .take(cursor - start)
            .map(|ch| i32::from(char_width(ch)))
            .sum();
        put_text(display, rect.x + offset, rect.y, &under.to_string(), cursor_pen)?;
    }
    Ok(())
}

fn draw_scrollbar<D: Display + ?Sized>(
    display: &mut D,
    node: &Node,
    theme: &Theme,
    rect: Rect,
    bg: Color,
) -> Result<()> {
    let state = node.with_kind(|kind| match kind {
        NodeKind::Scroll(state) => Some(*state),
        _ => None,
    });
    let Some(state) = state else {
        return Ok(());
    };
    if !state.show_scrollbar() || !state.overflows_vertically() || rect.width == 0 {
        return Ok(());
    }
    let Some((thumb_offset, thumb_len)) = state.thumb(rect.height) else {
        return Ok(());
    };

    let x = rect.right() - 1;
    for row in 0..rect.height {
        let on_thumb = row >= thumb_offset && row < thumb_offset + thumb_len;
        let (glyph, fg) = if on_thumb {
            (THUMB_CHAR, theme.scrollbar_thumb)
        } else {
            (TRACK_CHAR, theme.scrollbar_track)
        };
        let pen = Pen {
            fg,
            bg,
            attrs: Attr::NONE,
        };
        put_text(display, x, rect.y + i32::from(row), &glyph.to_string(), pen)?;
    }
    Ok(())
}

// =============================================================================
// Clipped primitives
// =============================================================================

/// Fill `rect` with blank cells of color `bg`.
fn fill_rect<D: Display + ?Sized>(display: &mut D, rect: Rect, bg: Color) -> Result<()> {
    let blank = " ".repeat(usize::from(rect.width));
    let pen = Pen {
        fg: Color::Reset,
        bg,
        attrs: Attr::NONE,
    };
    for row in 0..rect.height {
        put_text(display, rect.x, rect.y + i32::from(row), &blank, pen)?;
    }
    Ok(())
}

/// Write `text` starting at `(x, y)`, dropping whatever falls off the grid.
fn put_text<D: Display + ?Sized>(display: &mut D, x: i32, y: i32, text: &str, pen: Pen) -> Result<()> {
    let (width, height) = display.size();
    if y < 0 || y >= i32::from(height) {
        return Ok(());
    }

    let mut column = x;
    let mut start = None;
    let mut shown = String::new();
    for ch in text.chars() {
        let advance = i32::from(char_width(ch));
        if column >= 0 && column + advance <= i32::from(width) {
            start.get_or_insert(column);
            shown.push(ch);
        } else if start.is_some() {
            break;
        }
        column += advance;
    }

    let Some(start) = start else {
        return Ok(());
    };
    display.set_cursor(start as u16, y as u16)?;
    display.set_colors(pen.fg, pen.bg)?;
    display.set_attrs(pen.attrs)?;
    display.write(&shown)
}
