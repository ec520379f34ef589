//! Input Primitives - Buttons, single-line text inputs and checkboxes.
//!
//! The three interactive node types. Each one is focusable; the runtime
//! drives them through the action functions at the bottom of this module
//! (`click`, `toggle`, `submit`, `insert_char`, `edit_key`, `place_cursor`).
//!
//! # Features
//!
//! - Two-way value binding via Signal (`InputProps::bound`, `CheckboxProps::bound`)
//! - Cursor navigation (left, right, home, end)
//! - Text editing (backspace, delete)
//! - Placeholder text while unfocused and empty
//!
//! # Example
//!
//! ```ignore
//! use spark_grid::primitives::{button, text_input, ButtonProps, InputProps};
//! use spark_grid::reactive::signal;
//!
//! let name = signal(String::new());
//! text_input(InputProps {
//!     placeholder: "Enter your name...".to_string(),
//!     ..InputProps::bound(name.clone())
//! });
//!
//! button(ButtonProps::new("Clear", move || name.set(String::new())));
//! ```

use crate::engine::{Node, NodeKind, TextInputState};
use crate::layout::char_width;
use crate::reactive::untrack;
use crate::state::{window_start, Key, TextEditor};

use super::types::{ButtonProps, CheckboxProps, InputProps};

// =============================================================================
// Builders
// =============================================================================

/// Create a button. Drawn as `[label]`.
pub fn button(props: ButtonProps) -> Node {
    Node::new(
        NodeKind::Button {
            label: props.label,
            on_click: props.on_click,
        },
        props.style,
    )
}

/// Create a single-line text input.
///
/// The cursor starts at the end of the initial value.
pub fn text_input(props: InputProps) -> Node {
    let cursor = untrack(|| props.value.get()).chars().count();
    Node::new(
        NodeKind::TextInput(TextInputState {
            value: props.value,
            on_input: props.on_input,
            on_submit: props.on_submit,
            placeholder: props.placeholder,
            width: props.width,
            cursor,
        }),
        props.style,
    )
}

/// Create a checkbox. Drawn as `[x]` or `[ ]`.
pub fn checkbox(props: CheckboxProps) -> Node {
    Node::new(
        NodeKind::Checkbox {
            checked: props.checked,
            on_change: props.on_change,
        },
        props.style,
    )
}

// =============================================================================
// Actions
// =============================================================================
//
// Handlers are cloned out of the node before they run, so a handler is free
// to rebuild the subtree it lives in.

/// Fire a button's click handler. Returns `true` if the node is a button.
pub(crate) fn click(node: &Node) -> bool {
    let handler = node.with_kind(|kind| match kind {
        NodeKind::Button { on_click, .. } => Some(on_click.clone()),
        _ => None,
    });
    match handler {
        Some(on_click) => {
            if let Some(on_click) = on_click {
                on_click();
            }
            true
        }
        None => false,
    }
}

/// Toggle a checkbox. Returns `true` if the node is a checkbox.
pub(crate) fn toggle(node: &Node) -> bool {
    let props = node.with_kind(|kind| match kind {
        NodeKind::Checkbox { checked, on_change } => Some((checked.clone(), on_change.clone())),
        _ => None,
    });
    let Some((checked, on_change)) = props else {
        return false;
    };
    let next = !untrack(|| checked.get());
    if let Some(on_change) = on_change {
        on_change(next);
    }
    true
}

/// Fire a text input's submit handler with its value.
///
/// Returns `true` if the node is a text input.
pub(crate) fn submit(node: &Node) -> bool {
    let props = node.with_kind(|kind| match kind {
        NodeKind::TextInput(input) => Some((input.value.clone(), input.on_submit.clone())),
        _ => None,
    });
    let Some((value, on_submit)) = props else {
        return false;
    };
    if let Some(on_submit) = on_submit {
        on_submit(untrack(|| value.get()));
    }
    true
}

/// Run `edit` over a text input's value and cursor, then store the cursor
/// and report a changed value through `on_input`.
///
/// Returns `None` if the node is not a text input, otherwise what `edit`
/// returned.
fn with_editor<R>(node: &Node, edit: impl FnOnce(&mut TextEditor) -> R) -> Option<R> {
    let props = node.with_kind(|kind| match kind {
        NodeKind::TextInput(input) => Some((input.value.clone(), input.on_input.clone(), input.cursor)),
        _ => None,
    });
    let (value, on_input, cursor) = props?;

    let before = untrack(|| value.get());
    let mut editor = TextEditor::new(before.clone(), cursor);
    let result = edit(&mut editor);
    let (after, cursor) = editor.into_parts();

    node.with_kind_mut(|kind| {
        if let NodeKind::TextInput(input) = kind {
            input.cursor = cursor;
        }
    });
    if after != before {
        if let Some(on_input) = on_input {
            on_input(after);
        }
    }
    Some(result)
}

/// Insert a typed character at the cursor of a text input.
pub(crate) fn insert_char(node: &Node, ch: char) -> bool {
    with_editor(node, |editor| editor.insert_char(ch)).is_some()
}

/// Apply an editing key to a text input.
///
/// Returns `true` if the key was consumed.
pub(crate) fn edit_key(node: &Node, key: Key) -> bool {
    with_editor(node, |editor| editor.handle_key(key).is_some()).unwrap_or(false)
}

/// Move a text input's cursor to the character under display column `x`.
pub(crate) fn place_cursor(node: &Node, x: u16) -> bool {
    let rect = node.rect();
    let column = i32::from(x) - rect.x;
    with_editor(node, |editor| {
        let start = window_start(editor.text(), editor.cursor(), rect.width);
        let mut width = 0i32;
        let mut index = start;
        for ch in editor.text().chars().skip(start) {
            let next = width + i32::from(char_width(ch));
            if next > column {
                break;
            }
            width = next;
            index += 1;
        }
        editor.move_cursor(index as i32 - editor.cursor() as i32);
    })
    .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::signal;
    use crate::types::Rect;
    use std::cell::Cell;
    use std::rc::Rc;

    fn cursor_of(node: &Node) -> usize {
        node.with_kind(|kind| match kind {
            NodeKind::TextInput(input) => input.cursor,
            _ => usize::MAX,
        })
    }

    #[test]
    fn test_click_fires_handler() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let node = button(ButtonProps::new("Go", move || counter.set(counter.get() + 1)));

        assert!(click(&node));
        assert!(click(&node));
        assert_eq!(clicks.get(), 2);
        assert!(!toggle(&node));
    }

    #[test]
    fn test_toggle_bound_checkbox() {
        let checked = signal(false);
        let node = checkbox(CheckboxProps::bound(checked.clone()));

        assert!(toggle(&node));
        assert!(checked.get());
        assert!(toggle(&node));
        assert!(!checked.get());
        assert!(!click(&node));
    }

    #[test]
    fn test_typing_into_bound_input() {
        let text = signal(String::from("ac"));
        let node = text_input(InputProps::bound(text.clone()));
        assert_eq!(cursor_of(&node), 2);

        assert!(edit_key(&node, Key::Left));
        assert!(insert_char(&node, 'b'));
        assert_eq!(text.get(), "abc");
        assert_eq!(cursor_of(&node), 2);

        assert!(edit_key(&node, Key::Backspace));
        assert_eq!(text.get(), "ac");
        assert!(!edit_key(&node, Key::Tab));
    }

    #[test]
    fn test_submit_passes_value() {
        let submitted = Rc::new(std::cell::RefCell::new(String::new()));
        let sink = submitted.clone();
        let node = text_input(InputProps {
            value: "hello".into(),
            on_submit: Some(Rc::new(move |value: String| *sink.borrow_mut() = value)),
            ..InputProps::default()
        });

        assert!(submit(&node));
        assert_eq!(*submitted.borrow(), "hello");
    }

    #[test]
    fn test_place_cursor() {
        let node = text_input(InputProps {
            value: "hello".into(),
            ..InputProps::default()
        });
        node.set_rect(Rect::new(10, 0, 16, 1));

        assert!(place_cursor(&node, 12));
        assert_eq!(cursor_of(&node), 2);
        assert!(place_cursor(&node, 40));
        assert_eq!(cursor_of(&node), 5);
    }

    #[test]
    fn test_place_cursor_in_scrolled_window() {
        // "abcdefgh" with the cursor at the end shows "fgh" in 4 columns
        let node = text_input(InputProps {
            value: "abcdefgh".into(),
            ..InputProps::default()
        });
        node.set_rect(Rect::new(0, 0, 4, 1));

        assert!(place_cursor(&node, 1));
        assert_eq!(cursor_of(&node), 6);
    }

    #[test]
    fn test_place_cursor_over_wide_characters() {
        let node = text_input(InputProps {
            value: "日本".into(),
            ..InputProps::default()
        });
        node.set_rect(Rect::new(0, 0, 16, 1));

        assert!(place_cursor(&node, 3));
        assert_eq!(cursor_of(&node), 1);
    }
}
