//! Control Flow Primitives - Conditional and list rendering.
//!
//! This module provides control flow primitives for dynamic UI:
//! - [`list`] - one child per element, rebuilt whenever the sequence changes
//! - [`show`] - primary or fallback child depending on a condition
//! - [`switch`] / [`case`] - first matching case, or a fallback
//!
//! # Pattern: Wrapper Node + Effect
//!
//! Every wrapper is a node whose children are owned by one effect:
//! 1. The effect reads the condition / sequence (the only tracked read)
//! 2. It unmounts and discards the current children
//! 3. It builds the new children inside a detached scope, untracked, so
//!    effects created by the builder belong to the child and not to the
//!    wrapper's effect
//! 4. Appending to a mounted wrapper mounts the fresh children
//!
//! The child's cleanup disposes its scope; the wrapper's cleanup disposes
//! the wrapper effect.
//!
//! # Component Lifecycle
//!
//! ## show()
//! - Condition flips: previous child unmounted, fresh branch built
//! - Condition re-evaluates to the same value: current child kept
//!
//! ## list()
//! - Any change to the sequence: every child unmounted, fresh children built.
//!   No identity is preserved between runs.

use std::rc::Rc;

use crate::engine::{Node, NodeKind};
use crate::reactive::{create_effect, create_scope, signal, untrack, ReadSignal};
use crate::types::Style;

use super::types::PropValue;

/// Build a child in its own detached scope, untracked.
///
/// The scope is disposed when the child unmounts.
fn render_owned(render: impl FnOnce() -> Node) -> Node {
    let (child, scope) = create_scope(|| untrack(render));
    child.on_cleanup(move || scope.dispose());
    child
}

// =============================================================================
// list() - Full remount list rendering
// =============================================================================

/// Render one child per element of `each`.
///
/// `render` receives the element and an index accessor. Every change to the
/// sequence discards all children and renders fresh ones.
///
/// # Example
///
/// ```ignore
/// use spark_grid::primitives::{list, text};
/// use spark_grid::reactive::signal;
///
/// let items = signal(vec!["iron", "gold"]);
/// list(items.clone(), |item, index| {
///     text(format!("{}: {item}", index.get()))
/// });
///
/// items.update(|v| v.push("silver")); // three fresh children
/// ```
pub fn list<T, R>(each: impl Into<PropValue<Vec<T>>>, render: R) -> Node
where
    T: Clone + 'static,
    R: Fn(T, ReadSignal<usize>) -> Node + 'static,
{
    let node = Node::new(NodeKind::List, Style::default());
    let each = each.into();
    let wrapper = node.downgrade();

    let effect = create_effect(move || {
        let items = each.get();
        let Some(node) = wrapper.upgrade() else {
            return;
        };

        node.clear_children();
        let count = items.len();
        for (index, item) in items.into_iter().enumerate() {
            let position = signal(index).read_only();
            node.append_child(render_owned(|| render(item, position)));
        }
        tracing::debug!(target: "spark_grid::primitives", node = %node.id(), count, "list rebuilt");
    });
    node.on_cleanup(move || effect.dispose());
    node
}

// =============================================================================
// show() - Conditional rendering
// =============================================================================

/// Render `primary` while `when` is true, otherwise `fallback` (if any).
///
/// Both branches are factories: a fresh instance is built each time a branch
/// becomes active.
///
/// # Example
///
/// ```ignore
/// use spark_grid::primitives::{show, text};
///
/// let visible = signal(true);
/// show(visible.clone(), || text("Visible!"), Some(|| text("Hidden")));
///
/// // Without a fallback
/// show(visible, || text("Visible!"), None::<fn() -> Node>);
/// ```
pub fn show<P, F>(when: impl Into<PropValue<bool>>, primary: P, fallback: Option<F>) -> Node
where
    P: Fn() -> Node + 'static,
    F: Fn() -> Node + 'static,
{
    let node = Node::new(NodeKind::Show, Style::default());
    let when = when.into();
    let wrapper = node.downgrade();
    let mut shown: Option<bool> = None;

    let effect = create_effect(move || {
        let visible = when.get();
        // Skip if condition unchanged
        if shown == Some(visible) {
            return;
        }
        shown = Some(visible);

        let Some(node) = wrapper.upgrade() else {
            return;
        };
        node.clear_children();
        if visible {
            node.append_child(render_owned(&primary));
        } else if let Some(fallback) = &fallback {
            node.append_child(render_owned(fallback));
        }
        tracing::debug!(target: "spark_grid::primitives", node = %node.id(), visible, "show branch");
    });
    node.on_cleanup(move || effect.dispose());
    node
}

// =============================================================================
// switch() / case() - Multi-way conditional rendering
// =============================================================================

/// One arm of a [`switch`].
pub struct Case {
    when: PropValue<bool>,
    render: Rc<dyn Fn() -> Node>,
}

/// Create a switch arm rendered by `render` while `when` is true.
pub fn case(when: impl Into<PropValue<bool>>, render: impl Fn() -> Node + 'static) -> Case {
    Case {
        when: when.into(),
        render: Rc::new(render),
    }
}

/// Render the first case whose condition holds, or `fallback` if none does.
///
/// The chosen case is wrapped in a fresh `Case` node. A re-run that picks
/// the same case keeps the current child.
pub fn switch<F>(cases: Vec<Case>, fallback: Option<F>) -> Node
where
    F: Fn() -> Node + 'static,
{
    let node = Node::new(NodeKind::Switch, Style::default());
    let wrapper = node.downgrade();
    // None until the first run, then the chosen arm (None = fallback)
    let mut selected: Option<Option<usize>> = None;

    let effect = create_effect(move || {
        let choice = cases.iter().position(|arm| arm.when.get());
        if selected == Some(choice) {
            return;
        }
        selected = Some(choice);

        let Some(node) = wrapper.upgrade() else {
            return;
        };
        node.clear_children();
        match choice {
            Some(index) => {
                let render = cases[index].render.clone();
                let arm = Node::new(NodeKind::Case, Style::default());
                arm.append_child(render_owned(move || render()));
                node.append_child(arm);
            }
            None => {
                if let Some(fallback) = &fallback {
                    node.append_child(render_owned(fallback));
                }
            }
        }
        tracing::debug!(target: "spark_grid::primitives", node = %node.id(), ?choice, "switch case");
    });
    node.on_cleanup(move || effect.dispose());
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{live_node_count, ComponentType};
    use crate::primitives::text;
    use crate::reactive::create_effect;
    use std::cell::{Cell, RefCell};

    fn texts(node: &Node) -> Vec<String> {
        node.children()
            .iter()
            .map(|child| {
                child.with_kind(|kind| match kind {
                    NodeKind::Text(content) => content.get(),
                    _ => String::new(),
                })
            })
            .collect()
    }

    #[test]
    fn test_list_rebuilds_fresh_children() {
        let items = signal(vec![1, 2, 3]);
        let renders = Rc::new(Cell::new(0));
        let counter = renders.clone();
        let node = list(items.clone(), move |item: i32, index| {
            counter.set(counter.get() + 1);
            text(format!("{}:{item}", index.get()))
        });
        node.mount();

        assert_eq!(texts(&node), vec!["0:1", "1:2", "2:3"]);
        let first_ids: Vec<_> = node.children().iter().map(Node::id).collect();

        items.update(|v| v.push(4));
        assert_eq!(texts(&node), vec!["0:1", "1:2", "2:3", "3:4"]);
        assert_eq!(renders.get(), 7);

        let second_ids: Vec<_> = node.children().iter().map(Node::id).collect();
        assert!(second_ids.iter().all(|id| !first_ids.contains(id)));
        assert!(node.children().iter().all(Node::is_mounted));
    }

    #[test]
    fn test_list_frees_discarded_children() {
        let items = signal(vec![1, 2, 3]);
        let node = list(items.clone(), |item: i32, _| text(item.to_string()));
        node.mount();

        let before = live_node_count();
        items.set(vec![9]);
        assert_eq!(live_node_count(), before - 2);
    }

    #[test]
    fn test_show_toggles_with_cleanups() {
        let visible = signal(true);
        let cleanups = Rc::new(RefCell::new(Vec::new()));

        let log = cleanups.clone();
        let primary = move || {
            let node = text("primary");
            let log = log.clone();
            node.on_cleanup(move || log.borrow_mut().push("primary"));
            node
        };
        let log = cleanups.clone();
        let fallback = move || {
            let node = text("fallback");
            let log = log.clone();
            node.on_cleanup(move || log.borrow_mut().push("fallback"));
            node
        };

        let node = show(visible.clone(), primary, Some(fallback));
        node.mount();
        assert_eq!(texts(&node), vec!["primary"]);

        visible.set(false);
        assert_eq!(texts(&node), vec!["fallback"]);
        assert_eq!(*cleanups.borrow(), vec!["primary"]);

        visible.set(true);
        assert_eq!(texts(&node), vec!["primary"]);
        assert_eq!(*cleanups.borrow(), vec!["primary", "fallback"]);

        node.unmount();
        assert_eq!(*cleanups.borrow(), vec!["primary", "fallback", "primary"]);
    }

    #[test]
    fn test_show_keeps_child_when_condition_unchanged() {
        let count = signal(1);
        let reader = count.clone();
        let node = show(
            crate::primitives::derive(move || reader.get() > 0),
            || text("positive"),
            None::<fn() -> Node>,
        );
        node.mount();
        let first = node.first_child().map(|n| n.id());

        count.set(5);
        assert_eq!(node.first_child().map(|n| n.id()), first);

        count.set(-1);
        assert_eq!(node.child_count(), 0);
    }

    #[test]
    fn test_child_effects_disposed_with_child() {
        let visible = signal(true);
        let source = signal(0);
        let runs = Rc::new(Cell::new(0));

        let (reader, counter) = (source.clone(), runs.clone());
        let node = show(
            visible.clone(),
            move || {
                let (reader, counter) = (reader.clone(), counter.clone());
                create_effect(move || {
                    reader.get();
                    counter.set(counter.get() + 1);
                });
                text("child")
            },
            None::<fn() -> Node>,
        );
        node.mount();
        assert_eq!(runs.get(), 1);

        source.set(1);
        assert_eq!(runs.get(), 2);

        visible.set(false);
        source.set(2);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_switch_picks_first_match() {
        let mode = signal(0);
        let (a, b) = (mode.clone(), mode.clone());
        let node = switch(
            vec![
                case(crate::primitives::derive(move || a.get() == 1), || text("one")),
                case(crate::primitives::derive(move || b.get() >= 1), || text("many")),
            ],
            Some(|| text("none")),
        );
        node.mount();
        assert_eq!(texts(&node), vec!["none"]);

        mode.set(1);
        let arm = node.first_child();
        assert!(arm.as_ref().is_some_and(|n| n.component_type() == ComponentType::Case));
        assert_eq!(arm.map(|n| texts(&n)), Some(vec!["one".to_string()]));

        mode.set(3);
        assert_eq!(node.first_child().map(|n| texts(&n)), Some(vec!["many".to_string()]));

        mode.set(0);
        assert_eq!(texts(&node), vec!["none"]);
    }
}
