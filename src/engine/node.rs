//! Node - one element of the declarative UI tree.
//!
//! A node owns its children (`Vec<Node>`) and points at its parent through a
//! `Weak`, so the tree has no ownership cycles. Everything the layout and
//! render passes need lives on the node: the typed props in [`NodeKind`],
//! the style directives, and the rect computed by the last layout pass.
//!
//! # Lifecycle
//!
//! ```text
//! created ──mount()──▶ mounted ──unmount()──▶ unmounted (terminal)
//!    └─────────────────unmount()──────────────────┘
//! ```
//!
//! `mount()` is idempotent and never revives an unmounted node.
//! `unmount()` unmounts the children first, then runs this node's cleanup
//! callbacks, exactly once.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::primitives::{Callback, Cleanup, PropValue, ValueCallback};
use crate::state::scroll::ScrollState;
use crate::types::{Rect, Style};

use super::registry::{allocate_id, release_id, NodeId};

// =============================================================================
// Component Types
// =============================================================================

/// Tag of a node, without its props.
///
/// Cheap to copy out of a node for matching without holding a borrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Container,
    Fragment,
    Text,
    Heading,
    Button,
    TextInput,
    Checkbox,
    List,
    Show,
    Switch,
    Case,
    Scroll,
}

impl ComponentType {
    /// Nodes that can hold focus.
    pub const fn is_interactive(&self) -> bool {
        matches!(self, Self::Button | Self::TextInput | Self::Checkbox)
    }

    /// Nodes that lay out their children like a container.
    pub const fn is_container_like(&self) -> bool {
        matches!(
            self,
            Self::Container | Self::Fragment | Self::List | Self::Show | Self::Switch | Self::Case
        )
    }
}

// =============================================================================
// Node Kind - typed props per component type
// =============================================================================

/// State of a single-line text input.
pub struct TextInputState {
    pub value: PropValue<String>,
    pub on_input: Option<ValueCallback<String>>,
    pub on_submit: Option<ValueCallback<String>>,
    pub placeholder: String,
    pub width: Option<u16>,
    /// Cursor offset in characters. Clamped to the value length when used.
    pub cursor: usize,
}

/// The closed set of node types with their props.
pub enum NodeKind {
    Container,
    Fragment,
    Text(PropValue<String>),
    Heading {
        level: u8,
        content: PropValue<String>,
    },
    Button {
        label: PropValue<String>,
        on_click: Option<Callback>,
    },
    TextInput(TextInputState),
    Checkbox {
        checked: PropValue<bool>,
        on_change: Option<ValueCallback<bool>>,
    },
    List,
    Show,
    Switch,
    Case,
    Scroll(ScrollState),
}

impl NodeKind {
    /// The tag of this kind.
    pub fn component_type(&self) -> ComponentType {
        match self {
            NodeKind::Container => ComponentType::Container,
            NodeKind::Fragment => ComponentType::Fragment,
            NodeKind::Text(_) => ComponentType::Text,
            NodeKind::Heading { .. } => ComponentType::Heading,
            NodeKind::Button { .. } => ComponentType::Button,
            NodeKind::TextInput(_) => ComponentType::TextInput,
            NodeKind::Checkbox { .. } => ComponentType::Checkbox,
            NodeKind::List => ComponentType::List,
            NodeKind::Show => ComponentType::Show,
            NodeKind::Switch => ComponentType::Switch,
            NodeKind::Case => ComponentType::Case,
            NodeKind::Scroll(_) => ComponentType::Scroll,
        }
    }
}

// =============================================================================
// Lifecycle Flags
// =============================================================================

bitflags::bitflags! {
    /// Lifecycle state of a node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NodeFlags: u8 {
        const MOUNTED = 1 << 0;
        const UNMOUNTED = 1 << 1;
    }
}

// =============================================================================
// Node
// =============================================================================

struct NodeData {
    id: NodeId,
    kind: NodeKind,
    style: Style,
    children: Vec<Node>,
    parent: Weak<RefCell<NodeData>>,
    rect: Rect,
    measured: (u16, u16),
    flags: NodeFlags,
    cleanups: Vec<Cleanup>,
}

impl Drop for NodeData {
    fn drop(&mut self) {
        release_id(self.id);
    }
}

/// Shared handle to a node.
///
/// Cloning the handle does not clone the node. The parent's `children`
/// vector is the owning reference; other handles (focus, event dispatch)
/// should hold a [`WeakNode`].
#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeData>>);

/// Non-owning handle to a node.
#[derive(Clone, Default)]
pub struct WeakNode(Weak<RefCell<NodeData>>);

impl WeakNode {
    /// Get the node if it is still alive.
    pub fn upgrade(&self) -> Option<Node> {
        self.0.upgrade().map(Node)
    }
}

impl Node {
    /// Create a detached, unmounted node.
    pub fn new(kind: NodeKind, style: Style) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            id: allocate_id(),
            kind,
            style,
            children: Vec::new(),
            parent: Weak::new(),
            rect: Rect::default(),
            measured: (0, 0),
            flags: NodeFlags::empty(),
            cleanups: Vec::new(),
        })))
    }

    /// Unique id of this instance.
    pub fn id(&self) -> NodeId {
        self.0.borrow().id
    }

    /// Type tag.
    pub fn component_type(&self) -> ComponentType {
        self.0.borrow().kind.component_type()
    }

    /// Check if this node can hold focus.
    pub fn is_interactive(&self) -> bool {
        self.component_type().is_interactive()
    }

    /// Borrow the typed props.
    ///
    /// Do not call user callbacks from inside `f`: clone them out first.
    pub fn with_kind<R>(&self, f: impl FnOnce(&NodeKind) -> R) -> R {
        f(&self.0.borrow().kind)
    }

    /// Mutably borrow the typed props.
    pub fn with_kind_mut<R>(&self, f: impl FnOnce(&mut NodeKind) -> R) -> R {
        f(&mut self.0.borrow_mut().kind)
    }

    /// Style directives.
    pub fn style(&self) -> Style {
        self.0.borrow().style
    }

    /// Replace the style directives.
    pub fn set_style(&self, style: Style) {
        self.0.borrow_mut().style = style;
    }

    /// Builder form of [`Node::set_style`].
    pub fn styled(self, style: Style) -> Self {
        self.set_style(style);
        self
    }

    // =========================================================================
    // Tree structure
    // =========================================================================

    /// Snapshot of the children.
    ///
    /// Returned by value so callers can recurse without holding a borrow.
    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    /// Number of children.
    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    /// First child, if any.
    pub fn first_child(&self) -> Option<Node> {
        self.0.borrow().children.first().cloned()
    }

    /// Parent node, if attached and still alive.
    pub fn parent(&self) -> Option<Node> {
        self.0.borrow().parent.upgrade().map(Node)
    }

    /// Non-owning handle.
    pub fn downgrade(&self) -> WeakNode {
        WeakNode(Rc::downgrade(&self.0))
    }

    /// Check if two handles refer to the same instance.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Attach `child` as the last child.
    ///
    /// The child is mounted right away if this node is mounted.
    pub fn append_child(&self, child: Node) {
        debug_assert!(
            child.parent().is_none(),
            "node {} already has a parent",
            child.id()
        );
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        let mounted = {
            let mut data = self.0.borrow_mut();
            data.children.push(child.clone());
            data.flags.contains(NodeFlags::MOUNTED)
        };
        if mounted {
            child.mount();
        }
    }

    /// Unmount and drop every child.
    pub fn clear_children(&self) {
        let children = std::mem::take(&mut self.0.borrow_mut().children);
        for child in &children {
            child.unmount();
        }
        // Dropped here, after every cleanup ran
        drop(children);
    }

    /// Walk ancestors from the parent up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = Node> {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Rect computed by the last layout pass.
    pub fn rect(&self) -> Rect {
        self.0.borrow().rect
    }

    pub(crate) fn set_rect(&self, rect: Rect) {
        self.0.borrow_mut().rect = rect;
    }

    /// Size computed by the last measure pass.
    pub fn measured(&self) -> (u16, u16) {
        self.0.borrow().measured
    }

    pub(crate) fn set_measured(&self, size: (u16, u16)) {
        self.0.borrow_mut().measured = size;
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Check if the node is mounted.
    pub fn is_mounted(&self) -> bool {
        self.0.borrow().flags.contains(NodeFlags::MOUNTED)
    }

    /// Check if the node has been unmounted (terminal).
    pub fn is_unmounted(&self) -> bool {
        self.0.borrow().flags.contains(NodeFlags::UNMOUNTED)
    }

    /// Mount this node and its subtree.
    ///
    /// No-op if already mounted or if the node was unmounted before.
    pub fn mount(&self) {
        let children = {
            let mut data = self.0.borrow_mut();
            if data.flags.intersects(NodeFlags::MOUNTED | NodeFlags::UNMOUNTED) {
                return;
            }
            data.flags.insert(NodeFlags::MOUNTED);
            data.children.clone()
        };
        for child in children {
            child.mount();
        }
    }

    /// Unmount this node and its subtree.
    ///
    /// Children are unmounted first, then this node's cleanup callbacks run.
    /// Only the first call does anything.
    pub fn unmount(&self) {
        let children = {
            let mut data = self.0.borrow_mut();
            if data.flags.contains(NodeFlags::UNMOUNTED) {
                return;
            }
            data.flags.remove(NodeFlags::MOUNTED);
            data.flags.insert(NodeFlags::UNMOUNTED);
            data.children.clone()
        };
        for child in children {
            child.unmount();
        }

        let cleanups = std::mem::take(&mut self.0.borrow_mut().cleanups);
        for cleanup in cleanups {
            cleanup();
        }
    }

    /// Register a callback to run when this node unmounts.
    ///
    /// Runs immediately if the node is already unmounted.
    pub fn on_cleanup(&self, cleanup: impl FnOnce() + 'static) {
        if self.is_unmounted() {
            cleanup();
            return;
        }
        self.0.borrow_mut().cleanups.push(Box::new(cleanup));
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("Node")
            .field("id", &data.id)
            .field("type", &data.kind.component_type())
            .field("rect", &data.rect)
            .field("flags", &data.flags)
            .field("children", &data.children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn container() -> Node {
        Node::new(NodeKind::Container, Style::default())
    }

    fn counter_cleanup(node: &Node, counter: &Rc<Cell<u32>>) {
        let counter = counter.clone();
        node.on_cleanup(move || counter.set(counter.get() + 1));
    }

    #[test]
    fn test_mount_is_idempotent() {
        let parent = container();
        let child = container();
        parent.append_child(child.clone());

        parent.mount();
        parent.mount();
        assert!(parent.is_mounted());
        assert!(child.is_mounted());
    }

    #[test]
    fn test_unmount_runs_cleanups_once() {
        let node = container();
        let runs = Rc::new(Cell::new(0));
        counter_cleanup(&node, &runs);

        node.mount();
        node.unmount();
        node.unmount();
        assert_eq!(runs.get(), 1);
        assert!(node.is_unmounted());
        assert!(!node.is_mounted());
    }

    #[test]
    fn test_unmounted_node_is_not_remounted() {
        let node = container();
        node.mount();
        node.unmount();
        node.mount();
        assert!(!node.is_mounted());
    }

    #[test]
    fn test_children_cleanup_before_parent() {
        let parent = container();
        let child = container();
        parent.append_child(child.clone());

        let order = Rc::new(RefCell::new(Vec::new()));
        let order_parent = order.clone();
        parent.on_cleanup(move || order_parent.borrow_mut().push("parent"));
        let order_child = order.clone();
        child.on_cleanup(move || order_child.borrow_mut().push("child"));

        parent.mount();
        parent.unmount();
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
    }

    #[test]
    fn test_append_to_mounted_parent_mounts_child() {
        let parent = container();
        parent.mount();
        let child = container();
        parent.append_child(child.clone());
        assert!(child.is_mounted());
        assert!(child.parent().is_some_and(|p| p.ptr_eq(&parent)));
    }

    #[test]
    fn test_clear_children_unmounts_and_frees() {
        let parent = container();
        let runs = Rc::new(Cell::new(0));
        for _ in 0..3 {
            let child = container();
            counter_cleanup(&child, &runs);
            parent.append_child(child);
        }
        parent.mount();

        let before = crate::engine::live_node_count();
        parent.clear_children();
        assert_eq!(runs.get(), 3);
        assert_eq!(parent.child_count(), 0);
        assert_eq!(crate::engine::live_node_count(), before - 3);
    }

    #[test]
    fn test_parent_link_is_weak() {
        let child = container();
        {
            let parent = container();
            parent.append_child(child.clone());
            assert!(child.parent().is_some());
        }
        assert!(child.parent().is_none());
    }

    #[test]
    fn test_ancestors() {
        let root = container();
        let middle = container();
        let leaf = container();
        middle.append_child(leaf.clone());
        root.append_child(middle.clone());

        let ids: Vec<NodeId> = leaf.ancestors().map(|n| n.id()).collect();
        assert_eq!(ids, vec![middle.id(), root.id()]);
    }

    #[test]
    fn test_cleanup_after_unmount_runs_immediately() {
        let node = container();
        node.unmount();
        let runs = Rc::new(Cell::new(0));
        counter_cleanup(&node, &runs);
        assert_eq!(runs.get(), 1);
    }
}
