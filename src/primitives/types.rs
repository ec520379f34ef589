//! Primitive types - Props, prop values and callbacks.
//!
//! These types define the interface for component props.
//! Props support static values, signals, and getters for reactivity.

use std::rc::Rc;

use crate::engine::Node;
use crate::reactive::{ReadSignal, Signal};
use crate::types::{Dimension, Style};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup callback registered on a node, run once when it unmounts.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Callback Types
// =============================================================================

/// Plain event callback (button click).
///
/// Using Rc<dyn Fn> instead of Box<dyn Fn> lets the runtime clone the
/// handler out of the node before calling it, so the handler is free to
/// rebuild the tree it lives in.
pub type Callback = Rc<dyn Fn()>;

/// Callback receiving a new value (input text, checkbox state).
pub type ValueCallback<T> = Rc<dyn Fn(T)>;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// Reading a prop during layout or rendering goes through [`PropValue::get`],
/// which tracks signals and getters, so a change repaints the display.
#[derive(Clone)]
pub enum PropValue<T: Clone + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(ReadSignal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + 'static> PropValue<T> {
    /// Get the current value, tracking any signal it reads.
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }

    /// Wrap a getter closure.
    pub fn getter(f: impl Fn() -> T + 'static) -> Self {
        PropValue::Getter(Rc::new(f))
    }
}

impl<T: Clone + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + 'static> From<ReadSignal<T>> for PropValue<T> {
    fn from(signal: ReadSignal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

impl<T: Clone + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal.read_only())
    }
}

impl From<&str> for PropValue<String> {
    fn from(value: &str) -> Self {
        PropValue::Static(value.to_string())
    }
}

/// Shorthand for [`PropValue::getter`].
///
/// ```ignore
/// let label = derive(move || format!("Count: {}", count.get()));
/// ```
pub fn derive<T: Clone + 'static>(f: impl Fn() -> T + 'static) -> PropValue<T> {
    PropValue::getter(f)
}

// =============================================================================
// Container Props
// =============================================================================

/// Properties for a container.
#[derive(Default)]
pub struct ContainerProps {
    pub style: Style,
    pub children: Vec<Node>,
}

// =============================================================================
// Button Props
// =============================================================================

/// Properties for a button.
#[derive(Default)]
pub struct ButtonProps {
    pub label: PropValue<String>,
    pub on_click: Option<Callback>,
    pub style: Style,
}

impl ButtonProps {
    /// Button with a label and click handler, default style.
    pub fn new(label: impl Into<PropValue<String>>, on_click: impl Fn() + 'static) -> Self {
        Self {
            label: label.into(),
            on_click: Some(Rc::new(on_click)),
            style: Style::default(),
        }
    }
}

// =============================================================================
// Input Props
// =============================================================================

/// Properties for a single-line text input.
#[derive(Default)]
pub struct InputProps {
    /// Current text.
    pub value: PropValue<String>,
    /// Called with the edited text after every keystroke.
    pub on_input: Option<ValueCallback<String>>,
    /// Called with the current text when the activate key is pressed.
    pub on_submit: Option<ValueCallback<String>>,
    /// Shown in the muted color while unfocused and empty.
    pub placeholder: String,
    /// Width in cells (defaults to `DEFAULT_INPUT_WIDTH`).
    pub width: Option<u16>,
    pub style: Style,
}

impl InputProps {
    /// Input whose value lives in `value` and is written back on every edit.
    pub fn bound(value: Signal<String>) -> Self {
        let writer = value.clone();
        Self {
            value: value.into(),
            on_input: Some(Rc::new(move |text: String| writer.set(text))),
            ..Self::default()
        }
    }
}

/// Properties for a checkbox.
#[derive(Default)]
pub struct CheckboxProps {
    pub checked: PropValue<bool>,
    /// Called with the toggled state.
    pub on_change: Option<ValueCallback<bool>>,
    pub style: Style,
}

impl CheckboxProps {
    /// Checkbox whose state lives in `checked` and is written back on toggle.
    pub fn bound(checked: Signal<bool>) -> Self {
        let writer = checked.clone();
        Self {
            checked: checked.into(),
            on_change: Some(Rc::new(move |state: bool| writer.set(state))),
            ..Self::default()
        }
    }
}

// =============================================================================
// Scroll Props
// =============================================================================

/// Properties for a scroll container.
pub struct ScrollProps {
    /// Viewport width.
    pub width: Dimension,
    /// Viewport height.
    pub height: Dimension,
    /// Draw a scrollbar on the right column when content overflows.
    pub show_scrollbar: bool,
    pub style: Style,
}

impl Default for ScrollProps {
    fn default() -> Self {
        Self {
            width: Dimension::FillParent,
            height: Dimension::FillParent,
            show_scrollbar: true,
            style: Style::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::signal;

    #[test]
    fn test_prop_value_static() {
        let prop: PropValue<String> = "hello".into();
        assert_eq!(prop.get(), "hello");
    }

    #[test]
    fn test_prop_value_signal() {
        let value = signal(3u16);
        let prop: PropValue<u16> = value.clone().into();
        value.set(7);
        assert_eq!(prop.get(), 7);
    }

    #[test]
    fn test_prop_value_getter() {
        let value = signal(2);
        let reader = value.clone();
        let prop = derive(move || reader.get() * 10);
        assert_eq!(prop.get(), 20);
        value.set(3);
        assert_eq!(prop.get(), 30);
    }

    #[test]
    fn test_bound_input_writes_back() {
        let text = signal(String::new());
        let props = InputProps::bound(text.clone());
        if let Some(on_input) = &props.on_input {
            on_input("abc".to_string());
        }
        assert_eq!(text.get(), "abc");
        assert_eq!(props.value.get(), "abc");
    }
}
