//! Signals - reactive value cells.
//!
//! A signal holds one value and the set of effects that read it. Reading
//! inside an effect subscribes that effect; writing a different value
//! notifies every subscriber.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::effect::Subscribers;

struct SignalInner<T> {
    value: RefCell<T>,
    subscribers: Subscribers,
}

// =============================================================================
// Signal (read + write)
// =============================================================================

/// A reactive value cell with both read and write access.
///
/// Cloning the handle shares the cell.
pub struct Signal<T>(Rc<SignalInner<T>>);

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: 'static> Signal<T> {
    /// Create a new signal.
    pub fn new(value: T) -> Self {
        Self(Rc::new(SignalInner {
            value: RefCell::new(value),
            subscribers: Subscribers::default(),
        }))
    }

    /// Borrow the value, subscribing the current effect.
    ///
    /// Writing this same signal from inside `f` panics (the value is borrowed).
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.0.subscribers.track();
        f(&self.0.value.borrow())
    }

    /// Borrow the value without subscribing anything.
    pub fn with_untracked<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.value.borrow())
    }

    /// Read-only view of this signal.
    pub fn read_only(&self) -> ReadSignal<T> {
        ReadSignal(self.clone())
    }

    /// Write-only view of this signal.
    pub fn write_only(&self) -> WriteSignal<T> {
        WriteSignal(self.clone())
    }

    /// Check if two handles share the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Clone + 'static> Signal<T> {
    /// Get a clone of the value, subscribing the current effect.
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    /// Get a clone of the value without subscribing anything.
    pub fn get_untracked(&self) -> T {
        self.with_untracked(T::clone)
    }
}

impl<T: PartialEq + 'static> Signal<T> {
    /// Store a new value.
    ///
    /// Does nothing if `value` equals the current value. Otherwise every
    /// subscriber runs (or is queued, inside a batch).
    pub fn set(&self, value: T) {
        {
            let mut current = self.0.value.borrow_mut();
            if *current == value {
                return;
            }
            *current = value;
        }
        self.0.subscribers.notify();
    }
}

impl<T: Clone + PartialEq + 'static> Signal<T> {
    /// Mutate a copy of the value and store it.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut next = self.get_untracked();
        f(&mut next);
        self.set(next);
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signal").field(&*self.0.value.borrow()).finish()
    }
}

// =============================================================================
// Read / Write halves
// =============================================================================

/// The read half of a signal.
pub struct ReadSignal<T>(Signal<T>);

impl<T> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: 'static> ReadSignal<T> {
    /// Borrow the value, subscribing the current effect.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.0.with(f)
    }

    /// Borrow the value without subscribing anything.
    pub fn with_untracked<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.0.with_untracked(f)
    }
}

impl<T: Clone + 'static> ReadSignal<T> {
    /// Get a clone of the value, subscribing the current effect.
    pub fn get(&self) -> T {
        self.0.get()
    }

    /// Get a clone of the value without subscribing anything.
    pub fn get_untracked(&self) -> T {
        self.0.get_untracked()
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The write half of a signal.
pub struct WriteSignal<T>(Signal<T>);

impl<T> Clone for WriteSignal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: PartialEq + 'static> WriteSignal<T> {
    /// Store a new value. See [`Signal::set`].
    pub fn set(&self, value: T) {
        self.0.set(value);
    }
}

impl<T: Clone + PartialEq + 'static> WriteSignal<T> {
    /// Mutate a copy of the value and store it.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.0.update(f);
    }

    /// Current value, never tracked. Setters use this to build the next value.
    pub(crate) fn get_untracked(&self) -> T {
        self.0.get_untracked()
    }
}

// =============================================================================
// Constructors
// =============================================================================

/// Create a signal handle with both read and write access.
pub fn signal<T: 'static>(value: T) -> Signal<T> {
    Signal::new(value)
}

/// Create a signal split into its read and write halves.
///
/// # Example
///
/// ```ignore
/// use spark_grid::reactive::create_signal;
///
/// let (count, set_count) = create_signal(0);
/// set_count.set(count.get() + 1);
/// ```
pub fn create_signal<T: 'static>(value: T) -> (ReadSignal<T>, WriteSignal<T>) {
    let signal = Signal::new(value);
    (signal.read_only(), signal.write_only())
}
