//! Store - structured state over a single signal.
//!
//! A store holds an aggregate (a struct, a map, a `Vec` of records) and
//! replaces it as a whole on every update. Every setter form builds the
//! next value from a shallow clone of the current one and funnels into one
//! signal write, so the usual change semantics apply: an update that leaves
//! the aggregate equal to the previous one notifies nobody.
//!
//! Fields are addressed with lens closures (`|s| &mut s.field`) rather than
//! string keys.
//!
//! # Example
//!
//! ```ignore
//! use spark_grid::reactive::create_store;
//!
//! #[derive(Clone, PartialEq)]
//! struct Door { name: String, open: bool }
//!
//! let (doors, set_doors) = create_store(vec![
//!     Door { name: "lobby".into(), open: false },
//! ]);
//!
//! set_doors.set_item(0, |d| &mut d.open, true);
//! assert!(doors.with(|d| d[0].open));
//! ```

use super::signal::{create_signal, ReadSignal, WriteSignal};

/// Read handle of a store.
pub struct Store<T>(ReadSignal<T>);

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: 'static> Store<T> {
    /// Borrow the aggregate, subscribing the current effect.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.0.with(f)
    }
}

impl<T: Clone + 'static> Store<T> {
    /// Get a clone of the aggregate, subscribing the current effect.
    pub fn get(&self) -> T {
        self.0.get()
    }

    /// The underlying read signal.
    pub fn signal(&self) -> ReadSignal<T> {
        self.0.clone()
    }
}

/// Write handle of a store.
pub struct SetStore<T>(WriteSignal<T>);

impl<T> Clone for SetStore<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Clone + PartialEq + 'static> SetStore<T> {
    /// Replace the whole aggregate.
    pub fn set(&self, value: T) {
        self.0.set(value);
    }

    /// Compute the next aggregate from the previous one.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let previous = self.0.get_untracked();
        self.0.set(f(&previous));
    }

    /// Replace one field (or map entry) addressed by `lens`.
    pub fn set_at<V>(&self, lens: impl FnOnce(&mut T) -> &mut V, value: V) {
        let mut next = self.0.get_untracked();
        *lens(&mut next) = value;
        self.0.set(next);
    }
}

impl<E: Clone + PartialEq + 'static> SetStore<Vec<E>> {
    /// Replace one field of the element at `index`.
    ///
    /// An index past the end leaves the store untouched.
    pub fn set_item<V>(&self, index: usize, lens: impl FnOnce(&mut E) -> &mut V, value: V) {
        let mut next = self.0.get_untracked();
        let Some(element) = next.get_mut(index) else {
            tracing::warn!(
                target: "spark_grid::reactive",
                index,
                len = next.len(),
                "store item update out of range"
            );
            return;
        };
        *lens(element) = value;
        self.0.set(next);
    }
}

/// Create a store holding `initial`.
pub fn create_store<T: Clone + PartialEq + 'static>(initial: T) -> (Store<T>, SetStore<T>) {
    let (read, write) = create_signal(initial);
    (Store(read), SetStore(write))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::create_effect;
    use std::cell::Cell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        name: String,
        count: u32,
    }

    fn item(name: &str, count: u32) -> Item {
        Item {
            name: name.to_string(),
            count,
        }
    }

    fn watch<T: Clone + 'static>(store: &Store<T>) -> Rc<Cell<u32>> {
        let runs = Rc::new(Cell::new(0));
        let (reader, runs_clone) = (store.clone(), runs.clone());
        create_effect(move || {
            reader.get();
            runs_clone.set(runs_clone.get() + 1);
        });
        runs
    }

    #[test]
    fn test_set_and_update() {
        let (store, set_store) = create_store(item("iron", 1));
        let runs = watch(&store);

        set_store.set(item("gold", 2));
        assert_eq!(store.get(), item("gold", 2));

        set_store.update(|prev| Item {
            count: prev.count + 1,
            ..prev.clone()
        });
        assert_eq!(store.get().count, 3);
        assert_eq!(runs.get(), 3);
    }

    #[test]
    fn test_set_at_field() {
        let (store, set_store) = create_store(item("iron", 1));
        let runs = watch(&store);

        set_store.set_at(|s| &mut s.count, 9);
        assert_eq!(store.get(), item("iron", 9));

        // Same value: no notification
        set_store.set_at(|s| &mut s.count, 9);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_set_at_map_entry() {
        let mut initial = BTreeMap::new();
        initial.insert("door", false);
        let (store, set_store) = create_store(initial);

        set_store.set_at(|m| m.entry("door").or_insert(false), true);
        assert!(store.with(|m| m["door"]));
    }

    #[test]
    fn test_set_item() {
        let (store, set_store) = create_store(vec![item("iron", 1), item("gold", 2)]);
        let runs = watch(&store);

        set_store.set_item(1, |i| &mut i.count, 5);
        assert_eq!(store.get(), vec![item("iron", 1), item("gold", 5)]);
        assert_eq!(runs.get(), 2);

        set_store.set_item(7, |i| &mut i.count, 5);
        assert_eq!(runs.get(), 2);
    }
}
