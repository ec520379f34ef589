//! Memos - derived signals kept in sync by an internal effect.

use std::cell::OnceCell;
use std::rc::Rc;

use super::context::untrack;
use super::effect::create_effect;
use super::signal::{ReadSignal, Signal};

/// Create a derived value.
///
/// `f` is recomputed whenever a signal it reads changes. Subscribers of the
/// memo only run when the recomputed value differs from the previous one.
///
/// # Example
///
/// ```ignore
/// use spark_grid::reactive::{create_memo, signal};
///
/// let count = signal(3);
/// let source = count.clone();
/// let doubled = create_memo(move || source.get() * 2);
/// assert_eq!(doubled.get(), 6);
///
/// count.set(4);
/// assert_eq!(doubled.get(), 8);
/// ```
pub fn create_memo<T, F>(f: F) -> ReadSignal<T>
where
    T: Clone + PartialEq + 'static,
    F: Fn() -> T + 'static,
{
    // The effect's first run seeds the signal, later runs write it
    let slot: Rc<OnceCell<Signal<T>>> = Rc::default();
    let f = Rc::new(f);
    let (writer, compute) = (slot.clone(), f.clone());
    create_effect(move || {
        let next = compute();
        match writer.get() {
            Some(signal) => signal.set(next),
            None => {
                let _ = writer.set(Signal::new(next));
            }
        }
    });

    // Empty only if the first run panicked
    slot.get_or_init(|| Signal::new(untrack(|| f()))).read_only()
}
