//! Effects - closures that re-run when the signals they read change.
//!
//! # Dependency tracking
//!
//! While an effect runs it occupies the ambient listener slot, so every
//! signal read subscribes it. Each run bumps the effect's epoch and every
//! subscription remembers the epoch it was made in. A subscription whose
//! epoch is older than the effect's current one belongs to an earlier run
//! and is dropped the next time that signal notifies, so an effect only
//! reacts to what its latest run actually read.
//!
//! # Ownership
//!
//! Effects created while another effect runs belong to that run and are
//! disposed before the parent runs again. Effects created inside
//! [`create_scope`] belong to the returned [`Scope`]. Everything else lives
//! until [`Effect::dispose`] is called.
//!
//! # Failure
//!
//! A panic inside an effect is caught, reported through `tracing`, and the
//! effect stays subscribed: the next change runs it again. The first effect
//! run wraps the process panic hook so that panics raised inside effects
//! only record their location for the report instead of printing to stderr
//! (which would land on the terminal grid). Panics anywhere else still reach
//! the previous hook. A hook installed later without chaining replaces this.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::sync::Once;

use super::context::{self, OwnerFrame};

/// Upper bound on back-to-back re-runs caused by an effect writing its own dependencies.
const MAX_RERUNS: usize = 100;

// =============================================================================
// Panic Capture
// =============================================================================

thread_local! {
    /// Nesting depth of effect closures running under `catch_unwind`.
    static CATCHING: Cell<usize> = const { Cell::new(0) };

    /// Location of the last panic raised inside an effect.
    static CAUGHT_AT: RefCell<Option<String>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Once = Once::new();

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if CATCHING.try_with(Cell::get).unwrap_or(0) > 0 {
                let location = info.location().map(|at| at.to_string());
                let _ = CAUGHT_AT.try_with(|slot| *slot.borrow_mut() = location);
            } else {
                previous(info);
            }
        }));
    });
}

/// Run `f`, turning a panic into its report (`message at file:line:col`).
fn catch_panic(f: impl FnOnce()) -> Result<(), String> {
    install_panic_hook();
    CATCHING.with(|depth| depth.set(depth.get() + 1));
    let outcome = panic::catch_unwind(AssertUnwindSafe(f));
    CATCHING.with(|depth| depth.set(depth.get() - 1));

    outcome.map_err(|payload| {
        let message = panic_message(payload.as_ref());
        match CAUGHT_AT.with(|slot| slot.borrow_mut().take()) {
            Some(at) => format!("{message} at {at}"),
            None => message.to_string(),
        }
    })
}

// =============================================================================
// Effect Internals
// =============================================================================

pub(crate) struct EffectInner {
    func: RefCell<Option<Box<dyn FnMut()>>>,
    epoch: Cell<u64>,
    running: Cell<bool>,
    rerun: Cell<bool>,
    disposed: Cell<bool>,
    owned: RefCell<Vec<Effect>>,
}

impl EffectInner {
    /// Run the effect now, or schedule one more pass if it is already running.
    pub(crate) fn run(self: &Rc<Self>) {
        if self.disposed.get() {
            return;
        }
        if self.running.get() {
            self.rerun.set(true);
            return;
        }

        let mut passes = 0;
        loop {
            self.running.set(true);
            self.dispose_owned();
            self.epoch.set(self.epoch.get() + 1);

            // Take the closure out so a re-entrant dispose never hits a live borrow
            let Some(mut func) = self.func.borrow_mut().take() else {
                self.running.set(false);
                return;
            };

            let frame = OwnerFrame::push();
            let outcome = {
                let _listener = context::set_listener(Some(self.clone()));
                catch_panic(|| func())
            };
            *self.owned.borrow_mut() = frame.finish();

            if self.disposed.get() {
                drop(func);
                self.dispose_owned();
            } else {
                *self.func.borrow_mut() = Some(func);
            }
            self.running.set(false);

            if let Err(report) = outcome {
                tracing::error!(target: "spark_grid::reactive", "effect panicked: {report}");
            }

            if !self.rerun.replace(false) || self.disposed.get() {
                break;
            }
            passes += 1;
            if passes >= MAX_RERUNS {
                tracing::warn!(
                    target: "spark_grid::reactive",
                    "effect re-triggered itself {MAX_RERUNS} times in a row, dropping further runs"
                );
                break;
            }
        }
    }

    fn dispose_owned(&self) {
        let owned = std::mem::take(&mut *self.owned.borrow_mut());
        for child in owned {
            child.dispose();
        }
    }

    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        // While running the closure is already out; run() drops it afterwards
        let func = self.func.borrow_mut().take();
        drop(func);
        self.dispose_owned();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

// =============================================================================
// Subscriber List
// =============================================================================

struct Subscription {
    effect: Rc<EffectInner>,
    epoch: u64,
}

/// The set of effects subscribed to one signal.
#[derive(Default)]
pub(crate) struct Subscribers {
    entries: RefCell<Vec<Subscription>>,
}

impl Subscribers {
    /// Subscribe the current listener, if any.
    pub(crate) fn track(&self) {
        let Some(listener) = context::current_listener() else {
            return;
        };
        let epoch = listener.epoch.get();
        let mut entries = self.entries.borrow_mut();
        match entries.iter_mut().find(|entry| Rc::ptr_eq(&entry.effect, &listener)) {
            Some(entry) => entry.epoch = epoch,
            None => entries.push(Subscription {
                effect: listener,
                epoch,
            }),
        }
    }

    /// Notify every live subscriber, in subscription order.
    pub(crate) fn notify(&self) {
        let live: Vec<Rc<EffectInner>> = {
            let mut entries = self.entries.borrow_mut();
            entries.retain(|entry| {
                !entry.effect.disposed.get() && entry.epoch == entry.effect.epoch.get()
            });
            entries.iter().map(|entry| entry.effect.clone()).collect()
        };

        let batching = context::is_batching();
        for effect in live {
            if batching {
                context::enqueue(effect);
            } else {
                effect.run();
            }
        }
    }

    /// Number of subscriptions currently held (stale ones included).
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

// =============================================================================
// Effect Handle
// =============================================================================

/// Handle to a running effect.
///
/// Cloning the handle does not clone the effect.
#[derive(Clone)]
pub struct Effect(pub(crate) Rc<EffectInner>);

impl Effect {
    pub(crate) fn new(f: impl FnMut() + 'static) -> Self {
        Self(Rc::new(EffectInner {
            func: RefCell::new(Some(Box::new(f))),
            epoch: Cell::new(0),
            running: Cell::new(false),
            rerun: Cell::new(false),
            disposed: Cell::new(false),
            owned: RefCell::new(Vec::new()),
        }))
    }

    /// Stop the effect for good.
    ///
    /// Drops its closure (and everything it captured) and disposes effects it
    /// created. Idempotent.
    pub fn dispose(&self) {
        self.0.dispose();
    }

    /// Check if the effect was disposed.
    pub fn is_disposed(&self) -> bool {
        self.0.disposed.get()
    }

    /// Run the effect now, as if a dependency had changed.
    pub fn run(&self) {
        self.0.run();
    }

    /// Run `f` with this effect as the listener.
    ///
    /// Signals read inside `f` become this effect's dependencies, replacing
    /// those of any previous run or `track` call. The effect's own closure
    /// is not called; it runs later when one of those signals changes.
    pub fn track<R>(&self, f: impl FnOnce() -> R) -> R {
        self.0.epoch.set(self.0.epoch.get() + 1);
        let _listener = context::set_listener(Some(self.0.clone()));
        f()
    }

    /// Check if two handles refer to the same effect.
    pub fn ptr_eq(&self, other: &Effect) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effect")
            .field("epoch", &self.0.epoch.get())
            .field("disposed", &self.0.disposed.get())
            .finish()
    }
}

/// Create an effect and run it once immediately.
///
/// # Example
///
/// ```ignore
/// use spark_grid::reactive::{create_effect, signal};
///
/// let count = signal(0);
/// let reader = count.clone();
/// create_effect(move || println!("count = {}", reader.get()));
///
/// count.set(1); // prints "count = 1"
/// count.set(1); // unchanged, prints nothing
/// ```
pub fn create_effect(f: impl FnMut() + 'static) -> Effect {
    let effect = Effect::new(f);
    context::register_owned(&effect);
    effect.0.run();
    effect
}

/// Create an effect that does not run until a tracked dependency changes.
///
/// Dependencies are collected with [`Effect::track`].
pub fn create_reaction(f: impl FnMut() + 'static) -> Effect {
    let effect = Effect::new(f);
    context::register_owned(&effect);
    effect
}

// =============================================================================
// Scope
// =============================================================================

/// A group of effects disposed together.
#[derive(Default)]
pub struct Scope {
    effects: RefCell<Vec<Effect>>,
}

impl Scope {
    /// Dispose every effect created in this scope. Idempotent.
    pub fn dispose(&self) {
        let effects = std::mem::take(&mut *self.effects.borrow_mut());
        for effect in effects {
            effect.dispose();
        }
    }

    /// Number of effects owned by this scope.
    pub fn len(&self) -> usize {
        self.effects.borrow().len()
    }

    /// Check if the scope owns no effects.
    pub fn is_empty(&self) -> bool {
        self.effects.borrow().is_empty()
    }
}

/// Run `f` and collect every top-level effect it creates into a [`Scope`].
///
/// The scope is detached from any surrounding owner: effects inside it are
/// not disposed when an enclosing effect re-runs, only when the scope is.
pub fn create_scope<R>(f: impl FnOnce() -> R) -> (R, Scope) {
    let frame = OwnerFrame::push();
    let result = f();
    let effects = frame.finish();
    (
        result,
        Scope {
            effects: RefCell::new(effects),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::{batch, signal};

    #[test]
    fn test_effect_runs_immediately() {
        let runs = Rc::new(Cell::new(0));
        let runs_clone = runs.clone();
        create_effect(move || runs_clone.set(runs_clone.get() + 1));
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_effect_reruns_once_per_change() {
        let count = signal(0);
        let runs = Rc::new(Cell::new(0));
        let (reader, runs_clone) = (count.clone(), runs.clone());
        create_effect(move || {
            reader.get();
            runs_clone.set(runs_clone.get() + 1);
        });

        count.set(1);
        assert_eq!(runs.get(), 2);

        // Same value is a no-op
        count.set(1);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_batch_runs_effect_once() {
        let a = signal(0);
        let b = signal(0);
        let runs = Rc::new(Cell::new(0));
        let (ra, rb, runs_clone) = (a.clone(), b.clone(), runs.clone());
        create_effect(move || {
            ra.get();
            rb.get();
            runs_clone.set(runs_clone.get() + 1);
        });

        batch(|| {
            a.set(1);
            a.set(2);
            b.set(3);
            assert_eq!(runs.get(), 1);
        });
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_panicking_effect_keeps_running() {
        let value = signal(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (reader, seen_clone) = (value.clone(), seen.clone());
        create_effect(move || {
            let v = reader.get();
            if v == 1 {
                panic!("odd value");
            }
            seen_clone.borrow_mut().push(v);
        });

        value.set(1);
        value.set(2);
        assert_eq!(*seen.borrow(), vec![0, 2]);
    }

    #[test]
    fn test_effect_panic_reported_with_location() {
        let report = catch_panic(|| panic!("bad state"));
        assert!(report.is_err_and(|r| r.starts_with("bad state at ") && r.contains("effect.rs")));
        assert_eq!(CATCHING.with(Cell::get), 0);

        assert!(catch_panic(|| {}).is_ok());
    }

    #[test]
    fn test_dispose_stops_effect() {
        let value = signal(0);
        let runs = Rc::new(Cell::new(0));
        let (reader, runs_clone) = (value.clone(), runs.clone());
        let effect = create_effect(move || {
            reader.get();
            runs_clone.set(runs_clone.get() + 1);
        });

        effect.dispose();
        effect.dispose();
        value.set(5);
        assert_eq!(runs.get(), 1);
        assert!(effect.is_disposed());
    }

    #[test]
    fn test_stale_dependencies_are_pruned() {
        let use_a = signal(true);
        let a = signal(0);
        let b = signal(0);
        let runs = Rc::new(Cell::new(0));
        let (flag, ra, rb, runs_clone) = (use_a.clone(), a.clone(), b.clone(), runs.clone());
        create_effect(move || {
            runs_clone.set(runs_clone.get() + 1);
            if flag.get() {
                ra.get();
            } else {
                rb.get();
            }
        });

        use_a.set(false);
        assert_eq!(runs.get(), 2);

        // `a` was only read by the first run
        a.set(1);
        assert_eq!(runs.get(), 2);

        b.set(1);
        assert_eq!(runs.get(), 3);
    }

    #[test]
    fn test_nested_effects_disposed_on_rerun() {
        let outer = signal(0);
        let inner = signal(0);
        let inner_runs = Rc::new(Cell::new(0));
        let (ro, ri, inner_runs_clone) = (outer.clone(), inner.clone(), inner_runs.clone());
        create_effect(move || {
            ro.get();
            let (ri, counter) = (ri.clone(), inner_runs_clone.clone());
            create_effect(move || {
                ri.get();
                counter.set(counter.get() + 1);
            });
        });
        assert_eq!(inner_runs.get(), 1);

        // Re-running the outer effect replaces the inner one
        outer.set(1);
        assert_eq!(inner_runs.get(), 2);

        // Only one live inner effect reacts
        inner.set(1);
        assert_eq!(inner_runs.get(), 3);
    }

    #[test]
    fn test_self_write_schedules_rerun() {
        let value = signal(0);
        let writer = value.clone();
        create_effect(move || {
            let v = writer.get();
            if v < 3 {
                writer.set(v + 1);
            }
        });
        assert_eq!(value.get_untracked(), 3);
    }

    #[test]
    fn test_scope_disposes_effects() {
        let value = signal(0);
        let runs = Rc::new(Cell::new(0));
        let (reader, runs_clone) = (value.clone(), runs.clone());
        let ((), scope) = create_scope(move || {
            create_effect(move || {
                reader.get();
                runs_clone.set(runs_clone.get() + 1);
            });
        });
        assert_eq!(scope.len(), 1);

        scope.dispose();
        value.set(1);
        assert_eq!(runs.get(), 1);
        assert!(scope.is_empty());
    }

    #[test]
    fn test_reaction_tracks_explicitly() {
        let value = signal(0);
        let fired = Rc::new(Cell::new(0));
        let fired_clone = fired.clone();
        let reaction = create_reaction(move || fired_clone.set(fired_clone.get() + 1));
        assert_eq!(fired.get(), 0);

        let reader = value.clone();
        reaction.track(|| reader.get());
        value.set(1);
        assert_eq!(fired.get(), 1);
    }
}
