//! Ambient reactive context.
//!
//! Three pieces of thread-local state make dependency tracking work without
//! threading a context parameter through every read:
//!
//! - the current listener slot (which effect, if any, is running right now)
//! - the owner stack (where newly created effects get attached)
//! - the batch depth and its pending effect queue
//!
//! The listener slot follows dynamic-scope discipline: every change returns a
//! guard that restores the previous value on drop, so nested effects and
//! unwinding panics both leave the slot consistent.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::effect::{Effect, EffectInner};

thread_local! {
    /// The effect currently collecting dependencies.
    static LISTENER: RefCell<Option<Rc<EffectInner>>> = const { RefCell::new(None) };

    /// Stack of owner frames. Effects created while a frame is open are pushed into it.
    static OWNERS: RefCell<Vec<Vec<Effect>>> = const { RefCell::new(Vec::new()) };

    /// Nesting depth of `batch()` calls.
    static BATCH_DEPTH: Cell<usize> = const { Cell::new(0) };

    /// Effects notified while batching, deduplicated, in first-notified order.
    static PENDING: RefCell<Vec<Rc<EffectInner>>> = const { RefCell::new(Vec::new()) };
}

// =============================================================================
// Listener Slot
// =============================================================================

/// Get the effect currently collecting dependencies.
pub(crate) fn current_listener() -> Option<Rc<EffectInner>> {
    LISTENER.with(|slot| slot.borrow().clone())
}

/// Restores the previous listener when dropped.
pub(crate) struct ListenerGuard {
    previous: Option<Rc<EffectInner>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        LISTENER.with(|slot| *slot.borrow_mut() = previous);
    }
}

/// Install `listener` as the current listener until the guard drops.
pub(crate) fn set_listener(listener: Option<Rc<EffectInner>>) -> ListenerGuard {
    let previous = LISTENER.with(|slot| slot.replace(listener));
    ListenerGuard { previous }
}

/// Run `f` without tracking any signal reads.
///
/// Reads inside `f` never subscribe the surrounding effect.
pub fn untrack<R>(f: impl FnOnce() -> R) -> R {
    let _guard = set_listener(None);
    f()
}

// =============================================================================
// Owner Frames
// =============================================================================

/// An open owner frame. Collects every effect created until `finish()`.
pub(crate) struct OwnerFrame {
    depth: usize,
    finished: bool,
}

impl OwnerFrame {
    /// Open a new frame on top of the owner stack.
    pub(crate) fn push() -> Self {
        let depth = OWNERS.with(|owners| {
            let mut owners = owners.borrow_mut();
            owners.push(Vec::new());
            owners.len()
        });
        Self {
            depth,
            finished: false,
        }
    }

    /// Close the frame and take the effects it collected.
    pub(crate) fn finish(mut self) -> Vec<Effect> {
        self.finished = true;
        self.pop()
    }

    fn pop(&self) -> Vec<Effect> {
        OWNERS.with(|owners| {
            let mut owners = owners.borrow_mut();
            // Frames above ours belong to code that unwound without closing them
            owners.truncate(self.depth);
            owners.pop().unwrap_or_default()
        })
    }
}

impl Drop for OwnerFrame {
    fn drop(&mut self) {
        if !self.finished {
            // Unwinding: dispose whatever was created before the panic
            for effect in self.pop() {
                effect.dispose();
            }
        }
    }
}

/// Attach an effect to the innermost open owner frame, if any.
pub(crate) fn register_owned(effect: &Effect) {
    OWNERS.with(|owners| {
        if let Some(frame) = owners.borrow_mut().last_mut() {
            frame.push(effect.clone());
        }
    });
}

// =============================================================================
// Batching
// =============================================================================

/// Check if a batch is currently open.
pub(crate) fn is_batching() -> bool {
    BATCH_DEPTH.with(|depth| depth.get() > 0)
}

/// Queue an effect to run when the outermost batch closes.
pub(crate) fn enqueue(effect: Rc<EffectInner>) {
    PENDING.with(|pending| {
        let mut pending = pending.borrow_mut();
        if !pending.iter().any(|queued| Rc::ptr_eq(queued, &effect)) {
            pending.push(effect);
        }
    });
}

struct BatchGuard;

impl Drop for BatchGuard {
    fn drop(&mut self) {
        let depth = BATCH_DEPTH.with(|depth| {
            let next = depth.get().saturating_sub(1);
            depth.set(next);
            next
        });
        if depth == 0 {
            let pending = PENDING.with(|pending| std::mem::take(&mut *pending.borrow_mut()));
            for effect in pending {
                effect.run();
            }
        }
    }
}

/// Group several writes so each affected effect runs once at the end.
///
/// Nested batches only flush when the outermost one closes.
///
/// # Example
///
/// ```ignore
/// use spark_grid::reactive::{batch, create_effect, signal};
///
/// let a = signal(1);
/// let b = signal(2);
/// let (a2, b2) = (a.clone(), b.clone());
/// create_effect(move || println!("{}", a2.get() + b2.get()));
///
/// // Prints once, not twice
/// batch(|| {
///     a.set(10);
///     b.set(20);
/// });
/// ```
pub fn batch<R>(f: impl FnOnce() -> R) -> R {
    BATCH_DEPTH.with(|depth| depth.set(depth.get() + 1));
    let _guard = BatchGuard;
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untrack_restores_listener() {
        assert!(current_listener().is_none());
        untrack(|| assert!(current_listener().is_none()));
        assert!(current_listener().is_none());
    }

    #[test]
    fn test_batch_depth() {
        assert!(!is_batching());
        batch(|| {
            assert!(is_batching());
            batch(|| assert!(is_batching()));
            assert!(is_batching());
        });
        assert!(!is_batching());
    }

    #[test]
    fn test_owner_frame_collects() {
        let frame = OwnerFrame::push();
        let effect = Effect::new(|| {});
        register_owned(&effect);
        let owned = frame.finish();
        assert_eq!(owned.len(), 1);

        // No frame open: nothing collects, nothing panics
        register_owned(&effect);
    }
}
