//! Reactive Core - signals, effects, memos, batching and stores.
//!
//! Fine-grained reactivity for a single thread:
//!
//! - [`signal`] / [`create_signal`] - value cells that track their readers
//! - [`create_effect`] - closures that re-run when what they read changes
//! - [`create_memo`] - derived values
//! - [`batch`] - coalesce several writes into one round of effect runs
//! - [`create_store`] - structured state with whole-value replacement
//!
//! # Tracking
//!
//! There is no context parameter. The effect that is currently running sits
//! in a thread-local listener slot, and every signal read checks that slot.
//!
//! ```text
//! create_effect(f)          signal.get()               signal.set(v)
//!       │                        │                          │
//!       ├─ listener = f ─────────┤ subscribe(listener)      ├─ v == old? → stop
//!       ├─ run f                 │                          ├─ batching? → queue
//!       └─ restore listener      └─ return value            └─ run subscribers
//! ```

mod context;
mod effect;
mod memo;
mod signal;
mod store;

pub use context::{batch, untrack};
pub use effect::{create_effect, create_reaction, create_scope, Effect, Scope};
pub use memo::create_memo;
pub use signal::{create_signal, signal, ReadSignal, Signal, WriteSignal};
pub use store::{create_store, SetStore, Store};
