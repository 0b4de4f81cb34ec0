//! # coldstream
//!
//! **Coldstream** is a minimal push-based sequence primitive for Rust:
//! cold observables, subscriptions with explicit cancellation, and a small
//! operator set (`map`, `flat_map`, `switch_map`, `exhaust_map`, `retry`,
//! `distinct_until_changed`, `start_with`, `delay`, `interval`).
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐        ┌───────────────────────────────┐
//!     │  Worker      │        │  Observable<T>                │
//!     │ (producer fn)│──────► │  - immutable worker holder    │
//!     └──────────────┘ create │  - operators return new ones  │
//!                             └──────────────┬────────────────┘
//!                                  subscribe │ (one cold run per call)
//!                                            ▼
//!     ┌───────────────────────────────────────────────────────┐
//!     │  Subscription (lifecycle state machine)               │
//!     │  - at most one terminal event (error xor complete)    │
//!     │  - idempotent unsubscribe, teardown runs once         │
//!     │  - buffers termination that beats the teardown        │
//!     └──────┬────────────────────────────────────────┬───────┘
//!            │ Emitter<T>                             │ Observer<T>
//!            ▼ (producer side)                        ▼ (consumer side)
//!       next / error / complete              on_next / on_error / on_complete
//! ```
//!
//! ### Lifecycle
//! ```text
//! Observable::create(worker) ──► subscribe() ──► worker runs once
//!
//!   worker emits:  next*  (error | complete)?       explicit cancel:
//!        │               │                          subscription.unsubscribe()
//!        ▼               ▼                                  │
//!   forwarded       terminal event ──► teardown ◄───────────┘
//!   in order        (delivered once)   (runs exactly once)
//! ```
//!
//! ## Execution model
//! One logical thread, cooperative and callback-driven. Synchronous
//! observables need no runtime at all. Timer-backed ones (`interval`,
//! `delay`) spawn their timers with [`tokio::task::spawn_local`] and must be
//! subscribed inside a [`tokio::task::LocalSet`] on a current-thread runtime.
//! There is no parallelism anywhere: "concurrency" means interleaving of
//! synchronous calls and timer callbacks on one timeline.
//!
//! ## Rules
//! - Each `subscribe` triggers an independent, unshared producer execution
//!   (cold semantics); observables are immutable values.
//! - A subscription delivers values in production order, then at most one
//!   terminal event; afterwards it is inert.
//! - `unsubscribe` is synchronous, idempotent, and never notifies the
//!   consumer by itself.
//! - Dropping a [`Subscription`] handle does **not** cancel the producer;
//!   cancellation is always explicit or terminal-driven.
//!
//! ## Features
//! | Area           | Description                                              | Key types / traits              |
//! |----------------|----------------------------------------------------------|---------------------------------|
//! | **Producers**  | Define producers as closures or trait impls.             | [`Worker`], [`WorkerFn`]        |
//! | **Consumers**  | Receive signals via trait or plain closures.             | [`Observer`], [`FnObserver`]    |
//! | **Lifecycle**  | Cancel and inspect one producer execution.               | [`Subscription`]                |
//! | **Operators**  | Compose pipelines; higher-order flattening included.     | [`Observable`]                  |
//! | **Policies**   | Bound `retry` resubscription.                            | [`RetryPolicy`]                 |
//! | **Errors**     | One opaque, terminal error value per subscription.       | [`StreamError`]                 |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use coldstream::{Emitter, Observable};
//!
//! let doubled = Observable::create(|emitter: Emitter<u32>| {
//!     emitter.next(1);
//!     emitter.next(2);
//!     emitter.complete();
//!     None
//! })
//! .map(|v| v * 2);
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! let subscription = doubled.subscribe_next(move |v| sink.borrow_mut().push(v));
//!
//! assert_eq!(*seen.borrow(), vec![2, 4]);
//! assert!(subscription.is_completed());
//! assert!(subscription.is_unsubscribed());
//! ```

mod core;
mod error;
mod operators;
mod policies;

// ---- Public re-exports ----

pub use crate::core::{
    Emitter, FnObserver, Observable, Observer, Subscription, Teardown, Worker, WorkerFn, WorkerRef,
};
pub use error::StreamError;
pub use policies::RetryPolicy;

// Optional: expose a simple built-in stdout observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
mod observers;
#[cfg(feature = "logging")]
pub use observers::LogWriter;
