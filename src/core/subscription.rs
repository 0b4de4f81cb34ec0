//! # Subscription: lifecycle state machine for one producer execution.
//!
//! A [`Subscription`] bridges exactly one worker run to one consumer. It owns
//! the teardown action and enforces the delivery contract between them.
//!
//! ## State
//! ```text
//!            next*                    error | complete
//!  Active ───────────► Active ─────────────────────────► Terminated
//!    │                                                       │
//!    │ unsubscribe()                 (implicit cancellation) │
//!    ▼                                                       ▼
//!  Unsubscribed ◄────────────────────── teardown runs exactly once
//! ```
//!
//! ## Rules
//! - At most one of `on_error`/`on_complete` reaches the consumer; once
//!   either fires, nothing else does.
//! - `unsubscribe` is idempotent: the teardown is consumed (`Option::take`)
//!   before it runs, so reentrant or repeated cancellation is a no-op.
//! - A worker may terminate synchronously, while its own invocation is still
//!   on the stack and its return value (the teardown) does not exist yet.
//!   That early termination is buffered (`pending_teardown`) and the teardown
//!   runs the moment the worker hands it over.
//! - All state is `Cell`/`RefCell`: one logical thread, no locks. Correctness
//!   rests on the transitions being idempotent, not on mutual exclusion.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::emitter::Emitter;
use crate::core::observer::Observer;
use crate::core::worker::{Teardown, WorkerRef};
use crate::error::StreamError;

/// Shared state of one subscription.
///
/// The [`Emitter`](crate::Emitter) holds an `Rc` to this and routes every
/// producer signal through the transition methods below.
pub(crate) struct SubscriptionState<T> {
    observer: Box<dyn Observer<T>>,
    /// No further consumer notification permitted; teardown has run or been
    /// scheduled to run.
    unsubscribed: Cell<bool>,
    /// Producer signaled completion.
    completed: Cell<bool>,
    /// The worker's top-level invocation has returned.
    worker_returned: Cell<bool>,
    /// Termination was requested before the teardown existed.
    pending_teardown: Cell<bool>,
    /// Set once, from the worker's return value; consumed before running.
    teardown: RefCell<Option<Teardown>>,
}

impl<T: 'static> SubscriptionState<T> {
    fn new(observer: Box<dyn Observer<T>>) -> Self {
        Self {
            observer,
            unsubscribed: Cell::new(false),
            completed: Cell::new(false),
            worker_returned: Cell::new(false),
            pending_teardown: Cell::new(false),
            teardown: RefCell::new(None),
        }
    }

    pub(crate) fn next(&self, value: T) {
        if self.unsubscribed.get() {
            return;
        }
        self.observer.on_next(value);
    }

    pub(crate) fn error(&self, error: StreamError) {
        if self.unsubscribed.get() {
            return;
        }
        self.unsubscribed.set(true);
        self.cancel();
        self.observer.on_error(error);
    }

    pub(crate) fn complete(&self) {
        if self.unsubscribed.get() {
            return;
        }
        self.completed.set(true);
        self.unsubscribed.set(true);
        self.cancel();
        self.observer.on_complete();
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.unsubscribed.get()
    }

    /// Runs the teardown now, or schedules it if the worker has not returned
    /// yet. The `take` makes repeated and reentrant calls no-ops.
    fn cancel(&self) {
        if !self.worker_returned.get() {
            self.pending_teardown.set(true);
            return;
        }
        let teardown = self.teardown.borrow_mut().take();
        if let Some(teardown) = teardown {
            teardown();
        }
    }

    /// Registers the worker's return value once its invocation finishes.
    ///
    /// If termination was requested while the worker was still running, the
    /// freshly obtained teardown runs immediately, exactly once.
    fn attach_teardown(&self, teardown: Option<Teardown>) {
        self.worker_returned.set(true);
        let Some(teardown) = teardown else {
            return;
        };
        if self.pending_teardown.get() {
            teardown();
        } else {
            *self.teardown.borrow_mut() = Some(teardown);
        }
    }
}

/// Type-erased view operators use to hold child subscriptions of any item
/// type in one collection.
trait Lifecycle {
    fn unsubscribe(&self);
    fn is_unsubscribed(&self) -> bool;
    fn is_completed(&self) -> bool;
}

impl<T: 'static> Lifecycle for SubscriptionState<T> {
    /// Releases producer resources and stops future notifications. Notifies
    /// the consumer of nothing by itself.
    ///
    /// The teardown runs *before* the flag flips: the `interval` factory
    /// signals completion from inside its teardown, and that one completion
    /// must still reach the consumer. A terminal event raised in there obeys
    /// at-most-one-termination anyway, because the teardown has already been
    /// consumed.
    fn unsubscribe(&self) {
        if self.unsubscribed.get() {
            return;
        }
        self.cancel();
        self.unsubscribed.set(true);
    }

    fn is_unsubscribed(&self) -> bool {
        self.unsubscribed.get()
    }

    fn is_completed(&self) -> bool {
        self.completed.get()
    }
}

/// Live handle for one producer execution.
///
/// Returned by [`Observable::subscribe`](crate::Observable::subscribe).
/// Cloning shares the handle; dropping it does **not** cancel — call
/// [`Subscription::unsubscribe`].
pub struct Subscription {
    state: Rc<dyn Lifecycle>,
}

impl Clone for Subscription {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl Subscription {
    /// Wires a worker to a consumer and runs the worker once.
    pub(crate) fn start<T: 'static>(
        worker: &WorkerRef<T>,
        observer: Box<dyn Observer<T>>,
    ) -> Self {
        let state = Rc::new(SubscriptionState::new(observer));
        let emitter = Emitter::new(Rc::clone(&state));
        // The worker may emit (and even terminate) during this call; its
        // return value cannot be stored until it returns.
        let teardown = worker.run(emitter);
        state.attach_teardown(teardown);
        Self { state }
    }

    /// Cancels the producer execution: runs the teardown (at most once over
    /// the subscription's lifetime) and stops future notifications.
    ///
    /// Synchronous and idempotent. Never raises an error.
    pub fn unsubscribe(&self) {
        self.state.unsubscribe();
    }

    /// `true` once the teardown has run (or been scheduled) and no further
    /// consumer notification is permitted.
    pub fn is_unsubscribed(&self) -> bool {
        self.state.is_unsubscribed()
    }

    /// `true` once the producer signaled completion.
    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }
}
