//! # Bound producer-side callbacks.
//!
//! [`Emitter`] is the handle a [`Worker`](crate::Worker) pushes signals
//! through. It bundles the three callbacks (`next`, `error`, `complete`) into
//! one compile-checked contract type and routes every call through the owning
//! subscription's state machine, which enforces gating and termination.
//!
//! ## Rules
//! - **Never blocks, never fails outward**: emitting into a finished
//!   subscription is a silent no-op.
//! - **Cheaply cloneable**: internally holds an `Rc` to the subscription
//!   state. Timer tasks keep their own clone.
//! - A clone kept by a producer keeps the subscription state alive; the
//!   state is released once the producer ends or is cancelled and all
//!   handles are gone.

use std::rc::Rc;

use crate::core::subscription::SubscriptionState;
use crate::error::StreamError;

/// Producer-side handle for one subscription.
///
/// Every signal is forwarded to the consumer only while the subscription is
/// live; after a terminal event or an explicit unsubscribe, all three methods
/// become no-ops.
pub struct Emitter<T> {
    state: Rc<SubscriptionState<T>>,
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: 'static> Emitter<T> {
    pub(crate) fn new(state: Rc<SubscriptionState<T>>) -> Self {
        Self { state }
    }

    /// Pushes the next value to the consumer.
    ///
    /// Dropped silently once the subscription has terminated or been
    /// unsubscribed.
    pub fn next(&self, value: T) {
        self.state.next(value);
    }

    /// Signals producer failure. Terminal: the first `error`/`complete` wins
    /// and cancels the subscription before the consumer is notified.
    pub fn error(&self, error: StreamError) {
        self.state.error(error);
    }

    /// Signals successful completion. Terminal, like [`Emitter::error`].
    pub fn complete(&self) {
        self.state.complete();
    }

    /// Returns `true` once the subscription no longer accepts signals.
    ///
    /// Long-running producers can poll this to stop doing work early, the
    /// same way a cancellable task checks its token.
    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }
}
