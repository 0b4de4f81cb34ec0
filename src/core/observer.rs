//! # Consumer contract.
//!
//! [`Observer`] is the extension point for the receiving side of a
//! subscription. All three handlers have provided no-op defaults, so a
//! consumer implements only what it cares about; an error nobody listens to
//! is discarded silently rather than escalated.
//!
//! [`FnObserver`] adapts three plain closures; it is what
//! [`Observable::subscribe_fn`](crate::Observable::subscribe_fn) builds under
//! the hood.
//!
//! ## Rules
//! - Handlers are called synchronously, on the one logical thread, in signal
//!   order: every `on_next` happens before the terminal handler (if any).
//! - At most one of `on_error`/`on_complete` is ever called.
//! - Handlers take `&self`; per-consumer mutable state goes through interior
//!   mutability (`Cell`/`RefCell`), consistent with the single-thread model.

use crate::error::StreamError;

/// Consumer of one subscription's signals.
///
/// # Example
/// ```
/// use std::cell::Cell;
/// use coldstream::{Observer, StreamError};
///
/// struct Counter(Cell<u64>);
///
/// impl Observer<u64> for Counter {
///     fn on_next(&self, _value: u64) {
///         self.0.set(self.0.get() + 1);
///     }
///     // on_error / on_complete keep their no-op defaults
/// }
/// # let _ = Counter(Cell::new(0));
/// # fn assert_observer<O: Observer<u64>>(_o: &O) {}
/// ```
pub trait Observer<T>: 'static {
    /// Receives the next value.
    fn on_next(&self, value: T) {
        let _ = value;
    }

    /// Receives the terminal error, if the producer fails.
    fn on_error(&self, error: StreamError) {
        let _ = error;
    }

    /// Receives the terminal completion, if the producer succeeds.
    fn on_complete(&self) {}
}

/// Closure-backed observer.
///
/// Bundles three `Fn` closures into an [`Observer`]. Built by
/// [`Observable::subscribe_fn`](crate::Observable::subscribe_fn); construct it
/// directly when you want to reuse one observer value across subscribe calls.
pub struct FnObserver<N, E, C> {
    on_next: N,
    on_error: E,
    on_complete: C,
}

impl<N, E, C> FnObserver<N, E, C> {
    /// Creates an observer from the three handlers.
    pub fn new(on_next: N, on_error: E, on_complete: C) -> Self {
        Self {
            on_next,
            on_error,
            on_complete,
        }
    }
}

impl<T, N, E, C> Observer<T> for FnObserver<N, E, C>
where
    T: 'static,
    N: Fn(T) + 'static,
    E: Fn(StreamError) + 'static,
    C: Fn() + 'static,
{
    fn on_next(&self, value: T) {
        (self.on_next)(value);
    }

    fn on_error(&self, error: StreamError) {
        (self.on_error)(error);
    }

    fn on_complete(&self) {
        (self.on_complete)();
    }
}
