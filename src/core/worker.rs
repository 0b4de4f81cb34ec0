//! # Producer contract and function-backed implementation.
//!
//! This module defines the [`Worker`] trait (the producer side of every
//! observable) and a convenient function-backed implementation [`WorkerFn`].
//! The common handle type is [`WorkerRef`], an `Rc<dyn Worker<T>>` shared by
//! the observable and every clone of it.
//!
//! A worker is invoked exactly once per subscription and receives an
//! [`Emitter`] through which it pushes signals. It may emit synchronously
//! during its own invocation, later from timer tasks, or both.
//!
//! ## Rules
//! - Zero or more `next` calls, then at most one of `error`/`complete`
//!   (whichever fires first wins; later terminal calls are dropped).
//! - Emitting after self-termination is harmless: the subscription gates it.
//! - The returned [`Teardown`], if any, must be safe to call even when the
//!   worker never emitted anything.

use std::rc::Rc;

use crate::core::emitter::Emitter;

/// Cleanup action returned by a worker.
///
/// Runs exactly once when the subscription ends, whether by completion,
/// error, or explicit [`Subscription::unsubscribe`](crate::Subscription::unsubscribe).
/// Returning `None` from a worker is valid; absent cleanup is a no-op.
pub type Teardown = Box<dyn FnOnce()>;

/// Shared producer handle held by an [`Observable`](crate::Observable).
pub type WorkerRef<T> = Rc<dyn Worker<T>>;

/// # Push producer.
///
/// A `Worker` produces one independent execution per subscription: [`run`](Worker::run)
/// is called exactly once, at subscribe time, and the signals it pushes
/// through the [`Emitter`] belong to that subscription alone.
///
/// # Example
/// ```
/// use coldstream::{Emitter, Teardown, Worker};
///
/// struct Countdown(u32);
///
/// impl Worker<u32> for Countdown {
///     fn run(&self, emitter: Emitter<u32>) -> Option<Teardown> {
///         for n in (1..=self.0).rev() {
///             emitter.next(n);
///         }
///         emitter.complete();
///         None
///     }
/// }
/// ```
pub trait Worker<T>: 'static {
    /// Executes one producer run for a fresh subscription.
    ///
    /// The optional return value becomes the subscription's teardown. It is
    /// invoked on cancellation, including the implicit cancellation performed
    /// by a terminal event.
    fn run(&self, emitter: Emitter<T>) -> Option<Teardown>;
}

/// Function-backed worker implementation.
///
/// Wraps a closure that *is* one producer run. The closure is `Fn`, not
/// `FnMut`: every subscription re-invokes it with a fresh emitter, and there
/// is no hidden state shared between runs. Shared state, when genuinely
/// needed, goes through an explicit `Rc<...>` inside the closure.
pub struct WorkerFn<F> {
    f: F,
}

impl<F> WorkerFn<F> {
    /// Creates a new function-backed worker.
    ///
    /// Prefer [`WorkerFn::rc`] when you immediately need a [`WorkerRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the worker and returns it as a shared handle.
    pub fn rc(f: F) -> Rc<Self> {
        Rc::new(Self::new(f))
    }
}

impl<T, F> Worker<T> for WorkerFn<F>
where
    T: 'static,
    F: Fn(Emitter<T>) -> Option<Teardown> + 'static, // Fn, not FnMut
{
    fn run(&self, emitter: Emitter<T>) -> Option<Teardown> {
        (self.f)(emitter)
    }
}
