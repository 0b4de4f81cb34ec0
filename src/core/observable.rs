//! # Observable: immutable wrapper around one worker.
//!
//! An [`Observable`] holds exactly one [`WorkerRef`] and nothing else. It has
//! no mutable state and no side effects until subscribed; every `subscribe`
//! call runs the worker once more, independently (cold semantics). Operators
//! and factories only ever build *new* observables around new workers.
//!
//! The [`interval`](Observable::interval) factory is the one timer-backed
//! producer living here; the rest of the timer story (`delay`) is an
//! operator. Both spawn their timers with [`tokio::task::spawn_local`] and
//! cancel them through a [`CancellationToken`], so they must be subscribed
//! inside a [`tokio::task::LocalSet`].

use std::time::Duration;

use tokio::{select, task, time};
use tokio_util::sync::CancellationToken;

use crate::core::emitter::Emitter;
use crate::core::observer::{FnObserver, Observer};
use crate::core::subscription::Subscription;
use crate::core::worker::{Teardown, WorkerFn, WorkerRef};
use crate::error::StreamError;

/// Immutable factory for subscriptions.
///
/// Cheap to clone: clones share the same worker and remain equivalent.
/// See the [crate docs](crate) for the full contract.
pub struct Observable<T> {
    worker: WorkerRef<T>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            worker: std::rc::Rc::clone(&self.worker),
        }
    }
}

impl<T: 'static> Observable<T> {
    /// Wraps a closure worker. No side effects until subscribed.
    ///
    /// # Example
    /// ```
    /// use coldstream::{Emitter, Observable};
    ///
    /// let numbers = Observable::create(|emitter: Emitter<u32>| {
    ///     emitter.next(1);
    ///     emitter.next(2);
    ///     emitter.complete();
    ///     None
    /// });
    ///
    /// let subscription = numbers.subscribe_next(|v| println!("got {v}"));
    /// assert!(subscription.is_completed());
    /// ```
    pub fn create<F>(worker: F) -> Self
    where
        F: Fn(Emitter<T>) -> Option<Teardown> + 'static,
    {
        Self::from_worker(WorkerFn::rc(worker))
    }

    /// Wraps any shared worker handle.
    pub fn from_worker(worker: WorkerRef<T>) -> Self {
        Self { worker }
    }

    /// Starts one independent producer execution wired to `observer`.
    ///
    /// The worker is invoked synchronously during this call; it may emit (or
    /// even terminate) before the [`Subscription`] is returned.
    pub fn subscribe<O>(&self, observer: O) -> Subscription
    where
        O: Observer<T>,
    {
        Subscription::start(&self.worker, Box::new(observer))
    }

    /// Subscribes with three closures. Handlers you do not care about are
    /// spelled `|_| {}` / `|| {}`; see [`Observable::subscribe_next`] for the
    /// values-only shorthand.
    pub fn subscribe_fn<N, E, C>(&self, on_next: N, on_error: E, on_complete: C) -> Subscription
    where
        N: Fn(T) + 'static,
        E: Fn(StreamError) + 'static,
        C: Fn() + 'static,
    {
        self.subscribe(FnObserver::new(on_next, on_error, on_complete))
    }

    /// Subscribes with a value handler only; errors and completion are
    /// silently discarded.
    pub fn subscribe_next<N>(&self, on_next: N) -> Subscription
    where
        N: Fn(T) + 'static,
    {
        self.subscribe_fn(on_next, |_error| {}, || {})
    }
}

impl Observable<u64> {
    /// Infinite tick sequence: emits 1, 2, 3, … each `period` apart.
    ///
    /// Never completes by itself. Its teardown stops the timer and then
    /// signals completion through the emitter — the only producer in this
    /// crate that completes from its teardown — so an explicit `unsubscribe`
    /// still tells the consumer the ticks are over.
    ///
    /// Must be subscribed inside a [`tokio::task::LocalSet`].
    pub fn interval(period: Duration) -> Observable<u64> {
        Observable::create(move |emitter: Emitter<u64>| {
            let token = CancellationToken::new();
            let timer_token = token.clone();
            let ticker = emitter.clone();
            task::spawn_local(async move {
                let mut counter: u64 = 0;
                loop {
                    select! {
                        _ = time::sleep(period) => {
                            counter += 1;
                            ticker.next(counter);
                        }
                        _ = timer_token.cancelled() => break,
                    }
                }
            });

            Some(Box::new(move || {
                token.cancel();
                emitter.complete();
            }))
        })
    }
}
