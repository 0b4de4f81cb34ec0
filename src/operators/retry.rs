//! # Resubscribe-on-error.
//!
//! `retry` intercepts source errors and resubscribes the *original* source
//! until its [`RetryPolicy`] budget runs out, then forwards the error
//! downstream. Values and completion pass through unchanged.
//!
//! ## Iterative pump
//! Errors may arrive synchronously, during the resubscribe call itself. A
//! recursive "resubscribe from inside on_error" would then grow the stack
//! without bound. Instead, resubscription is driven by a pump loop guarded by
//! two flags:
//!
//! ```text
//! on_error: budget left? ──► pending = true ──► pump()
//!
//! pump():
//!   pumping? ──► yes: another lap already requested, return
//!   pumping = true
//!   while pending {
//!     pending = false
//!     unsubscribe previous attempt
//!     subscribe source            ◄── a synchronous error lands here,
//!   }                                 sets pending, and the loop absorbs it
//!   pumping = false
//! ```
//!
//! An asynchronous error finds the pump idle and drives the loop itself, so
//! stack depth stays constant either way.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::{Emitter, Observable, Subscription};
use crate::policies::RetryPolicy;

struct RetryState {
    /// Remaining resubscriptions; `None` is unbounded and never decremented.
    remaining: Cell<Option<u64>>,
    current: RefCell<Option<Subscription>>,
    pumping: Cell<bool>,
    pending: Cell<bool>,
}

impl<T: 'static> Observable<T> {
    /// On source error, unsubscribes the failed attempt and resubscribes the
    /// original source; once the `policy` budget reaches zero, the error is
    /// forwarded downstream instead. The budget is checked before it is
    /// decremented, so `RetryPolicy::Limit(n)` performs exactly `n`
    /// resubscriptions (`n + 1` attempts in total).
    ///
    /// `next` and `complete` pass through unchanged. Synchronously erroring
    /// sources are handled iteratively; see the module docs.
    pub fn retry(&self, policy: RetryPolicy) -> Observable<T> {
        let source = self.clone();
        Observable::create(move |emitter: Emitter<T>| {
            let state = Rc::new(RetryState {
                remaining: Cell::new(policy.budget()),
                current: RefCell::new(None),
                pumping: Cell::new(false),
                pending: Cell::new(false),
            });

            state.pending.set(true);
            pump(&source, &emitter, &state);

            let state = Rc::clone(&state);
            Some(Box::new(move || {
                let current = state.current.borrow_mut().take();
                if let Some(subscription) = current {
                    subscription.unsubscribe();
                }
            }))
        })
    }
}

/// Drives attempts until one of them survives its subscribe call.
fn pump<T: 'static>(source: &Observable<T>, emitter: &Emitter<T>, state: &Rc<RetryState>) {
    if state.pumping.get() {
        // A lap is already running below us on the stack; it will pick the
        // pending request up.
        return;
    }
    state.pumping.set(true);

    while state.pending.get() {
        state.pending.set(false);

        let previous = state.current.borrow_mut().take();
        if let Some(subscription) = previous {
            subscription.unsubscribe();
        }

        let subscription = {
            let next = emitter.clone();
            let error = emitter.clone();
            let complete = emitter.clone();
            let resub_source = source.clone();
            let resub_state = Rc::clone(state);
            source.subscribe_fn(
                move |value| next.next(value),
                move |err| match resub_state.remaining.get() {
                    Some(0) => error.error(err),
                    remaining => {
                        if let Some(n) = remaining {
                            resub_state.remaining.set(Some(n - 1));
                        }
                        resub_state.pending.set(true);
                        pump(&resub_source, &error, &resub_state);
                    }
                },
                move || complete.complete(),
            )
        };

        // Store the attempt only if it did not already request another lap;
        // a synchronously failed attempt has cancelled itself.
        if !state.pending.get() {
            *state.current.borrow_mut() = Some(subscription);
        }
    }

    state.pumping.set(false);
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::core::{Emitter, Observable};
    use crate::error::StreamError;
    use crate::policies::RetryPolicy;

    /// Source that emits one incrementing value per attempt, then errors.
    fn flaky_counter(attempts: &Rc<Cell<u64>>) -> Observable<u64> {
        let attempts = Rc::clone(attempts);
        Observable::create(move |emitter: Emitter<u64>| {
            let attempt = attempts.get() + 1;
            attempts.set(attempt);
            emitter.next(attempt);
            emitter.error(StreamError::fail("flaky"));
            None
        })
    }

    #[test]
    fn test_limited_retry_forwards_final_error() {
        let attempts = Rc::new(Cell::new(0u64));
        let source = flaky_counter(&attempts);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let errors = Rc::new(RefCell::new(Vec::new()));
        let failed = Rc::clone(&errors);
        let completes = Rc::new(Cell::new(0u32));
        let done = Rc::clone(&completes);
        source.retry(RetryPolicy::Limit(5)).subscribe_fn(
            move |v| sink.borrow_mut().push(v),
            move |e| failed.borrow_mut().push(e),
            move || done.set(done.get() + 1),
        );

        assert_eq!(*seen.borrow(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(*errors.borrow(), vec![StreamError::fail("flaky")]);
        assert_eq!(completes.get(), 0);
        assert_eq!(attempts.get(), 6, "initial attempt plus five retries");
    }

    #[test]
    fn test_limit_zero_forwards_first_error() {
        let attempts = Rc::new(Cell::new(0u64));
        let source = flaky_counter(&attempts);

        let errors = Rc::new(Cell::new(0u32));
        let failed = Rc::clone(&errors);
        source.retry(RetryPolicy::Limit(0)).subscribe_fn(
            |_v| {},
            move |_e| failed.set(failed.get() + 1),
            || {},
        );

        assert_eq!(attempts.get(), 1);
        assert_eq!(errors.get(), 1);
    }

    #[test]
    fn test_synchronous_error_storm_does_not_grow_the_stack() {
        // Deep enough that naive recursion would overflow.
        let attempts = Rc::new(Cell::new(0u64));
        let source = flaky_counter(&attempts);

        let errors = Rc::new(Cell::new(0u32));
        let failed = Rc::clone(&errors);
        source.retry(RetryPolicy::Limit(50_000)).subscribe_fn(
            |_v| {},
            move |_e| failed.set(failed.get() + 1),
            || {},
        );

        assert_eq!(attempts.get(), 50_001);
        assert_eq!(errors.get(), 1);
    }

    #[test]
    fn test_unlimited_retry_until_success() {
        let attempts = Rc::new(Cell::new(0u64));
        let tries = Rc::clone(&attempts);
        let source = Observable::create(move |emitter: Emitter<u64>| {
            let attempt = tries.get() + 1;
            tries.set(attempt);
            if attempt < 4 {
                emitter.error(StreamError::fail("not yet"));
            } else {
                emitter.next(42);
                emitter.complete();
            }
            None
        });

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let completes = Rc::new(Cell::new(0u32));
        let done = Rc::clone(&completes);
        let subscription = source.retry(RetryPolicy::Unlimited).subscribe_fn(
            move |v| sink.borrow_mut().push(v),
            |_e| {},
            move || done.set(done.get() + 1),
        );

        assert_eq!(attempts.get(), 4);
        assert_eq!(*seen.borrow(), vec![42]);
        assert_eq!(completes.get(), 1);
        assert!(subscription.is_completed());
    }

    #[test]
    fn test_teardown_cancels_current_attempt() {
        let teardowns = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&teardowns);
        let source = Observable::create(move |_emitter: Emitter<u64>| {
            let counter = Rc::clone(&counter);
            Some(Box::new(move || counter.set(counter.get() + 1)) as Box<dyn FnOnce()>)
        });

        let subscription = source.retry(RetryPolicy::Unlimited).subscribe_next(|_v| {});
        subscription.unsubscribe();

        assert_eq!(teardowns.get(), 1);
    }
}
