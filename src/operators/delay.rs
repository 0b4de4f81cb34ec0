//! # Timer-deferred subscription.
//!
//! `delay` defers the *source subscription itself* behind a one-shot timer:
//! nothing runs, and no value can arrive, until the timer fires. The timer is
//! a scoped resource — acquired on subscribe, released on every exit path
//! (completion, error, explicit unsubscribe) through the cancellation token.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tokio::{select, task, time};
use tokio_util::sync::CancellationToken;

use crate::core::{Emitter, Observable, Subscription};

impl<T: 'static> Observable<T> {
    /// Subscribes the source only after `timeout` has elapsed.
    ///
    /// Unsubscribing before the timer fires cancels the timer and the source
    /// is never subscribed to; afterwards, unsubscribing tears down the live
    /// source subscription. The source's own values, error, and completion
    /// pass through unchanged (subject to the source's own timing).
    ///
    /// Must be subscribed inside a [`tokio::task::LocalSet`].
    pub fn delay(&self, timeout: Duration) -> Observable<T> {
        let source = self.clone();
        Observable::create(move |emitter: Emitter<T>| {
            let token = CancellationToken::new();
            let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

            let timer_token = token.clone();
            let timer_slot = Rc::clone(&slot);
            let timer_source = source.clone();
            task::spawn_local(async move {
                select! {
                    _ = time::sleep(timeout) => {
                        let next = emitter.clone();
                        let error = emitter.clone();
                        let subscription = timer_source.subscribe_fn(
                            move |value| next.next(value),
                            move |err| error.error(err),
                            move || emitter.complete(),
                        );
                        // A source that finished synchronously needs no slot.
                        if !subscription.is_unsubscribed() {
                            *timer_slot.borrow_mut() = Some(subscription);
                        }
                    }
                    _ = timer_token.cancelled() => {}
                }
            });

            Some(Box::new(move || {
                token.cancel();
                let active = slot.borrow_mut().take();
                if let Some(subscription) = active {
                    subscription.unsubscribe();
                }
            }))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    use tokio::{task, time};

    use crate::core::{Emitter, Observable};

    #[tokio::test(start_paused = true)]
    async fn test_delay_holds_values_until_timeout() {
        let local = task::LocalSet::new();
        local
            .run_until(async {
                let source = Observable::create(|emitter: Emitter<i64>| {
                    for v in [1, 2, 3] {
                        emitter.next(v);
                    }
                    emitter.complete();
                    None
                });

                let seen = Rc::new(RefCell::new(Vec::new()));
                let sink = Rc::clone(&seen);
                let completed = Rc::new(Cell::new(false));
                let done = Rc::clone(&completed);
                source.delay(Duration::from_millis(200)).subscribe_fn(
                    move |v| sink.borrow_mut().push(v),
                    |_e| {},
                    move || done.set(true),
                );

                time::sleep(Duration::from_millis(199)).await;
                assert!(seen.borrow().is_empty(), "nothing before the timeout");
                assert!(!completed.get());

                time::sleep(Duration::from_millis(2)).await;
                assert_eq!(*seen.borrow(), vec![1, 2, 3]);
                assert!(completed.get());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsubscribe_before_timer_never_subscribes_source() {
        let local = task::LocalSet::new();
        local
            .run_until(async {
                let runs = Rc::new(Cell::new(0u32));
                let counter = Rc::clone(&runs);
                let source = Observable::create(move |emitter: Emitter<i64>| {
                    counter.set(counter.get() + 1);
                    emitter.complete();
                    None
                });

                let subscription = source.delay(Duration::from_millis(100)).subscribe_next(|_v| {});
                time::sleep(Duration::from_millis(50)).await;
                subscription.unsubscribe();
                time::sleep(Duration::from_millis(100)).await;

                assert_eq!(runs.get(), 0, "timer was cancelled before it fired");
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsubscribe_after_timer_tears_down_source() {
        let local = task::LocalSet::new();
        local
            .run_until(async {
                let teardowns = Rc::new(Cell::new(0u32));
                let counter = Rc::clone(&teardowns);
                let source = Observable::create(move |_emitter: Emitter<i64>| {
                    let counter = Rc::clone(&counter);
                    Some(Box::new(move || counter.set(counter.get() + 1)) as Box<dyn FnOnce()>)
                });

                let subscription = source.delay(Duration::from_millis(10)).subscribe_next(|_v| {});
                time::sleep(Duration::from_millis(20)).await;
                subscription.unsubscribe();

                assert_eq!(teardowns.get(), 1);
            })
            .await;
    }
}
