//! # Higher-order operators: `flat_map`, `switch_map`, `exhaust_map`.
//!
//! Each projects source values into *inner* observables and flattens their
//! emissions downstream. They differ only in how they juggle inner
//! subscriptions:
//!
//! ```text
//! flat_map     every inner runs; complete when outer AND all inners did
//! switch_map   newest inner wins; a new source value cancels the previous
//! exhaust_map  first inner wins; source values are dropped while one runs
//! ```
//!
//! ## Rules
//! - Inner `next`/`error` forward straight downstream; an inner error is
//!   terminal for the whole composition.
//! - No ordering is guaranteed *between* inners; each inner's own emissions
//!   stay in order.
//! - Teardown unsubscribes the outer subscription and every still-active
//!   inner.
//! - Inners are tracked in owned, id-addressed slots rather than captured
//!   handle variables: an inner may complete synchronously, inside its own
//!   subscribe call, before any handle exists to capture.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::{Emitter, Observable, Subscription};

impl<T: 'static> Observable<T> {
    /// Projects every source value into an inner observable and merges all of
    /// them downstream. Completes only after the source has completed *and*
    /// every inner it spawned has completed.
    pub fn flat_map<U, P>(&self, project: P) -> Observable<U>
    where
        U: 'static,
        P: Fn(T) -> Observable<U> + 'static,
    {
        let source = self.clone();
        let project = Rc::new(project);
        Observable::create(move |emitter: Emitter<U>| {
            // Active inner subscriptions, addressed by spawn id; completed
            // inners remove themselves.
            let inners: Rc<RefCell<Vec<(u64, Subscription)>>> = Rc::new(RefCell::new(Vec::new()));
            let outer_done = Rc::new(Cell::new(false));
            let next_id = Cell::new(0u64);

            let outer = {
                let forward = emitter.clone();
                let error_out = emitter.clone();
                let complete_out = emitter.clone();
                let inners_spawn = Rc::clone(&inners);
                let inners_fin = Rc::clone(&inners);
                let outer_done_spawn = Rc::clone(&outer_done);
                let outer_done_fin = Rc::clone(&outer_done);
                let project = Rc::clone(&project);
                source.subscribe_fn(
                    move |value| {
                        if forward.is_closed() {
                            // The composition already terminated (an inner
                            // errored); stop projecting.
                            return;
                        }
                        let id = next_id.get();
                        next_id.set(id + 1);

                        let inner_next = forward.clone();
                        let inner_error = forward.clone();
                        let inner_done = forward.clone();
                        let inners_rm = Rc::clone(&inners_spawn);
                        let outer_done = Rc::clone(&outer_done_spawn);
                        let subscription = project(value).subscribe_fn(
                            move |inner_value| inner_next.next(inner_value),
                            move |err| inner_error.error(err),
                            move || {
                                inners_rm.borrow_mut().retain(|(held, _)| *held != id);
                                if outer_done.get() && inners_rm.borrow().is_empty() {
                                    inner_done.complete();
                                }
                            },
                        );
                        // A synchronously finished inner already left the set.
                        if !subscription.is_unsubscribed() {
                            inners_spawn.borrow_mut().push((id, subscription));
                        }
                    },
                    move |err| error_out.error(err),
                    move || {
                        outer_done_fin.set(true);
                        if inners_fin.borrow().is_empty() {
                            complete_out.complete();
                        }
                    },
                )
            };

            let inners = Rc::clone(&inners);
            Some(Box::new(move || {
                outer.unsubscribe();
                let active = std::mem::take(&mut *inners.borrow_mut());
                for (_, subscription) in active {
                    subscription.unsubscribe();
                }
            }))
        })
    }

    /// Like [`flat_map`](Observable::flat_map), but keeps at most one inner
    /// alive: each new source value unsubscribes the previous inner (if still
    /// active) before subscribing the new one. Completion mirrors `flat_map`
    /// over the single current inner; with no inner pending, outer completion
    /// completes the composition immediately.
    pub fn switch_map<U, P>(&self, project: P) -> Observable<U>
    where
        U: 'static,
        P: Fn(T) -> Observable<U> + 'static,
    {
        let source = self.clone();
        let project = Rc::new(project);
        Observable::create(move |emitter: Emitter<U>| {
            // Generation guard: a stale inner's completion must not clear a
            // slot that has since been handed to its successor.
            let current: Rc<RefCell<Option<(u64, Subscription)>>> = Rc::new(RefCell::new(None));
            let outer_done = Rc::new(Cell::new(false));
            let generation = Cell::new(0u64);

            let outer = {
                let forward = emitter.clone();
                let error_out = emitter.clone();
                let complete_out = emitter.clone();
                let current_spawn = Rc::clone(&current);
                let current_fin = Rc::clone(&current);
                let outer_done_spawn = Rc::clone(&outer_done);
                let outer_done_fin = Rc::clone(&outer_done);
                let project = Rc::clone(&project);
                source.subscribe_fn(
                    move |value| {
                        if forward.is_closed() {
                            return;
                        }
                        let id = generation.get() + 1;
                        generation.set(id);

                        let previous = current_spawn.borrow_mut().take();
                        if let Some((_, subscription)) = previous {
                            if !subscription.is_unsubscribed() {
                                subscription.unsubscribe();
                            }
                        }

                        let inner_next = forward.clone();
                        let inner_error = forward.clone();
                        let inner_done = forward.clone();
                        let slot = Rc::clone(&current_spawn);
                        let outer_done = Rc::clone(&outer_done_spawn);
                        let subscription = project(value).subscribe_fn(
                            move |inner_value| inner_next.next(inner_value),
                            move |err| inner_error.error(err),
                            move || {
                                if outer_done.get() {
                                    inner_done.complete();
                                } else {
                                    let mut slot = slot.borrow_mut();
                                    if matches!(&*slot, Some((held, _)) if *held == id) {
                                        *slot = None;
                                    }
                                }
                            },
                        );
                        if !subscription.is_unsubscribed() {
                            *current_spawn.borrow_mut() = Some((id, subscription));
                        }
                    },
                    move |err| error_out.error(err),
                    move || {
                        outer_done_fin.set(true);
                        let idle = match &*current_fin.borrow() {
                            None => true,
                            Some((_, subscription)) => subscription.is_completed(),
                        };
                        if idle {
                            complete_out.complete();
                        }
                    },
                )
            };

            let current = Rc::clone(&current);
            Some(Box::new(move || {
                outer.unsubscribe();
                let active = current.borrow_mut().take();
                if let Some((_, subscription)) = active {
                    if !subscription.is_unsubscribed() {
                        subscription.unsubscribe();
                    }
                }
            }))
        })
    }

    /// Like [`switch_map`](Observable::switch_map), but never preempts: while
    /// an inner is active, new source values are dropped entirely. A new
    /// inner starts only once the previous one (if any) has finished.
    pub fn exhaust_map<U, P>(&self, project: P) -> Observable<U>
    where
        U: 'static,
        P: Fn(T) -> Observable<U> + 'static,
    {
        let source = self.clone();
        let project = Rc::new(project);
        Observable::create(move |emitter: Emitter<U>| {
            let current: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
            let outer_done = Rc::new(Cell::new(false));

            let outer = {
                let forward = emitter.clone();
                let error_out = emitter.clone();
                let complete_out = emitter.clone();
                let current_spawn = Rc::clone(&current);
                let current_fin = Rc::clone(&current);
                let outer_done_spawn = Rc::clone(&outer_done);
                let outer_done_fin = Rc::clone(&outer_done);
                let project = Rc::clone(&project);
                source.subscribe_fn(
                    move |value| {
                        if forward.is_closed() {
                            return;
                        }
                        let busy = match &*current_spawn.borrow() {
                            Some(subscription) => !subscription.is_unsubscribed(),
                            None => false,
                        };
                        if busy {
                            return;
                        }

                        let inner_next = forward.clone();
                        let inner_error = forward.clone();
                        let inner_done = forward.clone();
                        let slot = Rc::clone(&current_spawn);
                        let outer_done = Rc::clone(&outer_done_spawn);
                        let subscription = project(value).subscribe_fn(
                            move |inner_value| inner_next.next(inner_value),
                            move |err| inner_error.error(err),
                            move || {
                                if outer_done.get() {
                                    inner_done.complete();
                                } else {
                                    slot.borrow_mut().take();
                                }
                            },
                        );
                        if !subscription.is_unsubscribed() {
                            *current_spawn.borrow_mut() = Some(subscription);
                        }
                    },
                    move |err| error_out.error(err),
                    move || {
                        outer_done_fin.set(true);
                        let idle = match &*current_fin.borrow() {
                            None => true,
                            Some(subscription) => subscription.is_completed(),
                        };
                        if idle {
                            complete_out.complete();
                        }
                    },
                )
            };

            let current = Rc::clone(&current);
            Some(Box::new(move || {
                outer.unsubscribe();
                let active = current.borrow_mut().take();
                if let Some(subscription) = active {
                    if !subscription.is_unsubscribed() {
                        subscription.unsubscribe();
                    }
                }
            }))
        })
    }
}
