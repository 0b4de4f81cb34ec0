//! # Synchronous pass-through operators: `distinct_until_changed`, `start_with`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{Emitter, Observable};

impl<T> Observable<T>
where
    T: Clone + PartialEq + 'static,
{
    /// Forwards a value only when it differs from the last forwarded one.
    ///
    /// The comparison state starts at "none yet", so the first value always
    /// passes; only *immediately* repeated values collapse. Error and
    /// completion pass through unchanged.
    ///
    /// # Example
    /// ```
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    /// use coldstream::{Emitter, Observable};
    ///
    /// let source = Observable::create(|emitter: Emitter<u32>| {
    ///     for v in [1, 1, 2, 2, 1] {
    ///         emitter.next(v);
    ///     }
    ///     emitter.complete();
    ///     None
    /// });
    ///
    /// let seen = Rc::new(RefCell::new(Vec::new()));
    /// let sink = Rc::clone(&seen);
    /// source
    ///     .distinct_until_changed()
    ///     .subscribe_next(move |v| sink.borrow_mut().push(v));
    /// assert_eq!(*seen.borrow(), vec![1, 2, 1]);
    /// ```
    pub fn distinct_until_changed(&self) -> Observable<T> {
        let source = self.clone();
        Observable::create(move |emitter: Emitter<T>| {
            let last: Rc<RefCell<Option<T>>> = Rc::new(RefCell::new(None));
            let next = emitter.clone();
            let error = emitter.clone();
            let subscription = source.subscribe_fn(
                move |value: T| {
                    // Decide and record under the borrow, forward outside it:
                    // the consumer may reenter the pipeline.
                    let changed = {
                        let mut last = last.borrow_mut();
                        if last.as_ref() != Some(&value) {
                            *last = Some(value.clone());
                            true
                        } else {
                            false
                        }
                    };
                    if changed {
                        next.next(value);
                    }
                },
                move |err| error.error(err),
                move || emitter.complete(),
            );
            Some(Box::new(move || subscription.unsubscribe()))
        })
    }
}

impl<T> Observable<T>
where
    T: Clone + 'static,
{
    /// Synchronously emits `seed` to the consumer, then subscribes the
    /// source; everything the source does afterwards passes through
    /// unchanged.
    pub fn start_with(&self, seed: T) -> Observable<T> {
        let source = self.clone();
        Observable::create(move |emitter: Emitter<T>| {
            emitter.next(seed.clone());
            let next = emitter.clone();
            let error = emitter.clone();
            let subscription = source.subscribe_fn(
                move |value| next.next(value),
                move |err| error.error(err),
                move || emitter.complete(),
            );
            Some(Box::new(move || subscription.unsubscribe()))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::core::{Emitter, Observable};

    fn of(values: Vec<i64>) -> Observable<i64> {
        Observable::create(move |emitter: Emitter<i64>| {
            for v in &values {
                emitter.next(*v);
            }
            emitter.complete();
            None
        })
    }

    #[test]
    fn test_distinct_collapses_only_adjacent_repeats() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        of(vec![1, 1, 2, 3, 2, 4])
            .distinct_until_changed()
            .subscribe_next(move |v| sink.borrow_mut().push(v));

        assert_eq!(*seen.borrow(), vec![1, 2, 3, 2, 4]);
    }

    #[test]
    fn test_distinct_first_value_always_passes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        of(vec![5])
            .distinct_until_changed()
            .subscribe_next(move |v| sink.borrow_mut().push(v));

        assert_eq!(*seen.borrow(), vec![5]);
    }

    #[test]
    fn test_start_with_prepends_seed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let completed = Rc::new(Cell::new(false));
        let done = Rc::clone(&completed);
        of(vec![2, 3]).start_with(1).subscribe_fn(
            move |v| sink.borrow_mut().push(v),
            |_e| {},
            move || done.set(true),
        );

        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
        assert!(completed.get());
    }
}
