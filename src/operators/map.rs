//! # Synchronous value projection.

use std::rc::Rc;

use crate::core::{Emitter, Observable};

impl<T: 'static> Observable<T> {
    /// Forwards `next(project(v))` for each source value; error and
    /// completion pass through unchanged. Teardown unsubscribes the source.
    ///
    /// Fully synchronous: no suspension point is introduced.
    ///
    /// # Example
    /// ```
    /// use coldstream::{Emitter, Observable};
    ///
    /// let source = Observable::create(|emitter: Emitter<u32>| {
    ///     emitter.next(21);
    ///     emitter.complete();
    ///     None
    /// });
    ///
    /// source.map(|v| v * 2).subscribe_next(|v| assert_eq!(v, 42));
    /// ```
    pub fn map<U, F>(&self, project: F) -> Observable<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        let source = self.clone();
        let project = Rc::new(project);
        Observable::create(move |emitter: Emitter<U>| {
            let project = Rc::clone(&project);
            let next = emitter.clone();
            let error = emitter.clone();
            let subscription = source.subscribe_fn(
                move |value| next.next(project(value)),
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
    use crate::error::StreamError;

    #[test]
    fn test_map_projects_in_order() {
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
        source
            .map(|v| v * 10)
            .subscribe_fn(move |v| sink.borrow_mut().push(v), |_e| {}, move || done.set(true));

        assert_eq!(*seen.borrow(), vec![10, 20, 30]);
        assert!(completed.get());
    }

    #[test]
    fn test_map_forwards_error_unchanged() {
        let source = Observable::create(|emitter: Emitter<i64>| {
            emitter.next(1);
            emitter.error(StreamError::fail("boom"));
            None
        });

        let errors = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&errors);
        source
            .map(|v| v + 1)
            .subscribe_fn(|_v| {}, move |e| sink.borrow_mut().push(e), || {});

        assert_eq!(*errors.borrow(), vec![StreamError::fail("boom")]);
    }

    #[test]
    fn test_map_teardown_unsubscribes_source() {
        let teardowns = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&teardowns);
        let source = Observable::create(move |_emitter: Emitter<i64>| {
            let counter = Rc::clone(&counter);
            Some(Box::new(move || counter.set(counter.get() + 1)) as Box<dyn FnOnce()>)
        });

        let subscription = source.map(|v| v).subscribe_next(|_v| {});
        subscription.unsubscribe();
        subscription.unsubscribe();

        assert_eq!(teardowns.get(), 1);
    }
}
