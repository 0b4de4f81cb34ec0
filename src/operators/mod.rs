//! Operators over [`Observable`](crate::Observable).
//!
//! Every operator is a pure composition: it builds a new observable whose
//! worker subscribes to the source(s) through the public `create` +
//! `subscribe`/`unsubscribe` surface, with no privileged access to
//! subscription internals. None of them mutate the receiver.
//!
//! Internal modules:
//! - [`map`]: synchronous value projection;
//! - [`filtering`]: `distinct_until_changed` and `start_with`;
//! - [`retry`]: resubscribe-on-error with a [`RetryPolicy`](crate::RetryPolicy) budget;
//! - [`flatten`]: the higher-order trio `flat_map` / `switch_map` / `exhaust_map`;
//! - [`delay`]: timer-deferred source subscription.

mod delay;
mod filtering;
mod flatten;
mod map;
mod retry;
