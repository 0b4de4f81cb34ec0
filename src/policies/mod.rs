//! Policies bounding operator behavior.
//!
//! Internal modules:
//! - [`retry`]: resubscription budget for the `retry` operator.

mod retry;

pub use retry::RetryPolicy;
