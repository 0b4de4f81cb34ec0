//! Error type carried through observable pipelines.
//!
//! A subscription has exactly one error channel: a producer may signal a
//! single [`StreamError`] through [`Emitter::error`](crate::Emitter::error),
//! which terminates that subscription. The engine never interprets the value;
//! it is forwarded to the consumer's `on_error` as-is. The only component
//! that intercepts errors is the `retry` operator, which resubscribes instead
//! of forwarding until its budget runs out.

use thiserror::Error;

/// # Error signaled by a producer.
///
/// Terminal for the subscription it occurs on: after an error, no further
/// `next`, `error`, or `complete` reaches the consumer. The value is opaque
/// to the engine and is cloneable so `retry` can re-forward the final one.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// Producer failed with a message.
    #[error("producer failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Producer aborted without supplying any detail.
    #[error("producer aborted")]
    Aborted,
}

impl StreamError {
    /// Creates a [`StreamError::Fail`] from any message.
    ///
    /// # Example
    /// ```
    /// use coldstream::StreamError;
    ///
    /// let err = StreamError::fail("connection reset");
    /// assert_eq!(err.as_message(), "error: connection reset");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        StreamError::Fail { error: error.into() }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use coldstream::StreamError;
    ///
    /// assert_eq!(StreamError::Aborted.as_label(), "stream_aborted");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            StreamError::Fail { .. } => "stream_failed",
            StreamError::Aborted => "stream_aborted",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            StreamError::Fail { error } => format!("error: {error}"),
            StreamError::Aborted => "aborted".to_string(),
        }
    }
}
