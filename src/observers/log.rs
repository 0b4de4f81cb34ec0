use std::fmt::Debug;

use crate::core::Observer;
use crate::error::StreamError;

/// Base observer that logs every signal to stdout.
///
/// Enabled via the `logging` feature. Useful for demos and debugging.
pub struct LogWriter;

impl<T: Debug + 'static> Observer<T> for LogWriter {
    fn on_next(&self, value: T) {
        println!("[next] value={value:?}");
    }

    fn on_error(&self, error: StreamError) {
        println!("[error] label={} msg={}", error.as_label(), error.as_message());
    }

    fn on_complete(&self) {
        println!("[complete]");
    }
}
