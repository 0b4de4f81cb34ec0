//! Built-in observers (feature-gated helpers for demos and debugging).

mod log;

pub use log::LogWriter;
