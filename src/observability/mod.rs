//! Observability module
//!
//! Logging setup for `ts-doc-gen` runs. Everything is written to stderr so
//! stdout stays free for the run summary.

pub mod logging;

pub use logging::{LogFormat, init_logging};
