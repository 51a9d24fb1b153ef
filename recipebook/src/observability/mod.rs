//! Observability module
//!
//! Logging infrastructure for `recipebook` runs.

pub mod logging;

pub use logging::{LogFormat, LogOptions, init_logging};
