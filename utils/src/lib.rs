//! Shared utilities for MyCoin tools.

pub mod logging;

pub use logging::{init_logging, LogFormat, UnknownLogFormat};
