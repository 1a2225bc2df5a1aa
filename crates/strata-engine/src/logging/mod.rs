//! Logger setup for binaries embedding the renderer.
//!
//! The library itself only emits through the `log` facade: shader rejections and
//! unsupported calls at `warn`, batch flushes and depth wraps at `debug`.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
