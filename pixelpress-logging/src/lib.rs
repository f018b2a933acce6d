//! Structured logging infrastructure for Pixelpress
//!
//! Thin layer over `tracing-subscriber` that turns a
//! [`LoggingConfig`](pixelpress_config::LoggingConfig) into an installed
//! global subscriber. Initialisation is idempotent: a second call leaves the
//! first subscriber in place.

pub mod init;

pub use init::{build_env_filter, init_logging_from_config, init_simple_tracing};
