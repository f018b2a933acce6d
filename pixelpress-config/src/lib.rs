//! Domain-driven configuration management for Pixelpress
//!
//! Configuration is split by functional domain (server, processing, load
//! testing, metrics, logging). Each domain carries serde defaults and
//! validation, and the [`ConfigLoader`] layers `PIXELPRESS_*` environment
//! overrides on top of an optional YAML file.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

// Re-export domain configurations
pub use domains::{
    load_test::LoadTestSettings,
    logging::{LogFormat, LogLevel, LoggingConfig},
    metrics::MetricsConfig,
    processing::{OutputFormat, ProcessingConfig},
    server::{CorsConfig, ServerConfig},
    PixelpressConfig,
};
