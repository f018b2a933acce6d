//! Domain-specific configuration modules

pub mod logging;
pub mod metrics;
pub mod processing;
pub mod server;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main Pixelpress configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PixelpressConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: server::ServerConfig,

    /// Image processing pool configuration
    #[serde(default)]
    pub processing: processing::ProcessingConfig,

    /// Load test controller configuration
    #[serde(default)]
    pub load_test: load_test::LoadTestSettings,

    /// Metrics aggregation configuration
    #[serde(default)]
    pub metrics: metrics::MetricsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,
}

impl PixelpressConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.processing.validate()?;
        self.load_test.validate()?;
        self.metrics.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> ConfigResult<String> {
        Ok(serde_yaml::to_string(&Self::default())?)
    }
}
