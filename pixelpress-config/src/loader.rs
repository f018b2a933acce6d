//! Configuration loading and environment variable handling

use crate::domains::logging::{LogFormat, LogLevel, LoggingConfig};
use crate::domains::metrics::MetricsConfig;
use crate::domains::processing::{OutputFormat, ProcessingConfig};
use crate::domains::server::ServerConfig;
use crate::domains::PixelpressConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Loads [`PixelpressConfig`] from an optional file, then applies
/// `<PREFIX>_*` environment overrides and validates every domain.
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "PIXELPRESS".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML or JSON file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<PixelpressConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: PixelpressConfig = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<PixelpressConfig> {
        let mut config = PixelpressConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<PixelpressConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut PixelpressConfig) -> ConfigResult<()> {
        self.apply_server_overrides(&mut config.server)?;
        self.apply_processing_overrides(&mut config.processing)?;
        self.apply_metrics_overrides(&mut config.metrics)?;
        self.apply_logging_overrides(&mut config.logging)?;
        Ok(())
    }

    fn apply_server_overrides(&self, config: &mut ServerConfig) -> ConfigResult<()> {
        if let Ok(bind) = self.get_env_var("SERVER_BIND_ADDRESS") {
            config.bind_address = bind;
        }

        if let Some(port) = self.parse_env_var("SERVER_PORT")? {
            config.port = port;
        }

        if let Some(limit) = self.parse_env_var("MAX_UPLOAD_BYTES")? {
            config.max_upload_bytes = limit;
        }

        Ok(())
    }

    fn apply_processing_overrides(&self, config: &mut ProcessingConfig) -> ConfigResult<()> {
        if let Some(workers) = self.parse_env_var("WORKER_COUNT")? {
            config.worker_count = workers;
        }

        if let Some(capacity) = self.parse_env_var("QUEUE_CAPACITY")? {
            config.queue_capacity = capacity;
        }

        if let Some(batch) = self.parse_env_var("MAX_BATCH_SIZE")? {
            config.max_batch_size = batch;
        }

        if let Ok(format) = self.get_env_var("OUTPUT_FORMAT") {
            config.output_format = OutputFormat::from_str(&format)
                .map_err(|e| self.env_error("OUTPUT_FORMAT", e))?;
        }

        Ok(())
    }

    fn apply_metrics_overrides(&self, config: &mut MetricsConfig) -> ConfigResult<()> {
        if let Some(seconds) = self.parse_env_var::<u64>("METRICS_WINDOW_SECONDS")? {
            config.window = Duration::from_secs(seconds);
        }

        Ok(())
    }

    fn apply_logging_overrides(&self, config: &mut LoggingConfig) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level =
                LogLevel::from_str(&log_level).map_err(|e| self.env_error("LOG_LEVEL", e))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format =
                LogFormat::from_str(&format).map_err(|e| self.env_error("LOG_FORMAT", e))?;
        }

        Ok(())
    }

    fn var_name(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name)
    }

    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(self.var_name(name))
    }

    fn env_error(&self, name: &str, reason: impl std::fmt::Display) -> ConfigError {
        ConfigError::InvalidEnv {
            var: self.var_name(name),
            reason: reason.to_string(),
        }
    }

    /// Parse an optional prefixed environment variable
    fn parse_env_var<T>(&self, name: &str) -> ConfigResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get_env_var(name) {
            Ok(raw) => raw
                .parse()
                .map(Some)
                .map_err(|e| self.env_error(name, e)),
            Err(_) => Ok(None),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
