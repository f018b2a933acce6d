//! Image processing pool configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Worker pool and batch limits for `/api/process`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of worker threads; 0 means one per available CPU
    #[serde(default)]
    pub worker_count: usize,

    /// Capacity of the shared job queue; submissions wait when it is full
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Maximum number of images accepted in one batch
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Encoding used for processed images
    #[serde(default)]
    pub output_format: OutputFormat,
}

/// Encoding of processed images returned to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            worker_count: 0,
            queue_capacity: default_queue_capacity(),
            max_batch_size: default_max_batch_size(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Jpeg
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Png => write!(f, "png"),
            OutputFormat::Jpeg => write!(f, "jpeg"),
        }
    }
}

impl Validatable for ProcessingConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.queue_capacity, "queue_capacity", self.domain_name())?;
        validate_positive(self.max_batch_size, "max_batch_size", self.domain_name())?;

        if self.worker_count > 1024 {
            return Err(self.validation_error(format!(
                "worker_count must be at most 1024, got {}",
                self.worker_count
            )));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "processing"
    }
}

fn default_queue_capacity() -> usize {
    64
}

fn default_max_batch_size() -> usize {
    32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_defaults() {
        let config = ProcessingConfig::default();
        assert_eq!(config.worker_count, 0);
        assert_eq!(config.queue_capacity, 64);
        assert_eq!(config.output_format, OutputFormat::Jpeg);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_processing_validation() {
        let mut config = ProcessingConfig::default();
        config.queue_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = ProcessingConfig::default();
        config.max_batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("PNG").unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_str("jpg").unwrap(), OutputFormat::Jpeg);
        assert!(OutputFormat::from_str("tiff").is_err());
    }
}
