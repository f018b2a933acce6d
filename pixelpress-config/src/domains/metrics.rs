//! Metrics aggregation configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Trailing window used for requests-per-second and average latency
    #[serde(with = "crate::domains::utils::secs", default = "default_window")]
    pub window: Duration,

    /// Interval of the background CPU and memory sampler
    #[serde(with = "crate::domains::utils::millis", default = "default_sample_interval")]
    pub sample_interval: Duration,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            sample_interval: default_sample_interval(),
        }
    }
}

impl Validatable for MetricsConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.window.as_secs(), "window", self.domain_name())?;
        // sysinfo needs a gap between refreshes for a meaningful CPU reading
        if self.sample_interval < Duration::from_millis(200) {
            return Err(self.validation_error(format!(
                "sample_interval must be at least 200ms, got {}ms",
                self.sample_interval.as_millis()
            )));
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "metrics"
    }
}

fn default_window() -> Duration {
    Duration::from_secs(10)
}

fn default_sample_interval() -> Duration {
    Duration::from_secs(1)
}
