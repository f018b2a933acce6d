//! Run parameters

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{LoadTestError, LoadTestResult};

pub const MIN_DURATION_SECS: u64 = 5;
pub const MAX_DURATION_SECS: u64 = 60;
pub const MIN_THREADS: usize = 1;
pub const MAX_THREADS: usize = 16;

/// How hard each load thread works
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
    Extreme,
}

impl Intensity {
    /// Fraction of every slice spent computing
    pub fn duty_cycle(&self) -> f64 {
        match self {
            Intensity::Low => 0.25,
            Intensity::Medium => 0.5,
            Intensity::High => 0.75,
            Intensity::Extreme => 1.0,
        }
    }

    /// Floating-point operations between cancellation checks
    pub fn chunk_size(&self) -> usize {
        match self {
            Intensity::Low => 1_000,
            Intensity::Medium => 5_000,
            Intensity::High => 10_000,
            Intensity::Extreme => 20_000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
            Intensity::Extreme => "extreme",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = LoadTestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Intensity::Low),
            "medium" => Ok(Intensity::Medium),
            "high" => Ok(Intensity::High),
            "extreme" => Ok(Intensity::Extreme),
            _ => Err(LoadTestError::Validation(format!(
                "unknown intensity '{}', expected low, medium, high or extreme",
                s
            ))),
        }
    }
}

/// Parameters of one run. Omitted fields take the dashboard defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadTestConfig {
    pub intensity: Intensity,
    #[serde(rename = "duration")]
    pub duration_secs: u64,
    pub threads: usize,
}

impl Default for LoadTestConfig {
    fn default() -> Self {
        Self {
            intensity: Intensity::Medium,
            duration_secs: 10,
            threads: 4,
        }
    }
}

impl LoadTestConfig {
    pub fn new(intensity: Intensity, duration_secs: u64, threads: usize) -> Self {
        Self {
            intensity,
            duration_secs,
            threads,
        }
    }

    /// Out-of-range values are rejected, never clamped
    pub fn validate(&self) -> LoadTestResult<()> {
        if !(MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&self.duration_secs) {
            return Err(LoadTestError::Validation(format!(
                "duration must be between {} and {} seconds, got {}",
                MIN_DURATION_SECS, MAX_DURATION_SECS, self.duration_secs
            )));
        }
        if !(MIN_THREADS..=MAX_THREADS).contains(&self.threads) {
            return Err(LoadTestError::Validation(format!(
                "threads must be between {} and {}, got {}",
                MIN_THREADS, MAX_THREADS, self.threads
            )));
        }
        Ok(())
    }
}
