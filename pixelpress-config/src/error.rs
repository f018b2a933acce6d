//! Configuration errors

use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A prefixed environment variable was set but could not be parsed
    #[error("{var} is invalid: {reason}")]
    InvalidEnv { var: String, reason: String },

    /// A loaded value failed validation for one config domain
    #[error("invalid {domain} configuration: {message}")]
    Invalid { domain: String, message: String },
}

impl ConfigError {
    pub fn invalid(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            domain: domain.into(),
            message: message.into(),
        }
    }
}
