//! HTTP listener, request limits and CORS policy

use crate::error::{ConfigError, ConfigResult};
use crate::validation::{
    validate_enum_choice, validate_positive, validate_required_string, validate_url, Validatable,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

const HTTP_METHODS: [&str; 7] = ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,

    /// Largest accepted request body in bytes, multipart uploads included
    pub max_upload_bytes: usize,

    pub enable_cors: bool,
    pub enable_request_id: bool,

    /// Emit a tracing span per request
    pub enable_tracing: bool,

    pub cors: CorsConfig,
}

/// Cross-origin policy for the browser dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Absolute origins, or `*` for any
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,

    /// Preflight cache lifetime, in seconds on the wire
    #[serde(with = "crate::domains::utils::secs")]
    pub max_age: Duration,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|e| {
                ConfigError::invalid(
                    self.domain_name(),
                    format!("bad bind address {}:{}: {}", self.bind_address, self.port, e),
                )
            })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".into(),
            port: 8080,
            max_upload_bytes: 64 * 1024 * 1024,
            enable_cors: true,
            enable_request_id: true,
            enable_tracing: true,
            cors: CorsConfig::default(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            allowed_origins: owned(&["http://localhost:3000", "http://127.0.0.1:3000"]),
            allowed_methods: owned(&["GET", "POST", "OPTIONS"]),
            allowed_headers: owned(&["content-type", "accept", "x-request-id"]),
            allow_credentials: false,
            max_age: Duration::from_secs(3600),
        }
    }
}

impl Validatable for ServerConfig {
    fn validate(&self) -> ConfigResult<()> {
        let domain = self.domain_name();
        validate_required_string(&self.bind_address, "bind_address", domain)?;
        validate_positive(self.port, "port", domain)?;
        validate_positive(self.max_upload_bytes, "max_upload_bytes", domain)?;
        self.socket_addr()?;
        self.cors.validate()
    }

    fn domain_name(&self) -> &'static str {
        "server"
    }
}

impl Validatable for CorsConfig {
    fn validate(&self) -> ConfigResult<()> {
        let domain = self.domain_name();
        let wildcard = self.allowed_origins.iter().any(|o| o == "*");

        for origin in self.allowed_origins.iter().filter(|o| *o != "*") {
            validate_url(origin, "allowed_origins", domain)?;
        }
        for method in &self.allowed_methods {
            validate_enum_choice(method, &HTTP_METHODS, "allowed_methods", domain)?;
        }
        if wildcard && self.allow_credentials {
            return Err(self.validation_error("origin '*' cannot be used with allow_credentials"));
        }
        validate_positive(self.max_age.as_secs(), "max_age", domain)
    }

    fn domain_name(&self) -> &'static str {
        "server.cors"
    }
}
