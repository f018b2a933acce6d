//! Health check and service description endpoints

use axum::{response::IntoResponse, Json};
use tracing::debug;

use crate::models::common::{HealthResponse, ServiceInfo};

/// Liveness probe used by the container orchestrator
pub async fn health_check() -> impl IntoResponse {
    debug!("Health check requested");
    Json(HealthResponse::healthy())
}

pub async fn service_info() -> impl IntoResponse {
    Json(ServiceInfo {
        service: "Pixelpress Image Processing API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec![
            "/api/process",
            "/api/load-test",
            "/api/load-test/stop",
            "/api/metrics",
            "/api/health",
        ],
    })
}
