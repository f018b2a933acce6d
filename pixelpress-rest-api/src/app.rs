//! Main application configuration and router setup

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use pixelpress_config::{CorsConfig, ServerConfig};
use pixelpress_web::middleware::{
    cors_layer_with_config, error_handler_middleware, handle_not_found, request_id_middleware,
    track_connections,
};
use tower_http::trace::TraceLayer;

use crate::{context::AppContext, handlers};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Enable CORS middleware
    pub enable_cors: bool,
    /// Enable request ID tracking
    pub enable_request_id: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
    /// Largest accepted request body
    pub max_upload_bytes: usize,
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for AppConfig {
    fn from(server: &ServerConfig) -> Self {
        Self {
            enable_cors: server.enable_cors,
            enable_request_id: server.enable_request_id,
            enable_tracing: server.enable_tracing,
            max_upload_bytes: server.max_upload_bytes,
            cors: server.cors.clone(),
        }
    }
}

/// Create the complete REST API application
pub fn create_rest_app(context: AppContext, config: AppConfig) -> Router {
    let aggregator = context.aggregator();

    let mut app = Router::new()
        .route("/", get(handlers::service_info))
        .nest("/api", create_api_router())
        .fallback(handle_not_found)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(context);

    // Layers wrap everything added before them
    if config.enable_request_id {
        app = app.layer(middleware::from_fn(request_id_middleware));
    }

    if config.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    app = app
        .layer(middleware::from_fn(error_handler_middleware))
        .layer(middleware::from_fn_with_state(aggregator, track_connections));

    if config.enable_cors {
        app = app.layer(cors_layer_with_config(&config.cors));
    }

    app
}

/// Create the `/api` router
fn create_api_router() -> Router<AppContext> {
    Router::new()
        .route("/process", post(handlers::process_images))
        .route(
            "/load-test",
            post(handlers::start_load_test).get(handlers::get_load_test_status),
        )
        .route("/load-test/stop", post(handlers::stop_load_test))
        .route("/metrics", get(handlers::get_metrics))
        .route("/health", get(handlers::health_check))
}
