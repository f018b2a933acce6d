//! # Pixelpress Web Utilities
//!
//! Middleware and error types shared by the Pixelpress HTTP surface.
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use pixelpress_config::CorsConfig;
//! use pixelpress_web::middleware::{cors_layer_with_config, request_id_middleware};
//!
//! let app: Router = Router::new()
//!     .route("/", get(|| async { "ok" }))
//!     .layer(middleware::from_fn(request_id_middleware))
//!     .layer(cors_layer_with_config(&CorsConfig::default()));
//! ```

pub mod errors;
pub mod middleware;

pub use errors::{WebError, WebResult};
pub use middleware::{
    cors_layer_with_config, error_handler_middleware, handle_not_found, request_id_middleware,
    track_connections, RequestId, REQUEST_ID_HEADER,
};
