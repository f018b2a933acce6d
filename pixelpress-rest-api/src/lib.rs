//! # Pixelpress REST API
//!
//! HTTP endpoints for the image processing dashboard:
//!
//! - `POST /api/process` runs a batch of uploaded images through a filter
//! - `POST /api/load-test`, `GET /api/load-test` and
//!   `POST /api/load-test/stop` drive the CPU load generator
//! - `GET /api/metrics` returns the live metrics snapshot
//! - `GET /api/health` and `GET /` describe the service
//!
//! Handlers receive their dependencies through the context structs in
//! [`context`], extracted from a shared [`AppContext`].

pub mod app;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod models;

pub use app::{create_rest_app, AppConfig};
pub use context::AppContext;
pub use errors::{RestError, RestResult};
pub use models::*;
