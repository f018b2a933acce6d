//! Pixelpress server
//!
//! Wires configuration, logging, the metrics aggregator, the image worker
//! pool and the load test controller into one axum application with
//! graceful shutdown.

pub mod services;
pub mod startup;

pub use services::ServiceContainer;
pub use startup::{shutdown_signal, Server};
