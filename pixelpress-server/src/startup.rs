//! Server startup and shutdown logic

use anyhow::{Context, Result};
use axum::Router;
use pixelpress_config::PixelpressConfig;
use pixelpress_rest_api::{create_rest_app, AppConfig};
use std::future::Future;
use tokio::net::TcpListener;

use crate::services::ServiceContainer;

/// Server application struct
pub struct Server {
    config: PixelpressConfig,
    services: ServiceContainer,
}

impl Server {
    /// Create a new server instance
    pub async fn new(config: PixelpressConfig) -> Result<Self> {
        // Initialize logging first
        pixelpress_logging::init_logging_from_config(&config.logging)?;

        let services = ServiceContainer::new(&config)?;

        Ok(Self { config, services })
    }

    pub fn config(&self) -> &PixelpressConfig {
        &self.config
    }

    pub fn services(&self) -> &ServiceContainer {
        &self.services
    }

    /// Build the complete application router
    pub fn build_app(&self) -> Router {
        create_rest_app(
            self.services.app_context(),
            AppConfig::from(&self.config.server),
        )
    }

    /// Bind the configured address and serve until SIGINT or SIGTERM
    pub async fn start(self) -> Result<()> {
        let addr = self.config.server.socket_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on `listener` until `shutdown` resolves, then stop all services
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.build_app();
        let addr = listener.local_addr()?;

        self.log_config_summary();
        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        self.services.shutdown().await;
        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Log configuration summary
    fn log_config_summary(&self) {
        let server = &self.config.server;
        let processing = self.services.pool.config();
        tracing::info!("=== Pixelpress Server Configuration ===");
        tracing::info!("Bind Address: {}:{}", server.bind_address, server.port);
        tracing::info!(
            "Workers: {} (queue {}, max batch {}, output {})",
            processing.worker_count,
            processing.queue_capacity,
            processing.max_batch_size,
            self.config.processing.output_format
        );
        tracing::info!("Metrics window: {}s", self.config.metrics.window.as_secs());
        tracing::info!("CORS: {}", if server.enable_cors { "Enabled" } else { "Disabled" });
        tracing::info!("Request ID: {}", if server.enable_request_id { "Enabled" } else { "Disabled" });
        tracing::info!("Tracing: {}", if server.enable_tracing { "Enabled" } else { "Disabled" });
        tracing::info!("=======================================");
    }
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
