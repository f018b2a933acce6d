//! Service construction and teardown

use anyhow::{Context, Result};
use pixelpress_config::PixelpressConfig;
use pixelpress_execution::{PoolConfig, ProcessingPool};
use pixelpress_loadtest::LoadTestController;
use pixelpress_metrics::{MetricsAggregator, ResourceMonitor};
use pixelpress_rest_api::AppContext;
use std::sync::Arc;
use tracing::info;

/// Owns every long-lived service of the process
pub struct ServiceContainer {
    pub aggregator: Arc<MetricsAggregator>,
    pub pool: Arc<ProcessingPool>,
    pub load_test: Arc<LoadTestController>,
    monitor: ResourceMonitor,
}

impl ServiceContainer {
    /// Start the worker pool and the resource monitor.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: &PixelpressConfig) -> Result<Self> {
        let aggregator = Arc::new(MetricsAggregator::new(config.metrics.window));

        let pool = ProcessingPool::new(
            PoolConfig::from(&config.processing),
            Arc::clone(&aggregator),
        )
        .context("Failed to start image processing pool")?;

        let load_test = LoadTestController::new(Arc::clone(&aggregator), config.load_test.clone());
        let monitor = ResourceMonitor::spawn(Arc::clone(&aggregator), config.metrics.sample_interval);

        Ok(Self {
            aggregator,
            pool: Arc::new(pool),
            load_test: Arc::new(load_test),
            monitor,
        })
    }

    pub fn app_context(&self) -> AppContext {
        AppContext::new(
            Arc::clone(&self.pool),
            Arc::clone(&self.load_test),
            Arc::clone(&self.aggregator),
        )
    }

    /// Stop the load test, drain the pool and stop sampling
    pub async fn shutdown(self) {
        info!("Shutting down services");
        self.load_test.shutdown().await;
        self.pool.shutdown().await;
        self.monitor.shutdown().await;
        info!("All services stopped");
    }
}
