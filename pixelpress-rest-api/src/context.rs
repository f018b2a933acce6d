//! Context types for dependency injection in REST API handlers
//!
//! Each endpoint group extracts only the context it needs from the shared
//! [`AppContext`] through `FromRef`.

use axum::extract::FromRef;
use pixelpress_execution::ProcessingPool;
use pixelpress_loadtest::LoadTestController;
use pixelpress_metrics::MetricsAggregator;
use std::sync::Arc;

/// Context for `/api/process`
#[derive(Clone)]
pub struct ProcessingContext {
    pub pool: Arc<ProcessingPool>,
}

/// Context for the load test endpoints
#[derive(Clone)]
pub struct LoadTestContext {
    pub controller: Arc<LoadTestController>,
}

/// Context for metrics and health endpoints
#[derive(Clone)]
pub struct MetricsContext {
    pub aggregator: Arc<MetricsAggregator>,
}

/// Application context containing all dependencies
#[derive(Clone, FromRef)]
pub struct AppContext {
    pub processing: ProcessingContext,
    pub load_test: LoadTestContext,
    pub metrics: MetricsContext,
}

impl AppContext {
    pub fn new(
        pool: Arc<ProcessingPool>,
        controller: Arc<LoadTestController>,
        aggregator: Arc<MetricsAggregator>,
    ) -> Self {
        Self {
            processing: ProcessingContext { pool },
            load_test: LoadTestContext { controller },
            metrics: MetricsContext { aggregator },
        }
    }

    pub fn aggregator(&self) -> Arc<MetricsAggregator> {
        Arc::clone(&self.metrics.aggregator)
    }
}
