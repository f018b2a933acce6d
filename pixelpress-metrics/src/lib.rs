//! Metrics aggregation for Pixelpress
//!
//! A single [`MetricsAggregator`] is shared (behind an `Arc`) by the
//! processing pool, the load test controller and the HTTP layer. Writers use
//! the explicit update methods; readers call [`MetricsAggregator::snapshot`],
//! which never waits on image processing.

pub mod aggregator;
pub mod monitor;
pub mod snapshot;
pub mod system;
pub mod window;

pub use aggregator::{ConnectionGuard, MetricsAggregator};
pub use monitor::ResourceMonitor;
pub use snapshot::MetricsSnapshot;
pub use system::{ResourceSample, SystemSampler};
pub use window::CompletionWindow;
