//! Wire shape of `GET /api/metrics`

use serde::{Deserialize, Serialize};

/// Point-in-time view of the aggregator.
///
/// Each field is read atomically on its own; the snapshot as a whole is not
/// linearizable across fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    /// Process-wide CPU usage, percent
    pub cpu: f64,
    /// System memory usage, percent
    pub memory: f64,
    /// Job completions per second over the trailing window
    pub requests_per_second: f64,
    /// Mean processing time of successful jobs in the trailing window, ms
    pub avg_response_time: u64,
    /// Jobs enqueued or in flight
    pub queue_size: u64,
    /// HTTP requests currently being served
    pub active_connections: u64,
    pub total_processed: u64,
    pub errors: u64,
}
