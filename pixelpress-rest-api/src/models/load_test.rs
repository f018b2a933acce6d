//! Load test request/response models

use pixelpress_loadtest::{Intensity, LoadTestStatus, StopOutcome};
use serde::Serialize;
use uuid::Uuid;

/// Reply to a successful `POST /api/load-test`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartLoadTestResponse {
    pub status: &'static str,
    pub intensity: Intensity,
    pub duration: u64,
    pub threads: usize,
    pub run_id: Option<Uuid>,
}

impl From<LoadTestStatus> for StartLoadTestResponse {
    fn from(status: LoadTestStatus) -> Self {
        let config = status.config.unwrap_or_default();
        Self {
            status: "started",
            intensity: config.intensity,
            duration: config.duration_secs,
            threads: config.threads,
            run_id: status.run_id,
        }
    }
}

/// Reply to `POST /api/load-test/stop`
#[derive(Debug, Clone, Serialize)]
pub struct StopLoadTestResponse {
    pub status: &'static str,
}

impl From<StopOutcome> for StopLoadTestResponse {
    fn from(outcome: StopOutcome) -> Self {
        Self {
            status: outcome.as_str(),
        }
    }
}
