//! Load test control endpoints

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use pixelpress_loadtest::{LoadTestConfig, LoadTestStatus};
use tracing::info;

use crate::{
    context::LoadTestContext,
    errors::RestResult,
    models::load_test::{StartLoadTestResponse, StopLoadTestResponse},
};

/// Start a load test. Omitted fields default to medium intensity, 10 seconds
/// and 4 threads.
pub async fn start_load_test(
    State(ctx): State<LoadTestContext>,
    payload: Result<Json<LoadTestConfig>, JsonRejection>,
) -> RestResult<Json<StartLoadTestResponse>> {
    let Json(config) = payload?;
    info!(
        "Load test requested: intensity={}, duration={}s, threads={}",
        config.intensity, config.duration_secs, config.threads
    );

    let status = ctx.controller.start(config).await?;
    Ok(Json(status.into()))
}

pub async fn get_load_test_status(State(ctx): State<LoadTestContext>) -> Json<LoadTestStatus> {
    Json(ctx.controller.status().await)
}

/// Stop the running test; returns once every load thread has exited
pub async fn stop_load_test(State(ctx): State<LoadTestContext>) -> Json<StopLoadTestResponse> {
    let outcome = ctx.controller.stop().await;
    Json(outcome.into())
}
