//! Live metrics endpoint

use axum::{extract::State, Json};
use pixelpress_metrics::MetricsSnapshot;

use crate::context::MetricsContext;

/// Current snapshot, recomputed on every call. The dashboard polls this
/// every couple of seconds.
pub async fn get_metrics(State(ctx): State<MetricsContext>) -> Json<MetricsSnapshot> {
    Json(ctx.aggregator.snapshot())
}
