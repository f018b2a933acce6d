use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use pixelpress_metrics::MetricsAggregator;
use std::sync::Arc;

/// Count the request in `activeConnections` until its response is produced.
///
/// Install with `axum::middleware::from_fn_with_state(aggregator, track_connections)`.
pub async fn track_connections(
    State(aggregator): State<Arc<MetricsAggregator>>,
    request: Request,
    next: Next,
) -> Response {
    let _guard = aggregator.connection_opened();
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_gauge_counts_in_flight_requests() {
        let aggregator = Arc::new(MetricsAggregator::default());
        let seen = Arc::clone(&aggregator);

        let app = Router::new()
            .route(
                "/",
                get(move || {
                    let seen = Arc::clone(&seen);
                    async move { seen.active_connections().to_string() }
                }),
            )
            .layer(middleware::from_fn_with_state(
                Arc::clone(&aggregator),
                track_connections,
            ));

        let response = app
            .oneshot(axum::http::Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

        assert_eq!(&body[..], b"1");
        assert_eq!(aggregator.active_connections(), 0);
    }
}
