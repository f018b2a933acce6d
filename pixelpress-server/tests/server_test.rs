use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use pixelpress_config::PixelpressConfig;
use pixelpress_server::Server;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tower::ServiceExt;

fn test_config() -> PixelpressConfig {
    let mut config = PixelpressConfig::default();
    config.processing.worker_count = 2;
    config.metrics.sample_interval = Duration::from_millis(250);
    config
}

async fn raw_get(addr: std::net::SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        path, addr
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_router_serves_metrics() {
    let server = Server::new(test_config()).await.unwrap();
    let app = server.build_app();

    let response = app
        .oneshot(Request::builder().uri("/api/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["queueSize"], 0);
    assert_eq!(json["totalProcessed"], 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_serve_and_graceful_shutdown() {
    let server = Server::new(test_config()).await.unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve(listener, async {
        let _ = stop_rx.await;
    }));

    let response = raw_get(addr, "/api/health").await;
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains("\"healthy\""));
    assert!(response.to_ascii_lowercase().contains("x-request-id"));

    stop_tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(10), handle)
        .await
        .expect("server did not shut down")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_shutdown_stops_running_load_test() {
    let server = Server::new(test_config()).await.unwrap();
    let controller = std::sync::Arc::clone(&server.services().load_test);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

    controller
        .start(pixelpress_loadtest::LoadTestConfig::new(
            pixelpress_loadtest::Intensity::High,
            60,
            2,
        ))
        .await
        .unwrap();

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve(listener, async {
        let _ = stop_rx.await;
    }));

    stop_tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(10), handle)
        .await
        .expect("server did not shut down")
        .unwrap()
        .unwrap();

    assert_eq!(controller.live_workers(), 0);
    assert_eq!(
        controller.status().await.phase,
        pixelpress_loadtest::LoadTestPhase::Stopped
    );
}
