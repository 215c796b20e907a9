//! Router-level tests for the health and metrics endpoints.

use crate::test_utils::TestApp;
use serde_json::Value;

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApp::new(&[]).await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "equitrix-trading-bot");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApp::new(&[]).await;
    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(
        body.contains("http_requests_total"),
        "Expected http_requests_total metric"
    );
    assert!(
        body.contains("http_request_duration_seconds"),
        "Expected http_request_duration_seconds metric"
    );
    assert!(
        body.contains("orders_placed_total"),
        "Expected orders_placed_total metric"
    );
    assert!(
        body.contains("cycle_failures_total"),
        "Expected cycle_failures_total metric"
    );
}

#[tokio::test]
async fn metrics_endpoint_tracks_request_count() {
    let app = TestApp::new(&[]).await;

    for _ in 0..3 {
        let _ = app.server.get("/health").await;
    }

    let response = app.server.get("/metrics").await;
    let body = response.text();
    assert!(
        body.contains("http_requests_total"),
        "Should track request count"
    );
}
