//! Router-level tests through axum-test

use axum_test::TestServer;
use serde_json::{json, Value};

use crate::router::build_router;
use crate::test_helpers::test_app_state;

fn server() -> TestServer {
    TestServer::new(build_router(test_app_state())).unwrap()
}

#[tokio::test]
async fn test_health_and_version() {
    let server = server();
    server.get("/healthz").await.assert_status_ok();

    let version: Value = server.get("/version").await.json();
    assert_eq!(version["cargo_version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_status_counts_devices() {
    let status: Value = server().get("/api/status").await.json();
    assert_eq!(status["devices_total"], 3);
    assert_eq!(status["devices_active"], 2);
    assert_eq!(status["history_len"], 0);
}

#[tokio::test]
async fn test_sync_all_then_daily_stats() {
    let server = server();

    let results: Value = server.post("/api/sync").await.json();
    assert_eq!(results.as_array().unwrap().len(), 2);

    let stats: Value = server.get("/api/stats/daily").await.json();
    assert_eq!(stats["students"]["total"], 4);
    assert_eq!(stats["students"]["present"], 4);
    assert_eq!(stats["teachers"]["total"], 2);
    assert_eq!(stats["teachers"]["percentage"], 100.0);
}

#[tokio::test]
async fn test_stats_for_empty_day() {
    let stats: Value =
        server().get("/api/stats/daily").add_query_param("date", "2020-01-01").await.json();
    assert_eq!(stats["date"], "2020-01-01");
    assert_eq!(stats["students"]["percentage"], 0.0);
    assert_eq!(stats["teachers"]["percentage"], 0.0);
}

#[tokio::test]
async fn test_patch_device_and_unknown_routes() {
    let server = server();

    let resp: Value = server
        .patch("/api/devices/BIO001")
        .json(&json!({"port": 4371}))
        .await
        .json();
    assert_eq!(resp["device"]["port"], 4371);

    server.get("/api/devices/NOPE").await.assert_status_not_found();
    server.get("/api/does-not-exist").await.assert_status_not_found();
}

#[tokio::test]
async fn test_sync_unavailable_device_is_conflict() {
    let response = server().post("/api/devices/BIO003/sync").await;
    response.assert_status(axum::http::StatusCode::CONFLICT);
    assert_eq!(response.text(), "Device BIO003 is not active");
}
