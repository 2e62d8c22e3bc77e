#![allow(unused_crate_dependencies)]
#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::expect_used, reason = "integration test, panics are the assertion mechanism")]

use std::sync::Arc;
use std::time::Duration;

use attendance_core::{
    DeviceLink, DeviceRegistry, EventFeed, HttpDeviceLink, HttpEventFeed, InMemoryLedger,
    LedgerStore, SyncHistory, SyncReconciler,
};
use attendance_types::models::BiometricType;
use attendance_types::{Device, DeviceError, SubjectKind};
use chrono::{TimeZone, Utc};
use wiremock::matchers::{method, path, query_param};
use wiremock::Request;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bridge_device(server: &MockServer) -> Device {
    let addr = server.address();
    Device {
        id: "GATE01".to_string(),
        name: "Gate Bridge".to_string(),
        location: "North Gate".to_string(),
        biometric_type: BiometricType::Card,
        is_active: true,
        last_sync: None,
        ip_address: addr.ip().to_string(),
        port: addr.port(),
    }
}

fn events_body() -> serde_json::Value {
    serde_json::json!([
        {
            "device_id": "GATE01",
            "subject_id": "STU100",
            "subject_kind": "student",
            "timestamp": "2026-03-02T07:45:10Z",
            "outcome": "success",
            "biometric_data": "AQID"
        },
        {
            "device_id": "GATE01",
            "subject_id": "TCH100",
            "subject_kind": "teacher",
            "timestamp": "2026-03-02T07:50:00Z",
            "outcome": "failed"
        }
    ])
}

#[tokio::test]
async fn test_http_link_status_handshake() {
    let server = MockServer::start().await;
    let link = HttpDeviceLink::new(Duration::from_secs(2)).expect("client");
    let device = bridge_device(&server);

    {
        let _guard = Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount_as_scoped(&server)
            .await;
        assert!(link.connect(&device).await.is_ok());
    }

    {
        let _guard = Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(503))
            .mount_as_scoped(&server)
            .await;
        let err = link.connect(&device).await.expect_err("503 must fail");
        assert!(matches!(err, DeviceError::ConnectionFailed { ref id, .. } if id == "GATE01"));
    }
}

#[tokio::test]
async fn test_http_feed_decodes_events() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_body()))
        .mount(&server)
        .await;

    let feed = HttpEventFeed::new(Duration::from_secs(2)).expect("client");
    let events = feed.fetch_events(&bridge_device(&server), None).await.expect("events");

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].biometric_data.as_deref(), Some(&[1u8, 2, 3][..]));
    assert_eq!(events[1].subject_kind, SubjectKind::Teacher);
    assert!(events[1].biometric_data.is_none());
}

#[tokio::test]
async fn test_http_feed_sends_since_watermark() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("since", "2026-03-02T08:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let since = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
    let feed = HttpEventFeed::new(Duration::from_secs(2)).expect("client");
    let events = feed.fetch_events(&bridge_device(&server), Some(since)).await.expect("events");
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_http_feed_error_status_and_malformed_body() {
    let server = MockServer::start().await;
    let feed = HttpEventFeed::new(Duration::from_secs(2)).expect("client");
    let device = bridge_device(&server);

    {
        let _guard = Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(500))
            .mount_as_scoped(&server)
            .await;
        let err = feed.fetch_events(&device, None).await.expect_err("500 must fail");
        assert!(matches!(err, DeviceError::FeedFailed { .. }));
    }

    {
        let _guard = Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount_as_scoped(&server)
            .await;
        let err = feed.fetch_events(&device, None).await.expect_err("garbage must fail");
        assert!(err.to_string().contains("malformed batch"));
    }
}

#[tokio::test]
async fn test_sync_through_http_bridge() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_body()))
        .mount(&server)
        .await;

    let device = bridge_device(&server);
    let link = Arc::new(HttpDeviceLink::new(Duration::from_secs(2)).expect("client"));
    let registry = Arc::new(DeviceRegistry::new(vec![device], link));
    let ledger = Arc::new(InMemoryLedger::new());
    let history = Arc::new(SyncHistory::default());
    let reconciler = SyncReconciler::new(
        registry.clone(),
        Arc::new(HttpEventFeed::new(Duration::from_secs(2)).expect("client")),
        ledger.clone(),
        history.clone(),
    );

    let result = reconciler.sync_one("GATE01").await.expect("sync");
    assert!(result.success);
    assert_eq!(result.records_processed, 2);
    assert_eq!(result.records_added, 1);
    assert_eq!(result.errors.len(), 1);
    assert!(result.is_consistent());

    let date = chrono::NaiveDate::from_ymd_opt(2026, 3, 2).expect("date");
    let row = ledger.find(SubjectKind::Student, "STU100", date).await.expect("find");
    assert!(row.is_some());
    assert!(registry.get("GATE01").await.expect("device").last_sync.is_some());
    assert_eq!(history.len().await, 1);
}

fn since_param(request: &Request) -> Option<String> {
    request.url.query_pairs().find(|(k, _)| k == "since").map(|(_, v)| v.into_owned())
}

#[tokio::test]
async fn test_reconnect_keeps_unsynced_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_body()))
        .mount(&server)
        .await;

    // A device whose registry entry was stamped long before this process started
    let mut device = bridge_device(&server);
    device.last_sync = Some(Utc.with_ymd_and_hms(2026, 3, 2, 7, 0, 0).unwrap());

    let link = Arc::new(HttpDeviceLink::new(Duration::from_secs(2)).expect("client"));
    let registry = Arc::new(DeviceRegistry::new(vec![device], link));
    let reconciler = SyncReconciler::new(
        registry.clone(),
        Arc::new(HttpEventFeed::new(Duration::from_secs(2)).expect("client")),
        Arc::new(InMemoryLedger::new()),
        Arc::new(SyncHistory::default()),
    );

    reconciler.sync_one("GATE01").await.expect("first sync");
    let cursor = reconciler.feed_cursor("GATE01").expect("cursor after first sync");

    registry.disconnect("GATE01").await.expect("disconnect");
    registry.connect("GATE01").await.expect("connect");
    reconciler.sync_one("GATE01").await.expect("second sync");

    let requests: Vec<Request> = server
        .received_requests()
        .await
        .expect("recording enabled")
        .into_iter()
        .filter(|r| r.url.path() == "/events")
        .collect();
    assert_eq!(requests.len(), 2);
    assert_eq!(since_param(&requests[0]), None);
    assert_eq!(
        since_param(&requests[1]),
        Some(cursor.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    );
}
