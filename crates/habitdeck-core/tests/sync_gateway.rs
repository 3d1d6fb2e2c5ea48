//! Sync gateway against a mock collector.

use std::time::Duration;

use habitdeck_core::sync::{SyncError, SyncGateway, SyncOutcome, SyncPayload};
use habitdeck_core::TrackerState;
use mockito::Matcher;
use serde_json::json;

fn payload() -> SyncPayload {
    let mut state = TrackerState::seeded(&["Read"]);
    state.progress.toggle("2025-06-03".parse().unwrap(), "Read");
    state.notes.set("2025-06-03".parse().unwrap(), "chapter 4");
    SyncPayload::from_state(&state, Some("me@example.com"), "Europe/Berlin").unwrap()
}

fn gateway(server: &mockito::Server) -> SyncGateway {
    SyncGateway::new(&format!("{}/api/migrate", server.url()), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_push_posts_full_state() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/migrate")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "email": "me@example.com",
            "habits": ["Read"],
            "progressData": {"2025-06-03": {"Read": true}},
            "dailyNotes": {"2025-06-03": "chapter 4"},
            "timezone": "Europe/Berlin",
        })))
        .with_status(200)
        .with_body(r#"{"message":"ok"}"#)
        .create_async()
        .await;

    gateway(&server).push(&payload()).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_2xx_is_rejected_with_server_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/migrate")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"database unavailable"}"#)
        .create_async()
        .await;

    let err = gateway(&server).push(&payload()).await.unwrap_err();
    match err {
        SyncError::Rejected { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rejection_without_body_uses_status_reason() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/migrate")
        .with_status(404)
        .create_async()
        .await;

    let err = gateway(&server).push(&payload()).await.unwrap_err();
    assert!(matches!(err, SyncError::Rejected { status: 404, ref message } if message == "Not Found"));
}

#[tokio::test]
async fn test_spawned_push_reports_outcome() {
    let mut server = mockito::Server::new_async().await;
    let ok = server
        .mock("POST", "/api/migrate")
        .match_body(Matcher::PartialJson(json!({"email": "me@example.com"})))
        .with_status(201)
        .expect(2)
        .create_async()
        .await;

    let gateway = gateway(&server);
    // overlapping pushes are independent
    let first = gateway.spawn_push(payload());
    let second = gateway.spawn_push(payload());
    assert_eq!(first.await.unwrap(), SyncOutcome::Synced);
    assert_eq!(second.await.unwrap(), SyncOutcome::Synced);
    ok.assert_async().await;
}

#[tokio::test]
async fn test_spawned_push_failure_is_not_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/migrate")
        .with_status(503)
        .create_async()
        .await;

    let outcome = gateway(&server).spawn_push(payload()).await.unwrap();
    assert!(matches!(outcome, SyncOutcome::Failed { reason } if reason.contains("503")));
}

#[test]
fn test_missing_identity_cancels_push() {
    let state = TrackerState::seeded(&["Read"]);
    assert!(matches!(
        SyncPayload::from_state(&state, None, "UTC"),
        Err(SyncError::NoIdentity)
    ));
    assert!(matches!(
        SyncPayload::from_state(&state, Some("  "), "UTC"),
        Err(SyncError::NoIdentity)
    ));
}
