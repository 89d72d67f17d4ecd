//! Integration tests for HTTP API endpoints.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::fixtures::{listing_payload, listing_with, malformed_entry, video_entry};
use common::server::TestServer;
use reelay_upstream::FetchError;
use serde_json::Value;
use tower::ServiceExt;

/// Helper to make GET requests and decode the JSON body.
async fn get_json(router: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::new();

    let (status, body) = get_json(&server.router, "/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_credential_status_with_cookie() {
    let server = TestServer::new();

    let (status, body) = get_json(&server.router, "/v1/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cookie_exists"], true);
    assert_eq!(
        body["cookie_length"],
        "test-session-cookie".len() as u64
    );
}

#[tokio::test]
async fn test_credential_status_without_cookie() {
    let server = TestServer::with_config(|config| {
        config.upstream.cookie = None;
    });

    let (status, body) = get_json(&server.router, "/v1/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cookie_exists"], false);
    assert_eq!(body["cookie_length"], 0);
}

#[tokio::test]
async fn test_listing_returns_normalized_envelope() {
    let server = TestServer::new();
    server.source.push_ok(listing_with(3));

    let (status, body) = get_json(&server.router, "/v1/videos/user-1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "found 3 videos");
    let videos = body["data"].as_array().unwrap();
    assert_eq!(videos.len(), 3);
    assert_eq!(videos[0]["video_id"], "7000");
    assert_eq!(videos[0]["author"], "creator");
    assert_eq!(
        videos[0]["video_link"],
        "https://www.douyin.com/video/7000"
    );
}

#[tokio::test]
async fn test_cache_hit_skips_upstream_call() {
    let server = TestServer::new();
    server.source.push_ok(listing_with(2));

    let (_, first) = get_json(&server.router, "/v1/videos/user-1?count=10").await;
    let (_, second) = get_json(&server.router, "/v1/videos/user-1?count=10").await;

    assert_eq!(first, second);
    assert_eq!(server.source.calls(), 1);
}

#[tokio::test]
async fn test_different_count_is_a_cache_miss() {
    let server = TestServer::new();
    server.source.push_ok(listing_with(2));
    server.source.push_ok(listing_with(2));

    get_json(&server.router, "/v1/videos/user-1?count=10").await;
    get_json(&server.router, "/v1/videos/user-1?count=5").await;

    assert_eq!(server.source.calls(), 2);
}

#[tokio::test]
async fn test_upstream_status_error_becomes_failure_envelope() {
    let server = TestServer::new();
    server.source.push_err(FetchError::Status {
        status: 502,
        body_prefix: "bad gateway".to_string(),
    });

    let (status, body) = get_json(&server.router, "/v1/videos/user-1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("502"));
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let server = TestServer::new();
    server.source.push_err(FetchError::Status {
        status: 503,
        body_prefix: String::new(),
    });
    server.source.push_ok(listing_with(1));

    let (_, first) = get_json(&server.router, "/v1/videos/user-1").await;
    assert_eq!(first["success"], false);
    assert!(server.state.cache.is_empty());

    // The identical request goes upstream again and now succeeds.
    let (_, second) = get_json(&server.router, "/v1/videos/user-1").await;
    assert_eq!(second["success"], true);
    assert_eq!(server.source.calls(), 2);
}

#[tokio::test]
async fn test_missing_credential_becomes_failure_envelope() {
    let server = TestServer::new();
    server.source.push_err(FetchError::MissingCredential);

    let (status, body) = get_json(&server.router, "/v1/videos/user-1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("credential"));
}

#[tokio::test]
async fn test_empty_listing_is_success() {
    let server = TestServer::new();
    server.source.push_ok(listing_payload(vec![]));

    let (status, body) = get_json(&server.router, "/v1/videos/user-1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "no videos found");
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_records_are_dropped_from_the_batch() {
    let server = TestServer::new();
    server.source.push_ok(listing_payload(vec![
        video_entry("1"),
        malformed_entry(),
        video_entry("2"),
        malformed_entry(),
        video_entry("3"),
    ]));

    let (_, body) = get_json(&server.router, "/v1/videos/user-1").await;

    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "found 3 videos");
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_requested_count_caps_the_output() {
    let server = TestServer::new();
    server.source.push_ok(listing_with(8));

    let (_, body) = get_json(&server.router, "/v1/videos/user-1?count=4").await;

    assert_eq!(body["message"], "found 4 videos");
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_max_videos_config_caps_the_output() {
    let server = TestServer::with_config(|config| {
        config.upstream.max_videos = 2;
    });
    server.source.push_ok(listing_with(8));

    let (_, body) = get_json(&server.router, "/v1/videos/user-1?count=10").await;

    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_count_out_of_range_is_rejected() {
    let server = TestServer::new();

    let (status, body) = get_json(&server.router, "/v1/videos/user-1?count=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");

    let (status, _) = get_json(&server.router, "/v1/videos/user-1?count=500").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(server.source.calls(), 0);
}

#[tokio::test]
async fn test_unknown_path_gets_json_404() {
    let server = TestServer::new();

    let (status, body) = get_json(&server.router, "/v1/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
    assert!(body["message"].as_str().unwrap().contains("/v1/nope"));
}

#[tokio::test]
async fn test_metrics_endpoint_exposed_when_enabled() {
    reelay_server::metrics::register_metrics();
    let server = TestServer::new();

    let request = Request::builder()
        .method("GET")
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let response = server.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_metrics_endpoint_absent_when_disabled() {
    let server = TestServer::with_config(|config| {
        config.server.metrics_enabled = false;
    });

    let (status, _) = get_json(&server.router, "/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
