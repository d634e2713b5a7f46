//! Integration tests for the API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic, routing, and
//! failure escalation without needing a live network connection.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::middleware;
use axum::response::Response;
use axum::routing::get;
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use wafiq_core::{ServiceConfig, messages};
use wafiq_server::sink::{ChannelSink, HostErrorSink, HostNotification, SinkError};
use wafiq_server::state::ServiceOptions;
use wafiq_server::{build, failure};
use wafiq_types::{ErrorKind, ErrorReport};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn standalone() -> Router {
    let config = ServiceConfig::new("cmeptomdb01s06lfem89ruzgl", false).unwrap();
    build(config, ServiceOptions::default()).into_router()
}

fn embedded(sink: Option<Arc<dyn HostErrorSink>>) -> Router {
    let config = ServiceConfig::new("X", true).unwrap();
    let mut options = ServiceOptions::default().with_static_dir("does-not-exist");
    options.host_sink = sink;
    build(config, options).into_router()
}

fn embedded_with_channel() -> (Router, mpsc::Receiver<HostNotification>) {
    let (sink, rx) = ChannelSink::channel(8);
    (embedded(Some(Arc::new(sink))), rx)
}

async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap()
}

async fn get_req(router: &Router, uri: &str) -> Response {
    send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(router: &Router, uri: &str, body: &str) -> Response {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();
    send(router, request).await
}

async fn body_to_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_to_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fresh_progress_is_zeroed() {
    let app = standalone();
    let json = body_to_json(get_req(&app, "/progress").await).await;

    assert_eq!(json["totalScore"], 0);
    assert_eq!(json["totalStars"], 0);
    assert_eq!(json["completedGames"], 0);
    assert_eq!(json["playTime"], 0);
    assert_eq!(json["achievements"], 0);
    assert_eq!(json["gamesPlayed"], serde_json::json!([]));
}

#[tokio::test]
async fn submit_then_duplicate_game_type() {
    let app = standalone();

    let response = post_json(
        &app,
        "/progress",
        r#"{"score": 50, "stars": 5, "gameType": "matching", "duration": 60}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["success"], true);
    let progress = &json["progress"];
    assert_eq!(progress["totalScore"], 50);
    assert_eq!(progress["totalStars"], 5);
    assert_eq!(progress["completedGames"], 1);
    assert_eq!(progress["playTime"], 60);
    assert_eq!(progress["gamesPlayed"], serde_json::json!(["matching"]));
    assert_eq!(progress["achievements"], 0);

    let response = post_json(&app, "/progress", r#"{"score": 60, "gameType": "matching"}"#).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(get_req(&app, "/progress").await).await;
    assert_eq!(json["totalScore"], 110);
    assert_eq!(json["completedGames"], 1);
    assert_eq!(json["totalStars"], 5);
    assert_eq!(json["achievements"], 1);
}

#[tokio::test]
async fn form_encoded_submission() {
    let app = standalone();
    let request = Request::post("/progress")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("score=30&stars=2&gameType=letters&duration=45"))
        .unwrap();
    let json = body_to_json(send(&app, request).await).await;

    assert_eq!(json["progress"]["totalScore"], 30);
    assert_eq!(json["progress"]["totalStars"], 2);
    assert_eq!(json["progress"]["gamesPlayed"], serde_json::json!(["letters"]));
}

#[tokio::test]
async fn invalid_fields_are_coerced() {
    let app = standalone();
    let response = post_json(
        &app,
        "/progress",
        r#"{"score": -5, "stars": "3", "gameType": 7, "duration": 1.5}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response).await;
    assert_eq!(json["progress"]["totalScore"], 0);
    assert_eq!(json["progress"]["totalStars"], 3);
    assert_eq!(json["progress"]["playTime"], 0);
    assert_eq!(json["progress"]["completedGames"], 0);
}

#[tokio::test]
async fn empty_submission_counts_nothing() {
    let app = standalone();
    let response = send(
        &app,
        Request::post("/progress").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response).await;
    assert_eq!(json["progress"]["totalScore"], 0);
    assert_eq!(json["progress"]["completedGames"], 0);
}

#[tokio::test]
async fn reset_zeroes_progress() {
    let app = standalone();
    post_json(&app, "/progress", r#"{"score": 120, "gameType": "colors"}"#).await;

    let response = send(
        &app,
        Request::post("/reset-progress").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], messages::PROGRESS_RESET);

    let json = body_to_json(get_req(&app, "/progress").await).await;
    assert_eq!(json["totalScore"], 0);
    assert_eq!(json["achievements"], 0);
    assert_eq!(json["gamesPlayed"], serde_json::json!([]));
}

#[tokio::test]
async fn stats_are_derived_from_progress() {
    let app = standalone();

    let json = body_to_json(get_req(&app, "/stats").await).await;
    assert_eq!(json["totalGamesAvailable"], 6);
    assert_eq!(json["averageScore"], 0);
    assert_eq!(json["completionRate"], 0);
    assert_eq!(json["playTimeMinutes"], 0);

    post_json(
        &app,
        "/progress",
        r#"{"score": 50, "stars": 5, "gameType": "matching", "duration": 60}"#,
    )
    .await;
    post_json(&app, "/progress", r#"{"score": 60, "gameType": "matching"}"#).await;

    let json = body_to_json(get_req(&app, "/stats").await).await;
    assert_eq!(json["averageScore"], 110);
    assert_eq!(json["completionRate"], 17);
    assert_eq!(json["playTimeMinutes"], 1);
    assert_eq!(json["achievements"], 1);
}

// ---------------------------------------------------------------------------
// Content and health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn content_endpoints() {
    let app = standalone();

    let json = body_to_json(get_req(&app, "/letters").await).await;
    assert_eq!(json["letters"].as_array().unwrap().len(), 28);
    assert_eq!(json["letters"][0], "أ");

    let json = body_to_json(get_req(&app, "/colors").await).await;
    let colors = json["colors"].as_array().unwrap();
    assert_eq!(colors.len(), 8);
    assert!(colors[0]["name"].is_string());
    assert!(colors[0]["color"].is_string());
    assert!(colors[0]["emoji"].is_string());

    let json = body_to_json(get_req(&app, "/stories").await).await;
    let stories = json["stories"].as_array().unwrap();
    assert_eq!(stories.len(), 3);
    assert_eq!(stories[0]["id"], 1);
    assert!(stories[0]["moral"].is_string());
}

#[tokio::test]
async fn standalone_health() {
    let app = standalone();
    let response = get_req(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["mode"], "standalone");
    assert_eq!(json["appId"], "cmeptomdb01s06lfem89ruzgl");
    assert_eq!(json["appName"], messages::APP_NAME);
    assert!(json["timestamp"].is_string());
    assert!(json["env"]["platform"].is_string());
}

#[tokio::test]
async fn embedded_routes_live_under_prefix() {
    let app = embedded(None);

    let json = body_to_json(get_req(&app, "/api/X/health").await).await;
    assert_eq!(json["mode"], "embedded");
    assert_eq!(json["appId"], "X");

    let response = get_req(&app, "/api/X/letters").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_req(&app, "/letters").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json(&app, "/api/X/progress", r#"{"score": 10}"#).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn index_falls_back_to_builtin_page() {
    let app = embedded(None);
    let response = get_req(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(content_type.starts_with("text/html"));

    let html = body_to_string(response).await;
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("/api/X/letters"));
}

// ---------------------------------------------------------------------------
// CORS
// ---------------------------------------------------------------------------

#[tokio::test]
async fn responses_allow_any_origin() {
    let app = standalone();
    let request = Request::get("/letters")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn responses_advertise_methods_and_headers() {
    let app = standalone();
    let response = get_req(&app, "/health").await;

    let methods = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(method), "missing {method} in {methods}");
    }

    let headers = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    for name in ["origin", "x-requested-with", "content-type", "accept", "authorization"] {
        assert!(headers.contains(name), "missing {name} in {headers}");
    }
}

#[tokio::test]
async fn options_short_circuits() {
    let app = standalone();
    let request = Request::options("/progress")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_to_string(response).await.is_empty());

    let request = Request::options("/no-such-route")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Failure handling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_json_is_reported_to_host() {
    let (app, mut rx) = embedded_with_channel();
    let response = post_json(&app, "/api/X/progress", r#"{"score": "#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_to_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], messages::SERVER_ERROR);
    assert!(json["message"].as_str().unwrap().starts_with("malformed JSON body"));

    let notification = rx.try_recv().unwrap();
    assert_eq!(notification.app_id, "X");
    assert_eq!(notification.report.kind, ErrorKind::ClientError);
    assert_eq!(notification.report.status_code, 400);
    assert_eq!(notification.report.endpoint, "/api/X/progress");
    assert_eq!(notification.report.method, "POST");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn oversized_body_keeps_payload_too_large() {
    let (app, mut rx) = embedded_with_channel();
    let body = format!(r#"{{"gameType": "{}"}}"#, "a".repeat(3 * 1024 * 1024));
    let response = post_json(&app, "/api/X/progress", &body).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let json = body_to_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], messages::SERVER_ERROR);

    let notification = rx.try_recv().unwrap();
    assert_eq!(notification.report.kind, ErrorKind::ClientError);
    assert_eq!(notification.report.status_code, 413);
    assert_eq!(notification.report.name, "RequestRejected");

    let json = body_to_json(get_req(&app, "/api/X/progress").await).await;
    assert_eq!(json["completedGames"], 0);
}

#[tokio::test]
async fn successful_requests_are_not_reported() {
    let (app, mut rx) = embedded_with_channel();
    get_req(&app, "/api/X/progress").await;
    get_req(&app, "/letters").await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn standalone_never_reports() {
    let (sink, mut rx) = ChannelSink::channel(8);
    let config = ServiceConfig::new("X", false).unwrap();
    let options = ServiceOptions::default().with_host_sink(Arc::new(sink));
    let app = build(config, options).into_router();

    let response = post_json(&app, "/progress", "not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn failing_sink_does_not_change_response() {
    let sink: Arc<dyn HostErrorSink> =
        Arc::new(|_: &str, _: &ErrorReport| -> Result<(), SinkError> { Err(SinkError::Closed) });
    let app = embedded(Some(sink));

    let response = post_json(&app, "/api/X/progress", "{").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response).await;
    assert_eq!(json["success"], false);
}

#[allow(clippy::panic)]
async fn boom() -> &'static str {
    panic!("kaboom")
}

#[tokio::test]
async fn panics_become_runtime_errors() {
    let (sink, mut rx) = ChannelSink::channel(8);
    let config = ServiceConfig::new("X", true).unwrap();
    let service = build(config, ServiceOptions::default().with_host_sink(Arc::new(sink)));

    let app: Router = Router::new()
        .route("/boom", get(boom))
        .layer(CatchPanicLayer::custom(failure::panic_response))
        .layer(middleware::from_fn_with_state(
            Arc::clone(service.state()),
            failure::escalate,
        ));

    let response = get_req(&app, "/boom").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_to_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], messages::SERVER_ERROR);
    assert_eq!(json["message"], "kaboom");

    let notification = rx.try_recv().unwrap();
    assert_eq!(notification.report.kind, ErrorKind::RuntimeError);
    assert_eq!(notification.report.status_code, 500);
    assert_eq!(notification.report.name, "panic");
}
