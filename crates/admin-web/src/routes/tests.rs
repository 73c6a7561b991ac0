use std::sync::Arc;

use article_store::ArticleStore;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use broadcaster::{BotConfig, NewsBot};
use mock_transport::{Article, MockTransport, StaticFeed, TransportEvent};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt; // for oneshot()

use super::router;
use crate::state::AppState;

struct TestApp {
    _dir: TempDir,
    app: Router,
    bot: NewsBot,
    transport: MockTransport,
}

async fn test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let store = ArticleStore::open(dir.path()).await.unwrap();
    let transport = MockTransport::new();
    let feed = StaticFeed::with_articles(vec![
        Article::new("http://news/1", "One"),
        Article::new("http://news/2", "Two"),
    ]);
    let bot = NewsBot::new(
        BotConfig::new("GROUP_ID"),
        store,
        Arc::new(feed),
        Arc::new(transport.clone()),
    );
    let app = router().with_state(AppState::new(bot.clone()));
    TestApp {
        _dir: dir,
        app,
        bot,
        transport,
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let t = test_app().await;
    let (status, json) = send(&t.app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_stats_initial_shape() {
    let t = test_app().await;
    let (status, json) = send(&t.app, get("/api/stats")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["posted"], 0);
    assert_eq!(json["queue"], 0);
    assert_eq!(json["status"], "Disconnected");
    assert_eq!(json["isBotActive"], true);
    assert!(json["qr"].is_null());
    assert_eq!(json["interval"].as_u64(), Some(30));
}

#[tokio::test]
async fn test_stats_after_open() {
    let t = test_app().await;
    t.bot.handle_event(TransportEvent::Opened).await;

    let (_, json) = send(&t.app, get("/api/stats")).await;

    assert_eq!(json["status"], "Active");
    assert_eq!(json["queue"], 2);
}

#[tokio::test]
async fn test_stats_shows_pairing_qr() {
    let t = test_app().await;
    t.bot
        .handle_event(TransportEvent::PairingIssued("sgnl://linkdevice?uuid=1".into()))
        .await;

    let (_, json) = send(&t.app, get("/api/stats")).await;

    assert_eq!(json["status"], "QR Ready");
    assert!(json["qr"]
        .as_str()
        .unwrap()
        .starts_with("data:image/svg+xml;base64,"));
}

#[tokio::test]
async fn test_settings_updates_state() {
    let t = test_app().await;
    let body = serde_json::json!({"interval": 60, "toggle": false});
    let (status, json) = send(&t.app, post_json("/api/settings", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let (_, stats) = send(&t.app, get("/api/stats")).await;
    assert_eq!(stats["interval"].as_u64(), Some(60));
    assert_eq!(stats["isBotActive"], false);
}

#[tokio::test]
async fn test_fractional_interval_reported_in_whole_seconds() {
    let t = test_app().await;
    let body = serde_json::json!({"interval": 12.6});
    let (status, _) = send(&t.app, post_json("/api/settings", body)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, stats) = send(&t.app, get("/api/stats")).await;
    assert_eq!(stats["interval"].as_u64(), Some(13));
}

#[tokio::test]
async fn test_settings_rejects_bad_interval() {
    let t = test_app().await;

    for bad in [0.0, -10.0, 0.5, 100_000.0] {
        let body = serde_json::json!({"interval": bad, "toggle": false});
        let (status, json) = send(&t.app, post_json("/api/settings", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }

    let (_, stats) = send(&t.app, get("/api/stats")).await;
    assert_eq!(stats["interval"].as_u64(), Some(30));
    assert_eq!(stats["isBotActive"], true);
}

#[tokio::test]
async fn test_settings_rejects_malformed_body() {
    let t = test_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/settings")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, _) = send(&t.app, request).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_test_post_when_disconnected() {
    let t = test_app().await;
    let (status, json) = send(&t.app, post_json("/api/test", Value::Null)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);
    assert!(json["error"].is_string());
    assert!(t.transport.sent().is_empty());
}

#[tokio::test]
async fn test_test_post_when_active() {
    let t = test_app().await;
    t.bot.handle_event(TransportEvent::Opened).await;

    let (_, json) = send(&t.app, post_json("/api/test", Value::Null)).await;

    assert_eq!(json["success"], true);
    assert!(json.get("error").is_none());
    assert_eq!(t.transport.sent().len(), 1);
}

#[tokio::test]
async fn test_dashboard_renders() {
    let t = test_app().await;
    let response = t.app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("WATCHDOG PRO"));
    assert!(html.contains("Disconnected"));
    assert!(html.contains("/api/stats"));
}
