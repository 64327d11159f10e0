mod common;

use bitlink::domain::repositories::{LinkRepository, StatsRepository};
use serde_json::json;

async fn shorten(server: &axum_test::TestServer, url: &str) -> String {
    let response = server
        .post("/api/v1/short")
        .json(&json!({ "url": url, "key": common::TEST_KEY }))
        .await;
    response.json::<serde_json::Value>()["url_short"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_redirect_is_permanent_and_records_access() {
    let (server, store) = common::create_test_server().await;

    let key = shorten(&server, "http://example.com").await;
    assert_eq!(key, "9");

    let response = server.get("/9").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "http://example.com");

    let link = store.find_by_key("9").await.unwrap().unwrap();
    let events = store.list_by_link(link.id).await.unwrap();
    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn test_redirect_to_custom_key() {
    let (server, _store) = common::create_test_server().await;

    server
        .post("/api/v1/short")
        .json(&json!({
            "url": "https://rust-lang.org/learn",
            "wish": "learn",
            "key": common::TEST_KEY
        }))
        .await
        .assert_status_ok();

    let response = server.get("/learn").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://rust-lang.org/learn");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (server, _store) = common::create_test_server().await;

    let response = server.get("/nonexistent").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(response.json::<serde_json::Value>()["code"], 404);
}

#[tokio::test]
async fn test_info_view_renders_without_recording() {
    let (server, store) = common::create_test_server().await;

    shorten(&server, "http://example.com").await;
    server.get("/9").await;

    let response = server.get("/9+").await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("http://example.com"));
    assert!(body.contains("sequential"));

    let link = store.find_by_key("9").await.unwrap().unwrap();
    assert_eq!(store.list_by_link(link.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_info_view_unknown_key() {
    let (server, _store) = common::create_test_server().await;

    let response = server.get("/missing+").await;

    assert_eq!(response.status_code(), 404);
}
