mod common;

use bitlink::domain::repositories::LinkRepository;
use bitlink::utils::codec::{SEQUENCE_START, encode};
use serde_json::{Value, json};

#[tokio::test]
async fn test_first_link_gets_sequence_start_key() {
    let (server, _store) = common::create_test_server().await;

    let response = server
        .post("/api/v1/short")
        .json(&json!({ "url": "http://example.com", "key": common::TEST_KEY }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["url_short"], encode(SEQUENCE_START));
    assert_eq!(json["url_short"], "9");
    assert_eq!(json["url_long"], "http://example.com");
    assert_eq!(json["wish"], false);
}

#[tokio::test]
async fn test_same_url_twice_returns_same_key() {
    let (server, store) = common::create_test_server().await;
    let body = json!({ "url": "https://example.com/page", "key": common::TEST_KEY });

    let first = server.post("/api/v1/short").json(&body).await;
    let second = server.post("/api/v1/short").json(&body).await;

    first.assert_status_ok();
    second.assert_status_ok();
    assert_eq!(
        first.json::<Value>()["url_short"],
        second.json::<Value>()["url_short"]
    );
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_sequential_keys_ignore_interleaved_wish() {
    let (server, _store) = common::create_test_server().await;

    let first = server
        .post("/api/v1/short")
        .json(&json!({ "url": "https://a.example.com", "key": common::TEST_KEY }))
        .await;
    let wish = server
        .post("/api/v1/short")
        .json(&json!({ "url": "https://b.example.com", "wish": "promo", "key": common::TEST_KEY }))
        .await;
    let second = server
        .post("/api/v1/short")
        .json(&json!({ "url": "https://c.example.com", "key": common::TEST_KEY }))
        .await;

    assert_eq!(first.json::<Value>()["url_short"], encode(8));
    assert_eq!(wish.json::<Value>()["url_short"], "promo");
    assert_eq!(wish.json::<Value>()["wish"], true);
    assert_eq!(second.json::<Value>()["url_short"], encode(9));
}

#[tokio::test]
async fn test_sequence_skips_key_taken_by_wish() {
    let (server, _store) = common::create_test_server().await;

    server
        .post("/api/v1/short")
        .json(&json!({ "url": "https://taken.example.com", "wish": "9", "key": common::TEST_KEY }))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/v1/short")
        .json(&json!({ "url": "https://next.example.com", "key": common::TEST_KEY }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["url_short"], "A");
}

#[tokio::test]
async fn test_wish_is_idempotent_for_same_url() {
    let (server, _store) = common::create_test_server().await;
    let body = json!({ "url": "https://example.com", "wish": "abc", "key": common::TEST_KEY });

    let first = server.post("/api/v1/short").json(&body).await;
    let second = server.post("/api/v1/short").json(&body).await;

    first.assert_status_ok();
    second.assert_status_ok();
    assert_eq!(second.json::<Value>()["url_short"], "abc");
}

#[tokio::test]
async fn test_wish_for_different_url_conflicts() {
    let (server, _store) = common::create_test_server().await;

    server
        .post("/api/v1/short")
        .json(&json!({ "url": "https://example.com", "wish": "abc", "key": common::TEST_KEY }))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/v1/short")
        .json(&json!({
            "url": "https://other.example.com",
            "wish": "abc",
            "key": common::TEST_KEY
        }))
        .await;

    assert_eq!(response.status_code(), 409);
    let json = response.json::<Value>();
    assert_eq!(json["code"], 409);
    assert_eq!(json["details"]["key"], "abc");
}

#[tokio::test]
async fn test_invalid_wish_rejected() {
    let (server, _store) = common::create_test_server().await;

    for wish in ["has space", "api", "plus+"] {
        let response = server
            .post("/api/v1/short")
            .json(&json!({ "url": "https://example.com", "wish": wish, "key": common::TEST_KEY }))
            .await;

        assert_eq!(response.status_code(), 400, "wish {:?}", wish);
    }
}

#[tokio::test]
async fn test_invalid_url_rejected() {
    let (server, store) = common::create_test_server().await;

    for url in ["not a url", "ftp://example.com/file", "javascript:alert(1)", ""] {
        let response = server
            .post("/api/v1/short")
            .json(&json!({ "url": url, "key": common::TEST_KEY }))
            .await;

        assert_eq!(response.status_code(), 400, "url {:?}", url);
        assert_eq!(response.json::<Value>()["code"], 400);
    }

    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let (server, _store) = common::create_test_server().await;

    let response = server
        .post("/api/v1/short")
        .content_type("application/json")
        .text("{not json")
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["code"], 400);
}

#[tokio::test]
async fn test_missing_or_unknown_key_unauthorized() {
    let (server, _store) = common::create_test_server().await;

    let missing = server
        .post("/api/v1/short")
        .json(&json!({ "url": "https://example.com" }))
        .await;
    let unknown = server
        .post("/api/v1/short")
        .json(&json!({ "url": "https://example.com", "key": "X".repeat(32) }))
        .await;
    let short = server
        .post("/api/v1/short")
        .json(&json!({ "url": "https://example.com", "key": "abc" }))
        .await;

    for response in [missing, unknown, short] {
        assert_eq!(response.status_code(), 401);
        let json = response.json::<Value>();
        assert_eq!(json["code"], 401);
        assert_eq!(json["details"]["reason"], "unauthorized");
    }
}

#[tokio::test]
async fn test_disabled_key_denied() {
    let (server, store) = common::create_test_server().await;
    let disabled = "D".repeat(32);
    common::add_api_key(&store, &disabled, -1).await;

    let response = server
        .post("/api/v1/short")
        .json(&json!({ "url": "https://example.com", "key": disabled }))
        .await;

    assert_eq!(response.status_code(), 401);
    assert_eq!(response.json::<Value>()["details"]["reason"], "disabled");
}

#[tokio::test]
async fn test_daily_quota_enforced() {
    let (server, store) = common::create_test_server().await;
    let limited = "Q".repeat(32);
    common::add_api_key(&store, &limited, 5).await;

    for i in 0..5 {
        server
            .post("/api/v1/short")
            .json(&json!({ "url": format!("https://example.com/{}", i), "key": limited }))
            .await
            .assert_status_ok();
    }

    let response = server
        .post("/api/v1/short")
        .json(&json!({ "url": "https://example.com/6", "key": limited }))
        .await;

    assert_eq!(response.status_code(), 429);
    assert_eq!(
        response.json::<Value>()["details"]["reason"],
        "quota_exceeded"
    );

    // Other keys are unaffected.
    server
        .post("/api/v1/short")
        .json(&json!({ "url": "https://example.com/6", "key": common::TEST_KEY }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_unlimited_key_never_exhausted() {
    let (server, _store) = common::create_test_server().await;

    for i in 0..20 {
        server
            .post("/api/v1/short")
            .json(&json!({ "url": format!("https://example.com/{}", i), "key": common::TEST_KEY }))
            .await
            .assert_status_ok();
    }
}
