#![allow(dead_code)]

use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;
use bitlink::api::handlers::{health_handler, lookup_handler, redirect_handler, shorten_handler};
use bitlink::domain::entities::ApiKey;
use bitlink::domain::repositories::ApiKeyRepository;
use bitlink::infrastructure::cache::NullCache;
use bitlink::infrastructure::persistence::MemoryStore;
use bitlink::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

/// Unlimited API key seeded by [`create_test_server`].
pub const TEST_KEY: &str = "TestKey0TestKey1TestKey2TestKey3";

pub fn create_test_state(store: Arc<MemoryStore>) -> AppState {
    AppState::new(store.clone(), store.clone(), store, Arc::new(NullCache))
}

/// Same routes as the production router, without rate limiting or path normalization.
pub fn test_router(state: AppState) -> Router {
    Router::new()
        .route("/{key}", get(redirect_handler))
        .route("/health", get(health_handler))
        .route("/api/v1/short", post(shorten_handler))
        .route("/api/v1/long", post(lookup_handler))
        .with_state(state)
}

pub async fn add_api_key(store: &MemoryStore, key: &str, daily_limit: i32) {
    store
        .create(ApiKey::new(key.to_string(), daily_limit))
        .await
        .unwrap();
}

/// A server over an empty in-memory store holding only [`TEST_KEY`].
pub async fn create_test_server() -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    add_api_key(&store, TEST_KEY, 0).await;

    let server = TestServer::new(test_router(create_test_state(store.clone()))).unwrap();

    (server, store)
}

pub async fn create_pg_api_key(pool: &PgPool, key: &str, daily_limit: i32) {
    sqlx::query(r#"INSERT INTO api ("key", daily_limit) VALUES ($1, $2)"#)
        .bind(key)
        .bind(daily_limit)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_pg_link(pool: &PgPool, key: &str, url: &str, custom: bool) -> i64 {
    sqlx::query_scalar(r#"INSERT INTO links ("key", url, custom) VALUES ($1, $2, $3) RETURNING id"#)
        .bind(key)
        .bind(url)
        .bind(custom)
        .fetch_one(pool)
        .await
        .unwrap()
}
