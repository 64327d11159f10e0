mod common;

use sqlx::PgPool;
use std::sync::Arc;
use bitlink::domain::entities::{ApiKey, Quota};
use bitlink::domain::repositories::ApiKeyRepository;
use bitlink::error::AppError;
use bitlink::infrastructure::persistence::PgApiKeyRepository;

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_create_and_find(pool: PgPool) {
    let repo = PgApiKeyRepository::new(Arc::new(pool));
    let key = "A".repeat(32);

    repo.create(ApiKey::new(key.clone(), 10)).await.unwrap();

    let found = repo.find(&key).await.unwrap().unwrap();
    assert_eq!(found.key, key);
    assert_eq!(found.quota(), Quota::Daily(10));

    assert!(repo.find(&"B".repeat(32)).await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_create_duplicate_conflicts(pool: PgPool) {
    let key = "C".repeat(32);
    common::create_pg_api_key(&pool, &key, 0).await;
    let repo = PgApiKeyRepository::new(Arc::new(pool));

    let result = repo.create(ApiKey::new(key, 0)).await;

    assert!(matches!(result, Err(AppError::KeyConflict { .. })));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_list_and_set_daily_limit(pool: PgPool) {
    common::create_pg_api_key(&pool, &"b".repeat(32), 0).await;
    common::create_pg_api_key(&pool, &"a".repeat(32), 3).await;
    let repo = PgApiKeyRepository::new(Arc::new(pool));

    let keys = repo.list().await.unwrap();
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0].key, "a".repeat(32));

    assert!(repo.set_daily_limit(&"a".repeat(32), -1).await.unwrap());
    assert!(!repo.set_daily_limit(&"z".repeat(32), 1).await.unwrap());

    let disabled = repo.find(&"a".repeat(32)).await.unwrap().unwrap();
    assert_eq!(disabled.quota(), Quota::Disabled);
}
