//! LinkStore / UserStore tests against a real SQLite file

use shorturl::config::DatabaseConfig;
use shorturl::errors::ShortUrlError;
use shorturl::storage::{LinkStore, RetryConfig, UserStore, connect_database};
use tempfile::TempDir;

// =============================================================================
// Test Setup
// =============================================================================

async fn create_stores() -> (LinkStore, UserStore, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = DatabaseConfig {
        path: temp_dir
            .path()
            .join("storage_test.db")
            .to_string_lossy()
            .into_owned(),
        ..Default::default()
    };
    let db = connect_database(&config)
        .await
        .expect("Failed to open database");
    let retry = RetryConfig::from(&config);

    (
        LinkStore::new(db.clone(), retry),
        UserStore::new(db, retry),
        temp_dir,
    )
}

// =============================================================================
// Links
// =============================================================================

#[tokio::test]
async fn test_create_sets_defaults() {
    let (store, _, _dir) = create_stores().await;

    let link = store.create("abc", "https://example.com").await.unwrap();
    assert_eq!(link.code, "abc");
    assert_eq!(link.target_url, "https://example.com");
    assert!(link.enabled);
    assert_eq!(link.click_count, 0);
    assert_eq!(link.created_at, link.updated_at);
}

#[tokio::test]
async fn test_duplicate_code_rejected() {
    let (store, _, _dir) = create_stores().await;

    store.create("dup", "https://a.com").await.unwrap();
    let err = store.create("dup", "https://b.com").await.unwrap_err();
    assert!(matches!(err, ShortUrlError::Duplicate(_)), "got {:?}", err);

    // 原记录不受影响
    let link = store.get_by_code("dup").await.unwrap();
    assert_eq!(link.target_url, "https://a.com");
}

#[tokio::test]
async fn test_codes_are_case_sensitive() {
    let (store, _, _dir) = create_stores().await;

    store.create("Case", "https://upper.com").await.unwrap();
    store.create("case", "https://lower.com").await.unwrap();

    assert_eq!(
        store.get_by_code("Case").await.unwrap().target_url,
        "https://upper.com"
    );
    assert_eq!(
        store.get_by_code("case").await.unwrap().target_url,
        "https://lower.com"
    );
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let (store, _, _dir) = create_stores().await;

    assert!(matches!(
        store.get_by_code("nope").await,
        Err(ShortUrlError::NotFound(_))
    ));
    assert!(matches!(
        store.get_by_id(42).await,
        Err(ShortUrlError::NotFound(_))
    ));
    assert!(!store.code_exists("nope").await.unwrap());
}

#[tokio::test]
async fn test_update_keeps_code_and_clicks() {
    let (store, _, _dir) = create_stores().await;

    let link = store.create("upd", "https://old.com").await.unwrap();
    store.increment_click(link.id).await.unwrap();

    let updated = store.update(link.id, "https://new.com", false).await.unwrap();
    assert_eq!(updated.code, "upd");
    assert_eq!(updated.target_url, "https://new.com");
    assert!(!updated.enabled);
    assert_eq!(updated.click_count, 1);
    assert_eq!(updated.created_at, link.created_at);
    assert!(updated.updated_at >= link.updated_at);
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let (store, _, _dir) = create_stores().await;

    assert!(matches!(
        store.update(99, "https://x.com", true).await,
        Err(ShortUrlError::NotFound(_))
    ));
    assert!(matches!(
        store.increment_click(99).await,
        Err(ShortUrlError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_concurrent_increments_are_not_lost() {
    let (store, _, _dir) = create_stores().await;
    let link = store.create("hot", "https://example.com").await.unwrap();

    let store = std::sync::Arc::new(store);
    let mut handles = Vec::new();
    for _ in 0..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.increment_click(link.id).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.get_by_id(link.id).await.unwrap().click_count, 20);
}

#[tokio::test]
async fn test_list_newest_first_with_limit() {
    let (store, _, _dir) = create_stores().await;

    for code in ["one", "two", "three"] {
        store.create(code, "https://example.com").await.unwrap();
    }

    let all = store.list(10).await.unwrap();
    let codes: Vec<&str> = all.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, vec!["three", "two", "one"]);

    let limited = store.list(2).await.unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].code, "three");

    assert_eq!(store.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_ping() {
    let (store, _, _dir) = create_stores().await;
    assert!(store.ping().await.is_ok());
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_user_lifecycle() {
    let (_, users, _dir) = create_stores().await;

    assert_eq!(users.count().await.unwrap(), 0);
    assert!(users.find_by_username("admin").await.unwrap().is_none());

    users.create("admin", "hash-1").await.unwrap();
    assert_eq!(users.count().await.unwrap(), 1);

    users.set_password("admin", "hash-2").await.unwrap();
    let user = users.find_by_username("admin").await.unwrap().unwrap();
    assert_eq!(user.password_hash, "hash-2");

    assert!(matches!(
        users.create("admin", "hash-3").await,
        Err(ShortUrlError::Duplicate(_))
    ));
    assert!(matches!(
        users.set_password("ghost", "hash").await,
        Err(ShortUrlError::NotFound(_))
    ));
}
