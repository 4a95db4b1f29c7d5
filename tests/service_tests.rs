//! LinkService / AuthService tests
//!
//! Tests for the service layer on top of a temporary SQLite database.

use std::collections::HashSet;
use std::sync::Arc;

use shorturl::config::{AuthConfig, DatabaseConfig, LinksConfig};
use shorturl::errors::ShortUrlError;
use shorturl::services::{
    AuthService, CreateLinkRequest, LinkService, Principal, UpdateLinkRequest,
};
use shorturl::storage::{LinkStore, RetryConfig, UserStore, connect_database};
use shorturl::utils::shortcode::validate_auto;
use tempfile::TempDir;

// =============================================================================
// Test Setup
// =============================================================================

struct TestEnv {
    links: Arc<LinkService>,
    auth: AuthService,
    users: Arc<UserStore>,
    _dir: TempDir,
}

async fn create_test_env(links_config: LinksConfig) -> TestEnv {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = DatabaseConfig {
        path: temp_dir
            .path()
            .join("service_test.db")
            .to_string_lossy()
            .into_owned(),
        ..Default::default()
    };
    let db = connect_database(&config)
        .await
        .expect("Failed to open database");
    let retry = RetryConfig::from(&config);

    let store = Arc::new(LinkStore::new(db.clone(), retry));
    let users = Arc::new(UserStore::new(db, retry));

    TestEnv {
        links: Arc::new(LinkService::new(store, &links_config)),
        auth: AuthService::new(users.clone()),
        users,
        _dir: temp_dir,
    }
}

fn links_config(code_length: usize, list_limit: u64) -> LinksConfig {
    LinksConfig {
        code_length,
        list_limit,
    }
}

fn admin() -> Principal {
    Principal::new("admin")
}

fn request(code: Option<&str>, target: &str) -> CreateLinkRequest {
    CreateLinkRequest {
        code: code.map(str::to_string),
        target_url: target.to_string(),
    }
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_with_generated_code() {
    let env = create_test_env(links_config(6, 500)).await;

    let link = env
        .links
        .create_link(&admin(), request(None, "https://example.com"))
        .await
        .unwrap();

    assert_eq!(link.code.len(), 6);
    assert!(validate_auto(&link.code));
    assert!(link.enabled);
    assert_eq!(link.click_count, 0);
}

#[tokio::test]
async fn test_blank_custom_code_means_generated() {
    let env = create_test_env(links_config(8, 500)).await;

    let link = env
        .links
        .create_link(&admin(), request(Some("   "), "https://example.com"))
        .await
        .unwrap();
    assert_eq!(link.code.len(), 8);
}

#[tokio::test]
async fn test_generated_codes_are_distinct() {
    let env = create_test_env(links_config(4, 500)).await;

    let mut codes = HashSet::new();
    for _ in 0..50 {
        let link = env
            .links
            .create_link(&admin(), request(None, "https://example.com"))
            .await
            .unwrap();
        assert!(codes.insert(link.code));
    }
}

#[tokio::test]
async fn test_create_with_custom_code_and_trimmed_target() {
    let env = create_test_env(links_config(6, 500)).await;

    let link = env
        .links
        .create_link(
            &admin(),
            request(Some("my-promo_1"), "  https://example.com/a?b=c  "),
        )
        .await
        .unwrap();
    assert_eq!(link.code, "my-promo_1");
    assert_eq!(link.target_url, "https://example.com/a?b=c");
}

#[tokio::test]
async fn test_duplicate_custom_code() {
    let env = create_test_env(links_config(6, 500)).await;

    env.links
        .create_link(&admin(), request(Some("taken"), "https://a.com"))
        .await
        .unwrap();
    let err = env
        .links
        .create_link(&admin(), request(Some("taken"), "https://b.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, ShortUrlError::Duplicate(_)));
}

#[tokio::test]
async fn test_invalid_inputs() {
    let env = create_test_env(links_config(6, 500)).await;

    let cases = [
        request(Some("ab"), "https://example.com"),
        request(Some("has/slash"), "https://example.com"),
        request(Some("spa ce"), "https://example.com"),
        request(Some("api"), "https://example.com"),
        request(Some("health"), "https://example.com"),
        request(None, "ftp://example.com"),
        request(None, "not a url"),
        request(None, ""),
    ];

    for case in cases {
        let err = env.links.create_link(&admin(), case.clone()).await.unwrap_err();
        assert!(
            matches!(err, ShortUrlError::Validation(_)),
            "{:?} gave {:?}",
            case,
            err
        );
    }
    assert_eq!(env.links.store().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_concurrent_custom_code_single_winner() {
    let env = create_test_env(links_config(6, 500)).await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let links = env.links.clone();
        handles.push(tokio::spawn(async move {
            links
                .create_link(
                    &admin(),
                    request(Some("race"), &format!("https://example.com/{}", i)),
                )
                .await
        }));
    }

    let mut created = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(ShortUrlError::Duplicate(_)) => duplicates += 1,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(env.links.store().count().await.unwrap(), 1);
}

// =============================================================================
// Read / update
// =============================================================================

#[tokio::test]
async fn test_list_limit_is_clamped() {
    let env = create_test_env(links_config(6, 3)).await;

    for i in 0..5 {
        env.links
            .create_link(&admin(), request(None, &format!("https://example.com/{}", i)))
            .await
            .unwrap();
    }

    assert_eq!(env.links.list_links(&admin(), None).await.unwrap().len(), 3);
    assert_eq!(
        env.links.list_links(&admin(), Some(100)).await.unwrap().len(),
        3
    );
    assert_eq!(env.links.list_links(&admin(), Some(0)).await.unwrap().len(), 1);
    assert_eq!(env.links.list_links(&admin(), Some(2)).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_defaults_enabled_to_true() {
    let env = create_test_env(links_config(6, 500)).await;
    let link = env
        .links
        .create_link(&admin(), request(Some("toggle"), "https://a.com"))
        .await
        .unwrap();

    let disabled = env
        .links
        .update_link(
            &admin(),
            link.id,
            UpdateLinkRequest {
                target_url: "https://b.com".to_string(),
                enabled: Some(false),
            },
        )
        .await
        .unwrap();
    assert!(!disabled.enabled);
    assert!(env.links.resolve("toggle").await.unwrap().is_none());

    let enabled = env
        .links
        .update_link(
            &admin(),
            link.id,
            UpdateLinkRequest {
                target_url: "https://c.com".to_string(),
                enabled: None,
            },
        )
        .await
        .unwrap();
    assert!(enabled.enabled);
    assert_eq!(enabled.code, "toggle");
    assert_eq!(
        env.links.resolve("toggle").await.unwrap().unwrap().target_url,
        "https://c.com"
    );
}

#[tokio::test]
async fn test_update_rejects_bad_url_and_missing_id() {
    let env = create_test_env(links_config(6, 500)).await;
    let link = env
        .links
        .create_link(&admin(), request(Some("keep"), "https://a.com"))
        .await
        .unwrap();

    let bad = env
        .links
        .update_link(
            &admin(),
            link.id,
            UpdateLinkRequest {
                target_url: "javascript:alert(1)".to_string(),
                enabled: None,
            },
        )
        .await;
    assert!(matches!(bad, Err(ShortUrlError::Validation(_))));
    assert_eq!(
        env.links.get_link(&admin(), link.id).await.unwrap().target_url,
        "https://a.com"
    );

    let missing = env
        .links
        .update_link(
            &admin(),
            link.id + 100,
            UpdateLinkRequest {
                target_url: "https://b.com".to_string(),
                enabled: None,
            },
        )
        .await;
    assert!(matches!(missing, Err(ShortUrlError::NotFound(_))));
}

#[tokio::test]
async fn test_resolve_edge_cases() {
    let env = create_test_env(links_config(6, 500)).await;
    env.links
        .create_link(&admin(), request(Some("live"), "https://example.com"))
        .await
        .unwrap();

    assert!(env.links.resolve("live").await.unwrap().is_some());
    assert!(env.links.resolve("").await.unwrap().is_none());
    assert!(env.links.resolve("live/extra").await.unwrap().is_none());
    assert!(env.links.resolve("unknown").await.unwrap().is_none());
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn test_ensure_admin_bootstrap() {
    let env = create_test_env(links_config(6, 500)).await;

    let err = env.auth.ensure_admin("admin", None).await.unwrap_err();
    assert!(matches!(err, ShortUrlError::Config(_)));

    assert!(env.auth.ensure_admin("admin", Some("s3cret-pass")).await.unwrap());
    // 已有账号时不再创建
    assert!(!env.auth.ensure_admin("admin", Some("other-pass")).await.unwrap());
    assert!(!env.auth.ensure_admin("admin", None).await.unwrap());

    let principal = env
        .auth
        .authenticate("admin", "s3cret-pass")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(principal.username, "admin");
}

#[tokio::test]
async fn test_authenticate_rejects() {
    let env = create_test_env(links_config(6, 500)).await;
    env.auth.ensure_admin("admin", Some("s3cret-pass")).await.unwrap();

    assert!(env.auth.authenticate("admin", "wrong").await.unwrap().is_none());
    assert!(env
        .auth
        .authenticate("nobody", "s3cret-pass")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_reset_password() {
    let env = create_test_env(links_config(6, 500)).await;
    env.auth.ensure_admin("admin", Some("first-pass")).await.unwrap();

    assert!(matches!(
        env.auth.reset_password("admin", "short").await,
        Err(ShortUrlError::Validation(_))
    ));

    env.auth.reset_password("admin", "second-pass").await.unwrap();
    assert!(env.auth.authenticate("admin", "first-pass").await.unwrap().is_none());
    assert!(env.auth.authenticate("admin", "second-pass").await.unwrap().is_some());

    // 不存在的账号会被创建
    env.auth.reset_password("ops", "ops-password").await.unwrap();
    assert!(env.auth.authenticate("ops", "ops-password").await.unwrap().is_some());
}

#[tokio::test]
async fn test_bootstrap_password_is_not_trimmed() {
    let env = create_test_env(links_config(6, 500)).await;
    let config = AuthConfig {
        admin_password: Some("  padded-secret ".to_string()),
        ..Default::default()
    };

    assert!(env
        .auth
        .ensure_admin("admin", config.bootstrap_password())
        .await
        .unwrap());

    assert!(env
        .auth
        .authenticate("admin", "  padded-secret ")
        .await
        .unwrap()
        .is_some());
    assert!(env
        .auth
        .authenticate("admin", "padded-secret")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_authenticate_rejects_non_argon2_hash() {
    let env = create_test_env(links_config(6, 500)).await;
    env.users.create("legacy", "plaintext-pass").await.unwrap();

    assert!(env
        .auth
        .authenticate("legacy", "plaintext-pass")
        .await
        .unwrap()
        .is_none());
}
