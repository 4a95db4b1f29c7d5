//! Link management service
//!
//! Orchestrates code allocation and persistence for the admin API, and the
//! lookup used by the redirect handler.

use std::future::Future;
use std::sync::Arc;

use tracing::{info, warn};

use super::Principal;
use crate::config::LinksConfig;
use crate::errors::{Result, ShortUrlError};
use crate::storage::{Link, LinkStore};
use crate::utils::shortcode::{generate_unique, validate_custom};
use crate::utils::url_validator::{validate_url, validation_error_message};

/// Inserts tried for a generated code: the first, plus one retry with a
/// fresh code if another request claimed it in between.
pub const GENERATED_INSERT_ATTEMPTS: usize = 2;

/// First path segments owned by other routes; a link with one of these
/// codes could never be reached.
pub const RESERVED_CODES: &[&str] = &["api", "health"];

fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.iter().any(|r| r.eq_ignore_ascii_case(code))
}

// ============ Request DTOs ============

/// Request to create a new link
#[derive(Debug, Clone, Default)]
pub struct CreateLinkRequest {
    /// Custom code; a random one is generated when absent or blank
    pub code: Option<String>,
    pub target_url: String,
}

/// Request to update an existing link
#[derive(Debug, Clone)]
pub struct UpdateLinkRequest {
    pub target_url: String,
    /// Omitted means enabled
    pub enabled: Option<bool>,
}

// ============ LinkService ============

pub struct LinkService {
    store: Arc<LinkStore>,
    code_length: usize,
    list_limit: u64,
}

impl LinkService {
    pub fn new(store: Arc<LinkStore>, config: &LinksConfig) -> Self {
        Self {
            store,
            code_length: config.code_length,
            list_limit: config.list_limit,
        }
    }

    pub fn store(&self) -> &Arc<LinkStore> {
        &self.store
    }

    pub async fn create_link(&self, principal: &Principal, req: CreateLinkRequest) -> Result<Link> {
        let target_url = normalize_target(&req.target_url)?;
        let custom = req
            .code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let link = match custom {
            Some(code) => {
                if !validate_custom(code) {
                    return Err(ShortUrlError::validation(
                        "invalid code: use 3-32 letters, digits, '-' or '_'",
                    ));
                }
                if is_reserved(code) {
                    return Err(ShortUrlError::validation(format!(
                        "code '{}' is reserved",
                        code
                    )));
                }
                self.store.create(code, &target_url).await?
            }
            None => self.create_with_generated_code(&target_url).await?,
        };

        info!(
            "LinkService: {} created link {} ({}) -> {}",
            principal.username, link.id, link.code, link.target_url
        );
        Ok(link)
    }

    async fn create_with_generated_code(&self, target_url: &str) -> Result<Link> {
        let store = &self.store;
        insert_with_generated_code(
            self.code_length,
            |candidate| async move {
                if is_reserved(&candidate) {
                    return Ok(true);
                }
                store.code_exists(&candidate).await
            },
            |code| async move { store.create(&code, target_url).await },
        )
        .await
    }

    pub async fn get_link(&self, _principal: &Principal, id: i32) -> Result<Link> {
        self.store.get_by_id(id).await
    }

    /// Newest first. `limit` is clamped to `[1, list_limit]`.
    pub async fn list_links(&self, _principal: &Principal, limit: Option<u64>) -> Result<Vec<Link>> {
        let limit = limit.unwrap_or(self.list_limit).clamp(1, self.list_limit);
        self.store.list(limit).await
    }

    pub async fn update_link(
        &self,
        principal: &Principal,
        id: i32,
        req: UpdateLinkRequest,
    ) -> Result<Link> {
        let target_url = normalize_target(&req.target_url)?;
        let enabled = req.enabled.unwrap_or(true);

        let link = self.store.update(id, &target_url, enabled).await?;
        info!(
            "LinkService: {} updated link {} ({}), enabled = {}",
            principal.username, link.id, link.code, link.enabled
        );
        Ok(link)
    }

    /// Link a visitor should be sent to, if any.
    ///
    /// Empty codes, codes with a path separator, unknown codes and disabled
    /// links all resolve to `None`. Only storage failures are errors.
    pub async fn resolve(&self, code: &str) -> Result<Option<Link>> {
        if code.is_empty() || code.contains('/') {
            return Ok(None);
        }

        match self.store.get_by_code(code).await {
            Ok(link) if link.enabled => Ok(Some(link)),
            Ok(_) => Ok(None),
            Err(ShortUrlError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Generate a free code and insert it.
///
/// A `Duplicate` from `insert` means another writer claimed the code after
/// the `exists` check; a fresh code is tried, up to
/// `GENERATED_INSERT_ATTEMPTS` inserts in total.
async fn insert_with_generated_code<E, EF, I, IF>(
    length: usize,
    mut exists: E,
    mut insert: I,
) -> Result<Link>
where
    E: FnMut(String) -> EF,
    EF: Future<Output = Result<bool>>,
    I: FnMut(String) -> IF,
    IF: Future<Output = Result<Link>>,
{
    let mut attempt = 1;
    loop {
        let code = generate_unique(length, &mut exists).await?;

        match insert(code.clone()).await {
            Ok(link) => return Ok(link),
            Err(e) if e.is_retryable_duplicate() && attempt < GENERATED_INSERT_ATTEMPTS => {
                warn!(
                    "LinkService: generated code {} was taken concurrently, retrying",
                    code
                );
                attempt += 1;
            }
            Err(e) if e.is_retryable_duplicate() => {
                return Err(ShortUrlError::generation_exhausted(format!(
                    "generated codes kept colliding after {} inserts",
                    GENERATED_INSERT_ATTEMPTS
                )));
            }
            Err(e) => return Err(e),
        }
    }
}

/// Trim and validate a target URL. The trimmed text is what gets stored.
fn normalize_target(raw: &str) -> Result<String> {
    let target = raw.trim();
    validate_url(target)
        .map_err(|e| ShortUrlError::validation(validation_error_message(&e)))?;
    Ok(target.to_string())
}
