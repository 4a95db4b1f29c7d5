use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A short code bound to its target URL.
///
/// `code` never changes after creation; only `target_url`, `enabled` and
/// `click_count` move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: i32,
    pub code: String,
    pub target_url: String,
    pub enabled: bool,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
