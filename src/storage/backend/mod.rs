//! SeaORM storage backend (SQLite)
//!
//! [`LinkStore`] owns link persistence, [`UserStore`] owns admin accounts.
//! Both share one connection pool.

mod click_sink;
mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;
mod users;

use sea_orm::{DatabaseConnection, DbErr};

use crate::errors::ShortUrlError;

pub use connection::{connect_database, connect_sqlite, run_migrations};
pub use converters::{model_to_link, model_to_user};
pub use retry::RetryConfig;
pub use users::UserStore;

/// Link persistence.
///
/// # Uniqueness contract
///
/// `code` uniqueness is enforced by the `idx_links_code` unique index, not
/// by a check-then-insert in this type. [`LinkStore::create`] therefore may
/// fail with [`ShortUrlError::Duplicate`] even when a prior
/// [`LinkStore::code_exists`] returned `false`. For generated codes that
/// outcome is retryable with a fresh code; for admin-chosen codes it is
/// final and reported to the caller.
#[derive(Clone)]
pub struct LinkStore {
    db: DatabaseConnection,
    retry_config: RetryConfig,
}

impl LinkStore {
    pub fn new(db: DatabaseConnection, retry_config: RetryConfig) -> Self {
        Self { db, retry_config }
    }

    /// Liveness check used by the health endpoint
    pub async fn ping(&self) -> crate::errors::Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| map_db_err("ping", e))
    }
}

/// Convert a `DbErr`, prefixing storage failures with the operation name.
/// Duplicate and not-found classifications pass through untouched.
pub(crate) fn map_db_err(operation: &str, err: DbErr) -> ShortUrlError {
    match ShortUrlError::from(err) {
        ShortUrlError::Storage(msg) => ShortUrlError::storage(format!("{}: {}", operation, msg)),
        other => other,
    }
}
