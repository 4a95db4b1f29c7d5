//! Account bootstrap and credential checks

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::{Result, ShortUrlError};
use crate::storage::UserStore;
use crate::utils::password::{MIN_PASSWORD_LEN, hash_password, is_argon2_hash, verify_password};

/// The authenticated caller of a protected operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
}

impl Principal {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

pub struct AuthService {
    users: Arc<UserStore>,
}

impl AuthService {
    pub fn new(users: Arc<UserStore>) -> Self {
        Self { users }
    }

    /// Create the first admin account when the users table is empty.
    ///
    /// Returns whether an account was created. With no accounts and no
    /// configured password this is a `Config` error; startup must abort.
    pub async fn ensure_admin(&self, username: &str, password: Option<&str>) -> Result<bool> {
        if self.users.count().await? > 0 {
            return Ok(false);
        }

        let Some(password) = password.filter(|p| !p.trim().is_empty()) else {
            return Err(ShortUrlError::config(
                "no admin account exists and no admin password is configured \
                 (set ADMIN_PASSWORD or auth.admin_password)",
            ));
        };

        let hash = hash_blocking(password.to_string()).await?;
        self.users.create(username.trim(), &hash).await?;
        info!("Bootstrapped admin account '{}'", username.trim());
        Ok(true)
    }

    /// Check a username/password pair. Unknown users and wrong passwords
    /// both yield `None`.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<Principal>> {
        let username = username.trim();
        let Some(user) = self.users.find_by_username(username).await? else {
            return Ok(None);
        };

        if !is_argon2_hash(&user.password_hash) {
            warn!("Stored password for '{}' is not an Argon2 hash, rejecting login", username);
            return Ok(None);
        }

        let password = password.to_string();
        let stored = user.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
            .await
            .map_err(|e| ShortUrlError::storage(format!("password check aborted: {}", e)))?;

        match verified {
            Ok(true) => Ok(Some(Principal::new(user.username))),
            Ok(false) => Ok(None),
            Err(e) => {
                warn!("Stored password hash for '{}' is unreadable: {}", username, e);
                Ok(None)
            }
        }
    }

    /// Set a new password, creating the account if it does not exist yet.
    pub async fn reset_password(&self, username: &str, password: &str) -> Result<()> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ShortUrlError::validation(format!(
                "password must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }

        let username = username.trim();
        let hash = hash_blocking(password.to_string()).await?;
        match self.users.find_by_username(username).await? {
            Some(_) => self.users.set_password(username, &hash).await,
            None => self.users.create(username, &hash).await.map(|_| ()),
        }
    }
}

async fn hash_blocking(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ShortUrlError::storage(format!("password hashing aborted: {}", e)))?
        .map_err(ShortUrlError::from)
}
