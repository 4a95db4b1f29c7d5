//! Admin account persistence

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};
use tracing::info;

use super::converters::{model_to_user, new_user_active_model};
use super::{RetryConfig, map_db_err, retry};
use crate::errors::{Result, ShortUrlError};
use crate::storage::User;

use migration::entities::user;

#[derive(Clone)]
pub struct UserStore {
    db: DatabaseConnection,
    retry_config: RetryConfig,
}

impl UserStore {
    pub fn new(db: DatabaseConnection, retry_config: RetryConfig) -> Self {
        Self { db, retry_config }
    }

    pub async fn count(&self) -> Result<u64> {
        let db = &self.db;
        retry::with_retry("count_users", self.retry_config, || async {
            user::Entity::find().count(db).await
        })
        .await
        .map_err(|e| map_db_err("count_users", e))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let db = &self.db;
        let model = retry::with_retry("find_user", self.retry_config, || async {
            user::Entity::find()
                .filter(user::Column::Username.eq(username))
                .one(db)
                .await
        })
        .await
        .map_err(|e| map_db_err("find_user", e))?;

        Ok(model.map(model_to_user))
    }

    /// Insert an account. A taken username surfaces as `Duplicate`.
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<User> {
        let model = new_user_active_model(username, password_hash, Utc::now())
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err("create_user", e))?;

        info!("User created: {}", model.username);
        Ok(model_to_user(model))
    }

    pub async fn set_password(&self, username: &str, password_hash: &str) -> Result<()> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::PasswordHash, Expr::val(password_hash))
            .filter(user::Column::Username.eq(username))
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err("set_password", e))?;

        if result.rows_affected == 0 {
            return Err(ShortUrlError::not_found(format!(
                "no user named '{}'",
                username
            )));
        }
        info!("Password updated for {}", username);
        Ok(())
    }
}
