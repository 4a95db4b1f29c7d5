//! Query operations for LinkStore
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use super::converters::model_to_link;
use super::{LinkStore, map_db_err, retry};
use crate::errors::{Result, ShortUrlError};
use crate::storage::Link;

use migration::entities::link;

impl LinkStore {
    pub async fn get_by_code(&self, code: &str) -> Result<Link> {
        let db = &self.db;

        let model = retry::with_retry(&format!("get_by_code({})", code), self.retry_config, || async {
            link::Entity::find()
                .filter(link::Column::Code.eq(code))
                .one(db)
                .await
        })
        .await
        .map_err(|e| map_db_err("get_by_code", e))?;

        model
            .map(model_to_link)
            .ok_or_else(|| ShortUrlError::not_found(format!("no link with code '{}'", code)))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Link> {
        let db = &self.db;

        let model = retry::with_retry(&format!("get_by_id({})", id), self.retry_config, || async {
            link::Entity::find_by_id(id).one(db).await
        })
        .await
        .map_err(|e| map_db_err("get_by_id", e))?;

        model
            .map(model_to_link)
            .ok_or_else(|| ShortUrlError::not_found(format!("no link with id {}", id)))
    }

    /// Most recently created first, at most `limit` rows.
    pub async fn list(&self, limit: u64) -> Result<Vec<Link>> {
        let db = &self.db;

        let models = retry::with_retry("list", self.retry_config, || async {
            link::Entity::find()
                .order_by_desc(link::Column::CreatedAt)
                .order_by_desc(link::Column::Id)
                .limit(limit)
                .all(db)
                .await
        })
        .await
        .map_err(|e| map_db_err("list", e))?;

        Ok(models.into_iter().map(model_to_link).collect())
    }

    /// Uniqueness oracle for code generation.
    pub async fn code_exists(&self, code: &str) -> Result<bool> {
        let db = &self.db;

        let count = retry::with_retry(&format!("code_exists({})", code), self.retry_config, || async {
            link::Entity::find()
                .filter(link::Column::Code.eq(code))
                .count(db)
                .await
        })
        .await
        .map_err(|e| map_db_err("code_exists", e))?;

        Ok(count > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        link::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| map_db_err("count", e))
    }
}
