//! Mutation operations for LinkStore
//!
//! This module contains all write database operations.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ExprTrait, QueryFilter};
use tracing::info;

use super::converters::{model_to_link, new_link_active_model};
use super::{LinkStore, map_db_err, retry};
use crate::errors::{Result, ShortUrlError};
use crate::storage::Link;

use migration::entities::link;

impl LinkStore {
    /// Insert an enabled link with zero clicks.
    ///
    /// Fails with [`ShortUrlError::Duplicate`] when the code is taken.
    pub async fn create(&self, code: &str, target_url: &str) -> Result<Link> {
        let db = &self.db;
        let active = new_link_active_model(code, target_url, Utc::now());

        let model = retry::with_retry(&format!("create({})", code), self.retry_config, || {
            let active = active.clone();
            async move { active.insert(db).await }
        })
        .await
        .map_err(|e| match map_db_err("create", e) {
            ShortUrlError::Duplicate(_) => {
                ShortUrlError::duplicate(format!("code '{}' is already in use", code))
            }
            other => other,
        })?;

        info!("Link created: {} -> {}", model.code, model.target_url);
        Ok(model_to_link(model))
    }

    /// Replace target and enabled flag. Code and click count stay as they are.
    pub async fn update(&self, id: i32, target_url: &str, enabled: bool) -> Result<Link> {
        let db = &self.db;
        let now = Utc::now();

        let result = retry::with_retry(&format!("update({})", id), self.retry_config, || async {
            link::Entity::update_many()
                .col_expr(link::Column::TargetUrl, Expr::val(target_url))
                .col_expr(link::Column::Enabled, Expr::val(enabled))
                .col_expr(link::Column::UpdatedAt, Expr::val(now))
                .filter(link::Column::Id.eq(id))
                .exec(db)
                .await
        })
        .await
        .map_err(|e| map_db_err("update", e))?;

        if result.rows_affected == 0 {
            return Err(ShortUrlError::not_found(format!("no link with id {}", id)));
        }

        info!("Link {} updated (enabled = {})", id, enabled);
        self.get_by_id(id).await
    }

    /// `click_count = click_count + 1` in a single statement.
    pub async fn increment_click(&self, id: i32) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry(&format!("increment_click({})", id), self.retry_config, || async {
            link::Entity::update_many()
                .col_expr(
                    link::Column::ClickCount,
                    Expr::col(link::Column::ClickCount).add(Expr::val(1i64)),
                )
                .filter(link::Column::Id.eq(id))
                .exec(db)
                .await
        })
        .await
        .map_err(|e| map_db_err("increment_click", e))?;

        if result.rows_affected == 0 {
            return Err(ShortUrlError::not_found(format!("no link with id {}", id)));
        }
        Ok(())
    }
}
