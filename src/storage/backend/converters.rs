use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};

use crate::storage::{Link, User};
use migration::entities::{link, user};

/// 将 Sea-ORM Model 转换为 Link
pub fn model_to_link(model: link::Model) -> Link {
    Link {
        id: model.id,
        code: model.code,
        target_url: model.target_url,
        enabled: model.enabled,
        click_count: model.click_count.max(0),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 新链接的 ActiveModel：启用、零点击，id 由数据库分配
pub fn new_link_active_model(code: &str, target_url: &str, now: DateTime<Utc>) -> link::ActiveModel {
    link::ActiveModel {
        id: NotSet,
        code: Set(code.to_string()),
        target_url: Set(target_url.to_string()),
        enabled: Set(true),
        click_count: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

pub fn model_to_user(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        created_at: model.created_at,
    }
}

pub fn new_user_active_model(
    username: &str,
    password_hash: &str,
    now: DateTime<Utc>,
) -> user::ActiveModel {
    user::ActiveModel {
        id: NotSet,
        username: Set(username.to_string()),
        password_hash: Set(password_hash.to_string()),
        created_at: Set(now),
    }
}
