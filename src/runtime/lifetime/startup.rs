use std::sync::Arc;

use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;
use tracing::{debug, info, warn};

use crate::api::session::SessionService;
use crate::config::AppConfig;
use crate::services::{AuthService, ClickRecorder, LinkService};
use crate::storage::{LinkStore, RetryConfig, UserStore, connect_database};

/// Shared components injected into every HTTP worker
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<LinkStore>,
    pub link_service: Arc<LinkService>,
    pub auth_service: Arc<AuthService>,
    pub sessions: Arc<SessionService>,
    pub clicks: ClickRecorder,
}

impl AppState {
    /// Build the service graph over an already migrated connection.
    pub fn build(db: DatabaseConnection, config: &AppConfig) -> Self {
        let retry_config = RetryConfig::from(&config.database);
        let store = Arc::new(LinkStore::new(db.clone(), retry_config));
        let users = Arc::new(UserStore::new(db, retry_config));

        Self {
            link_service: Arc::new(LinkService::new(Arc::clone(&store), &config.links)),
            auth_service: Arc::new(AuthService::new(users)),
            sessions: Arc::new(SessionService::from_config(&config.auth)),
            clicks: ClickRecorder::new(store.clone()),
            store,
        }
    }
}

pub struct StartupContext {
    pub db: DatabaseConnection,
    pub state: AppState,
}

/// 准备服务器启动的上下文
///
/// 连接数据库、执行迁移、确保管理员账号存在
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let db = connect_database(&config.database)
        .await
        .context("Failed to open database")?;
    info!("Using SQLite database at {}", config.database.path);

    let state = AppState::build(db.clone(), config);

    let created = state
        .auth_service
        .ensure_admin(
            &config.auth.admin_username,
            config.auth.bootstrap_password(),
        )
        .await
        .context("Failed to bootstrap admin account")?;
    if created && config.auth.admin_password.is_some() {
        warn!("Admin account created from configuration; consider removing the plain password");
    }

    match state.store.count().await {
        Ok(count) => info!("{} links in storage", count),
        Err(e) => warn!("Could not count links: {}", e),
    }

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(StartupContext { db, state })
}
