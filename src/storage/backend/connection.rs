use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sea_orm::DatabaseConnection;
use sea_orm::SqlxSqliteConnector;
use sea_orm::sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::{Result, ShortUrlError};
use migration::{Migrator, MigratorTrait};

/// 连接 SQLite 数据库（带自动创建和性能优化）
pub async fn connect_sqlite(database_url: &str, pool_size: u32) -> Result<DatabaseConnection> {
    let opt = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| ShortUrlError::config(format!("invalid SQLite URL: {}", e)))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_millis(5000))
        .pragma("temp_store", "memory");

    let pool = SqlitePoolOptions::new()
        .max_connections(pool_size.max(1))
        .connect_with(opt)
        .await
        .map_err(|e| ShortUrlError::storage(format!("cannot open SQLite database: {}", e)))?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// 运行数据库迁移
pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    Migrator::up(db, None)
        .await
        .map_err(|e| ShortUrlError::storage(format!("migration failed: {}", e)))?;

    info!("Database migrations completed");
    Ok(())
}

/// Open the configured database, creating its directory if needed, and
/// bring the schema up to date.
pub async fn connect_database(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    ensure_parent_dir(&config.path)?;

    let db = connect_sqlite(&config.sqlite_url(), config.pool_size).await?;
    run_migrations(&db).await?;

    info!("Database ready at {}", config.path);
    Ok(db)
}

fn ensure_parent_dir(path: &str) -> Result<()> {
    if path.starts_with("sqlite:") {
        return Ok(());
    }
    if let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
