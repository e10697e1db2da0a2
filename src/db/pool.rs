//! Database connection pool
//!
//! Creates the SQLite pool from configuration. File-based databases get
//! their parent directory created and `mode=rwc` so a fresh deployment
//! starts without manual setup.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;

/// Create a SQLite connection pool from configuration
///
/// Foreign keys are enabled on every connection; SQLite leaves them off
/// by default. An in-memory database is pinned to a single connection,
/// since each SQLite connection would otherwise get its own empty store.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    let url = &config.url;
    let in_memory = url == ":memory:" || url.starts_with("sqlite::memory:");

    let options = if in_memory {
        SqliteConnectOptions::new().in_memory(true)
    } else {
        let path = url.strip_prefix("sqlite:").unwrap_or(url);

        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
            }
        }

        SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
    }
    .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(if in_memory { 1 } else { 20 })
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to connect to SQLite database: {}", url))?;

    Ok(pool)
}

/// Create an in-memory SQLite pool for tests
pub async fn create_test_pool() -> Result<SqlitePool> {
    let config = DatabaseConfig {
        url: ":memory:".to_string(),
    };
    create_pool(&config).await
}
