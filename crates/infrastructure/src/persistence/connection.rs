//! Database connection management
//!
//! SQLite connection pooling via r2d2. Store calls check a connection out
//! inside `spawn_blocking`.

use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DatabaseConfig;

/// Database errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Cannot create database directory {path}: {source}")]
    Directory {
        path: String,
        source: std::io::Error,
    },
}

/// SQLite connection pool type alias
pub type ConnectionPool = Pool<SqliteConnectionManager>;

fn manager_for(config: &DatabaseConfig) -> Result<SqliteConnectionManager, DatabaseError> {
    if config.is_in_memory() {
        return Ok(SqliteConnectionManager::memory());
    }

    let path = config.path.as_str();

    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DatabaseError::Directory {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let busy_timeout = config.busy_timeout_ms;
    // Every pooled connection gets the same pragmas
    Ok(SqliteConnectionManager::file(path).with_init(move |conn| {
        conn.execute_batch(&format!(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = {busy_timeout};
            "
        ))
    }))
}

/// Create a new connection pool and bring the schema up to date
pub fn create_pool(config: &DatabaseConfig) -> Result<ConnectionPool, DatabaseError> {
    info!(path = %config.path, max_connections = config.max_connections, "Creating database connection pool");

    let mut builder = Pool::builder().max_size(config.pool_size());
    if config.is_in_memory() {
        // A recycled in-memory connection would come back as an empty database
        builder = builder.max_lifetime(None).idle_timeout(None);
    }
    let pool = builder.build(manager_for(config)?)?;

    if config.run_migrations {
        let conn = pool.get()?;
        crate::persistence::migrations::run_migrations(&conn)?;
    }

    debug!("Database connection pool created successfully");
    Ok(pool)
}

/// Check that a connection can be checked out and queried
pub fn ping(conn: &Connection) -> Result<(), DatabaseError> {
    conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
    Ok(())
}
