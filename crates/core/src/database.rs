//! Store handle and connection management.
//!
//! The backing SQLite table is reached through an explicit, constructed
//! [`Database`] handle rather than an ambient global. The handle owns the
//! connection pool and the schema lifecycle, including the destructive
//! [`Database::reset`] used by test setup.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::transaction::UnitOfWork;

const SCHEMA_SQL: &str = "\
CREATE TABLE IF NOT EXISTS todo_items (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT    NOT NULL CHECK (length(title) <= 200),
    description TEXT    NOT NULL DEFAULT '' CHECK (length(description) <= 1000),
    completed   INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT    NOT NULL,
    updated_at  TEXT    NOT NULL
)";

/// Connection pool configuration for the todo store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL, e.g. `sqlite://doable.db`.
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    /// `None` keeps idle connections open indefinitely.
    pub idle_timeout_secs: Option<u64>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://doable.db".to_string(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 30,
            idle_timeout_secs: Some(600),
        }
    }
}

impl DatabaseConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> StoreResult<Self> {
        let defaults = Self::default();

        let url = env::var("DATABASE_URL").unwrap_or(defaults.url);

        let max_connections = get_env_or_default("DATABASE_MAX_CONNECTIONS", "5")?
            .parse::<u32>()
            .map_err(|_| {
                StoreError::configuration("DATABASE_MAX_CONNECTIONS must be a positive integer")
            })?;

        let acquire_timeout_secs = get_env_or_default("DATABASE_ACQUIRE_TIMEOUT", "30")?
            .parse::<u64>()
            .map_err(|_| {
                StoreError::configuration("DATABASE_ACQUIRE_TIMEOUT must be a number of seconds")
            })?;

        let config = Self {
            url,
            max_connections,
            acquire_timeout_secs,
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }

    /// Configuration for an isolated in-memory store.
    ///
    /// A single connection keeps every caller on the same in-memory database;
    /// SQLite gives each new connection to `:memory:` its own copy.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: None,
        }
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.url.is_empty() {
            return Err(StoreError::configuration("database URL must not be empty"));
        }
        if self.max_connections == 0 {
            return Err(StoreError::configuration(
                "max_connections must be greater than 0",
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(StoreError::configuration(
                "min_connections must not exceed max_connections",
            ));
        }
        if self.acquire_timeout_secs == 0 {
            return Err(StoreError::configuration(
                "acquire timeout must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Handle to the backing SQLite store.
///
/// Cloning is cheap: the underlying pool is reference-counted and shared.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the store described by `config`, creating the database
    /// file when it does not exist yet.
    pub async fn connect(config: DatabaseConfig) -> StoreResult<Self> {
        config.validate()?;

        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .idle_timeout(config.idle_timeout_secs.map(Duration::from_secs))
            .connect_with(options)
            .await?;

        info!(url = %config.url, "connected to todo store");
        Ok(Self { pool })
    }

    /// Open a fresh, isolated in-memory store. Used by tests and available
    /// for ephemeral runs.
    pub async fn in_memory() -> StoreResult<Self> {
        Self::connect(DatabaseConfig::in_memory()).await
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Open a scoped unit-of-work against this store.
    pub async fn begin(&self) -> StoreResult<UnitOfWork> {
        UnitOfWork::begin(&self.pool).await
    }

    /// Create the `todo_items` table when it does not exist yet. Called once
    /// at startup, before the first request.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        debug!("todo store schema ensured");
        Ok(())
    }

    /// Drop and recreate the store. Destructive; test setup only.
    pub async fn reset(&self) -> StoreResult<()> {
        sqlx::query("DROP TABLE IF EXISTS todo_items")
            .execute(&self.pool)
            .await?;
        self.ensure_schema().await
    }

    /// Verify the store answers a trivial query.
    pub async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the pool and all of its connections.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("todo store connections closed");
    }
}

fn get_env_or_default(key: &str, default: &str) -> StoreResult<String> {
    Ok(env::var(key).unwrap_or_else(|_| default.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(DatabaseConfig::default().validate().is_ok());
    }

    #[test]
    fn validation_rejects_zero_connections() {
        let config = DatabaseConfig {
            max_connections: 0,
            ..DatabaseConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_empty_url() {
        let config = DatabaseConfig {
            url: String::new(),
            ..DatabaseConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn in_memory_config_uses_a_single_connection() {
        let config = DatabaseConfig::in_memory();
        assert_eq!(config.max_connections, 1);
        assert!(config.validate().is_ok());
    }
}
