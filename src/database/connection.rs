//! Database connection management and schema lifecycle

use std::path::PathBuf;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::{info, warn};

use crate::utils::errors::EventDeskError;

pub type DatabasePool = Pool<Sqlite>;

/// Schema version recorded in `PRAGMA user_version`
pub const SCHEMA_VERSION: i32 = 2;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
    pub busy_timeout: Duration,
    pub create_if_missing: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("eventdesk.db"),
            max_connections: 10,
            busy_timeout: Duration::from_secs(5),
            create_if_missing: true,
        }
    }
}

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, EventDeskError> {
    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(config.create_if_missing)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(config.busy_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    // Test the connection
    sqlx::query("SELECT 1").execute(&pool).await?;

    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}

/// Initialize the schema, creating tables on first use.
///
/// A `user_version` mismatch drops and recreates all three tables. This is
/// the destructive migration the store has always had: local data does not
/// survive a schema bump, and the rebuild is logged loudly rather than
/// performed silently.
pub async fn init_schema(pool: &DatabasePool) -> Result<(), EventDeskError> {
    let version: i32 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await?;

    if version != 0 && version != SCHEMA_VERSION {
        warn!(
            from_version = version,
            to_version = SCHEMA_VERSION,
            "Schema version changed; dropping and recreating all tables (existing data is lost)"
        );
        sqlx::query("DROP TABLE IF EXISTS registrations")
            .execute(pool)
            .await?;
        sqlx::query("DROP TABLE IF EXISTS events").execute(pool).await?;
        sqlx::query("DROP TABLE IF EXISTS users").execute(pool).await?;
    }

    create_tables(pool).await?;

    sqlx::query(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
        .execute(pool)
        .await?;

    info!(version = SCHEMA_VERSION, "Database schema ready");
    Ok(())
}

async fn create_tables(pool: &DatabasePool) -> Result<(), EventDeskError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL,
            is_staff INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            location TEXT,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            organizer TEXT NOT NULL,
            max_participants INTEGER NOT NULL CHECK (max_participants > 0),
            current_participants INTEGER NOT NULL DEFAULT 0
                CHECK (current_participants BETWEEN 0 AND max_participants)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS registrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id INTEGER NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            user_id INTEGER NOT NULL REFERENCES users(id),
            registered_at TEXT NOT NULL,
            UNIQUE(event_id, user_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Check database health
pub async fn health_check(pool: &DatabasePool) -> Result<(), EventDeskError> {
    sqlx::query("SELECT 1").execute(pool).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 10);
        assert!(config.create_if_missing);
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(
                SqliteConnectOptions::new()
                    .in_memory(true)
                    .foreign_keys(true),
            )
            .await
            .unwrap();

        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();

        let version: i32 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }
}
