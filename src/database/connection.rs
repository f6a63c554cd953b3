//! Database connection handling and idempotent schema creation.

use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use tracing::info;

/// Owns the SQLite connection pool shared by handlers and services.
#[derive(Clone)]
pub struct DatabaseManager {
    /// Connection pool for the bot database.
    pub pool: SqlitePool,
}

impl DatabaseManager {
    /// Connects to the database, creating the file if it does not exist yet.
    pub async fn new(database_url: &str) -> Result<Self> {
        if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
            info!("Creating database {}", database_url);
            Sqlite::create_database(database_url).await?;
        }

        let pool = SqlitePool::connect(database_url).await?;

        Ok(Self { pool })
    }

    /// Ensures both record tables exist. Safe to call on every startup.
    pub async fn init_schema(&self) -> Result<()> {
        info!("Ensuring database schema");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                message_id INTEGER NOT NULL,
                user_id INTEGER NOT NULL,
                username TEXT NOT NULL,
                text TEXT,
                kind TEXT NOT NULL,
                file_id TEXT,
                caption TEXT,
                captured_at TEXT NOT NULL,
                chat_id INTEGER NOT NULL,
                UNIQUE(message_id, chat_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS birthdays (
                user_id INTEGER NOT NULL,
                chat_id INTEGER NOT NULL,
                username TEXT NOT NULL,
                date TEXT NOT NULL,
                photo_file_id TEXT,
                notified BOOLEAN NOT NULL DEFAULT FALSE,
                PRIMARY KEY (user_id, chat_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
