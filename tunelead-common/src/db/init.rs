//! Database initialization
//!
//! Creates the SQLite database on first run and applies the schema
//! idempotently. Both tables are append-heavy and small; WAL mode keeps
//! reads from the bot and admin panel from blocking lead submissions.

use crate::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;

/// Initialize database connection pool and create tables if needed.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    configure_pragmas(&pool).await?;

    create_leads_table(&pool).await?;
    create_track_requests_table(&pool).await?;

    Ok(pool)
}

async fn configure_pragmas(pool: &SqlitePool) -> Result<()> {
    // WAL allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(pool).await?;
    sqlx::query("PRAGMA busy_timeout = 5000").execute(pool).await?;
    Ok(())
}

async fn create_leads_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS leads (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            style TEXT NOT NULL,
            has_text INTEGER NOT NULL DEFAULT 0,
            text_description TEXT,
            message TEXT,
            source TEXT NOT NULL DEFAULT 'landing',
            status TEXT NOT NULL DEFAULT 'new',
            created_at TEXT NOT NULL,
            notified INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_leads_created_at ON leads(created_at)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_track_requests_table(pool: &SqlitePool) -> Result<()> {
    // lead_id is a weak reference: no FK constraint, the lead need not exist
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS track_requests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            lead_id INTEGER,
            prompt TEXT NOT NULL,
            style TEXT NOT NULL DEFAULT 'pop',
            status TEXT NOT NULL DEFAULT 'pending',
            audio_url TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
