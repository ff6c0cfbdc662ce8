pub mod models;

use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;

pub async fn create_pool(db_path: &Path) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query("PRAGMA journal_mode=WAL;")
        .execute(pool)
        .await?;

    // Create tasks table. Subtree deletion is performed by the engine in
    // post-order, so the parent reference carries no ON DELETE action.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            public_id TEXT NOT NULL UNIQUE,
            parent_id INTEGER,
            title TEXT NOT NULL,
            description TEXT,
            status TEXT NOT NULL DEFAULT 'pending',
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (parent_id) REFERENCES tasks(id),
            CHECK (status IN ('pending', 'in_progress', 'completed')),
            CHECK (title != '')
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Index for children-by-parent lookups, the hot query of propagation,
    // the completion guard and subtree traversal.
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_tasks_parent_id
        ON tasks(parent_id)
        "#,
    )
    .execute(pool)
    .await?;

    // Index for incomplete-children counts.
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_tasks_parent_status
        ON tasks(parent_id, status)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
