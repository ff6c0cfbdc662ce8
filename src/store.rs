//! Durable task storage.
//!
//! The store is the only component that touches SQL. Everything above it
//! (propagation, completion checks, subtree walks) works in terms of these
//! primitives, keyed on the internal row id. One `TaskStore` is constructed
//! per process and passed by reference into the engine.

use crate::db::models::{Task, TaskUpdate};
use crate::error::{ForestError, Result};
use crate::sql_constants;
use crate::status::TaskStatus;
use chrono::Utc;
use rand::{distr::Alphanumeric, Rng};
use sqlx::SqlitePool;

const PUBLIC_ID_PREFIX: &str = "tsk_";
const PUBLIC_ID_LEN: usize = 8;

/// Generate a fresh public task handle, e.g. `tsk_h4X9k2Pq`.
pub fn generate_public_id() -> String {
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(PUBLIC_ID_LEN)
        .map(char::from)
        .collect();
    format!("{}{}", PUBLIC_ID_PREFIX, suffix)
}

#[derive(Clone, Debug)]
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(sql_constants::SELECT_TASK_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    pub async fn find_by_public_id(&self, public_id: &str) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(sql_constants::SELECT_TASK_BY_PUBLIC_ID)
            .bind(public_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    /// Direct children of `parent_id`, oldest first for stable traversal.
    pub async fn find_by_parent_id(&self, parent_id: i64) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(sql_constants::SELECT_TASKS_BY_PARENT)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    pub async fn list_all(&self) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(sql_constants::SELECT_TASKS_ALL)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(sql_constants::CHECK_TASK_EXISTS)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Number of direct children of `parent_id` that are not yet completed.
    pub async fn count_incomplete_children(&self, parent_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(sql_constants::COUNT_INCOMPLETE_CHILDREN)
            .bind(parent_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Insert a new task row and return the stored record.
    ///
    /// The public handle is generated here; the caller never supplies one.
    pub async fn insert(
        &self,
        title: &str,
        description: Option<&str>,
        parent_id: Option<i64>,
        status: TaskStatus,
    ) -> Result<Task> {
        let public_id = generate_public_id();

        let result = sqlx::query(
            r#"
            INSERT INTO tasks (public_id, parent_id, title, description, status)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&public_id)
        .bind(parent_id)
        .bind(title)
        .bind(description)
        .bind(status)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or(ForestError::TaskNotFound(public_id))
    }

    /// Apply the non-`None` fields of `update` and bump `updated_at`.
    ///
    /// An empty update is a no-op: no write, no timestamp bump.
    pub async fn update_fields(&self, id: i64, update: &TaskUpdate<'_>) -> Result<()> {
        if update.is_empty() {
            return Ok(());
        }

        let mut builder: sqlx::QueryBuilder<sqlx::Sqlite> =
            sqlx::QueryBuilder::new("UPDATE tasks SET ");
        let mut has_updates = false;

        if let Some(title) = update.title {
            builder.push("title = ").push_bind(title);
            has_updates = true;
        }

        if let Some(description) = update.description {
            if has_updates {
                builder.push(", ");
            }
            builder.push("description = ").push_bind(description);
            has_updates = true;
        }

        if let Some(status) = update.status {
            if has_updates {
                builder.push(", ");
            }
            builder.push("status = ").push_bind(status);
        }

        builder.push(", updated_at = ").push_bind(Utc::now());
        builder.push(" WHERE id = ").push_bind(id);

        builder.build().execute(&self.pool).await?;

        Ok(())
    }

    /// Remove a row by id. Missing rows are fine; deletion is idempotent.
    pub async fn delete_by_id(&self, id: i64) -> Result<()> {
        sqlx::query(sql_constants::DELETE_TASK_BY_ID)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
