use crate::status::TaskStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A task record as stored.
///
/// `public_id` is the externally stable handle shown on the CLI; `id` is the
/// internal storage key used by everything below the CLI boundary.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub public_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A task together with its direct subtasks, the `task get` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskWithChildren {
    #[serde(flatten)]
    pub task: Task,
    pub children: Vec<Task>,
}

/// A materialized subtree snapshot.
///
/// An unknown root id yields a node with no task fields and an empty
/// `subtasks` list, so callers tell "missing" from "leaf" by whether the
/// task fields are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskTree {
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,
    pub subtasks: Vec<TaskTree>,
}

impl TaskTree {
    pub fn missing() -> Self {
        Self {
            task: None,
            subtasks: Vec::new(),
        }
    }
}

/// Partial field update for a task. `None` fields are left untouched.
///
/// Parentage is fixed at creation and deliberately has no field here.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskUpdate<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub status: Option<TaskStatus>,
}

impl TaskUpdate<'_> {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

/// Response payload for `task delete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}
