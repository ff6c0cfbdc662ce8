//! Task status vocabulary and the aggregation rule for derived statuses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a task.
///
/// A leaf task owns its status directly. A task with subtasks carries a
/// derived status computed from its children via [`derive_status`] and kept
/// current by the propagation walk in [`crate::tasks::TaskManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(format!(
                "invalid status '{}' (expected pending, in_progress or completed)",
                other
            )),
        }
    }
}

/// Compute a parent's derived status from its children's statuses.
///
/// - non-empty and every child completed: `Completed`
/// - any child in progress: `InProgress`
/// - otherwise (including the empty set): `Pending`
///
/// A completed child among pending siblings is not enough to move the parent
/// to `InProgress`; only an explicit `InProgress` child does that.
///
/// Pure and store-free. Callers must special-case leaf tasks before
/// persisting the result: with no children there is nothing to derive and
/// the task's own status stands.
pub fn derive_status(children: &[TaskStatus]) -> TaskStatus {
    if !children.is_empty() && children.iter().all(|s| *s == TaskStatus::Completed) {
        TaskStatus::Completed
    } else if children.iter().any(|s| *s == TaskStatus::InProgress) {
        TaskStatus::InProgress
    } else {
        TaskStatus::Pending
    }
}
