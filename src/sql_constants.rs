//! SQL query constants and fragments.
//!
//! Centralizes the task column list and the handful of queries used from
//! more than one place. Dynamic WHERE/SET clauses are still built inline.

/// Standard column list for task queries.
///
/// Columns: id, public_id, parent_id, title, description, status,
///          created_at, updated_at
pub const TASK_COLUMNS: &str =
    "id, public_id, parent_id, title, description, status, created_at, updated_at";

/// SELECT a task by its internal key.
pub const SELECT_TASK_BY_ID: &str =
    const_format::formatcp!("SELECT {} FROM tasks WHERE id = ?", TASK_COLUMNS);

/// SELECT a task by its public handle.
pub const SELECT_TASK_BY_PUBLIC_ID: &str =
    const_format::formatcp!("SELECT {} FROM tasks WHERE public_id = ?", TASK_COLUMNS);

/// SELECT the direct children of a parent, oldest first.
pub const SELECT_TASKS_BY_PARENT: &str = const_format::formatcp!(
    "SELECT {} FROM tasks WHERE parent_id = ? ORDER BY created_at ASC, id ASC",
    TASK_COLUMNS
);

/// SELECT every task.
pub const SELECT_TASKS_ALL: &str =
    const_format::formatcp!("SELECT {} FROM tasks ORDER BY id ASC", TASK_COLUMNS);

/// Check if a task exists by internal key.
pub const CHECK_TASK_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?)";

/// Count subtasks of a parent that are not yet completed.
pub const COUNT_INCOMPLETE_CHILDREN: &str =
    "SELECT COUNT(*) FROM tasks WHERE parent_id = ? AND status != 'completed'";

/// Delete a task row by internal key.
pub const DELETE_TASK_BY_ID: &str = "DELETE FROM tasks WHERE id = ?";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_columns_format() {
        assert!(TASK_COLUMNS.contains("public_id"));
        assert!(TASK_COLUMNS.contains("parent_id"));
        assert!(TASK_COLUMNS.contains("status"));
        assert!(TASK_COLUMNS.contains("updated_at"));
    }

    #[test]
    fn test_select_task_by_id() {
        assert_eq!(
            SELECT_TASK_BY_ID,
            "SELECT id, public_id, parent_id, title, description, status, created_at, updated_at FROM tasks WHERE id = ?"
        );
    }

    #[test]
    fn test_children_query_is_ordered() {
        assert!(SELECT_TASKS_BY_PARENT.ends_with("ORDER BY created_at ASC, id ASC"));
    }

    #[test]
    fn test_check_task_exists() {
        assert_eq!(
            CHECK_TASK_EXISTS,
            "SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?)"
        );
    }
}
