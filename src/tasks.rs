//! Task operations and the status-propagation engine.
//!
//! Tasks live in the store as flat rows with parent pointers; there is no
//! in-memory tree. Every operation re-reads what it needs, so concurrent
//! requests against overlapping subtrees stay survivable: deletes are
//! idempotent and propagation recomputes ancestors from scratch.

use crate::db::models::{Task, TaskTree, TaskUpdate, TaskWithChildren};
use crate::error::{ForestError, Result};
use crate::status::{derive_status, TaskStatus};
use crate::store::TaskStore;

pub struct TaskManager<'a> {
    store: &'a TaskStore,
}

impl<'a> TaskManager<'a> {
    pub fn new(store: &'a TaskStore) -> Self {
        Self { store }
    }

    /// Create a task, optionally under a parent.
    ///
    /// Status defaults to pending. The parent's derived status is refreshed
    /// afterwards, since a new child changes its aggregate: a pending child
    /// under a completed parent reverts the parent to pending.
    pub async fn create_task(
        &self,
        title: &str,
        description: Option<&str>,
        parent_id: Option<i64>,
        status: Option<TaskStatus>,
    ) -> Result<Task> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ForestError::InvalidInput(
                "title must not be empty".to_string(),
            ));
        }

        if let Some(pid) = parent_id {
            if !self.store.exists(pid).await? {
                return Err(ForestError::TaskNotFound(pid.to_string()));
            }
        }

        let status = status.unwrap_or(TaskStatus::Pending);
        let task = self
            .store
            .insert(title, description, parent_id, status)
            .await?;

        if task.parent_id.is_some() {
            self.propagate_upward(task.id).await?;
        }

        tracing::debug!(task = %task.public_id, status = %task.status, "task created");
        Ok(task)
    }

    /// Every task record, in insertion order.
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.store.list_all().await
    }

    /// A task together with its direct children.
    pub async fn get_task(&self, id: i64) -> Result<TaskWithChildren> {
        let task = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ForestError::TaskNotFound(id.to_string()))?;
        let children = self.store.find_by_parent_id(id).await?;

        Ok(TaskWithChildren { task, children })
    }

    /// Apply a partial field update.
    ///
    /// A transition to completed must pass the completion precondition
    /// first. A status change walks the ancestor chain afterwards; updates
    /// that touch only title or description skip the walk.
    pub async fn update_task(&self, id: i64, update: TaskUpdate<'_>) -> Result<Task> {
        let task = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ForestError::TaskNotFound(id.to_string()))?;

        if let Some(title) = update.title {
            if title.trim().is_empty() {
                return Err(ForestError::InvalidInput(
                    "title must not be empty".to_string(),
                ));
            }
        }

        if update.status == Some(TaskStatus::Completed) {
            self.assert_can_complete(id).await?;
        }

        if update.is_empty() {
            return Ok(task);
        }

        let status_changed = update.status.is_some_and(|s| s != task.status);

        self.store.update_fields(id, &update).await?;
        let updated = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ForestError::TaskNotFound(id.to_string()))?;

        // Only a status change can affect the parent's aggregate.
        if status_changed && updated.parent_id.is_some() {
            self.propagate_upward(id).await?;
        }

        tracing::debug!(task = %updated.public_id, "task updated");
        Ok(updated)
    }

    /// Whether `id` may transition to completed right now: true when it has
    /// no children or every child is already completed.
    ///
    /// The children are read without locking or versioning, so a concurrent
    /// child update can invalidate the answer before the caller's write
    /// lands; the next status change below the task rewalks the aggregate
    /// and converges.
    pub async fn can_complete(&self, id: i64) -> Result<bool> {
        Ok(self.store.count_incomplete_children(id).await? == 0)
    }

    async fn assert_can_complete(&self, id: i64) -> Result<()> {
        if self.can_complete(id).await? {
            Ok(())
        } else {
            Err(ForestError::IncompleteSubtasks)
        }
    }

    /// Recompute ancestor statuses after the task `changed_task_id` changed.
    ///
    /// Walks parent by parent: load the parent (a dangling reference ends
    /// the walk), derive its status from its children, and stop at the
    /// first ancestor whose stored status already matches. One children
    /// read and at most one write per level.
    pub async fn propagate_upward(&self, changed_task_id: i64) -> Result<()> {
        let mut current_id = changed_task_id;

        loop {
            let Some(task) = self.store.find_by_id(current_id).await? else {
                break;
            };
            let Some(parent_id) = task.parent_id else {
                break;
            };
            let Some(parent) = self.store.find_by_id(parent_id).await? else {
                break;
            };

            let children = self.store.find_by_parent_id(parent_id).await?;
            if children.is_empty() {
                break;
            }

            let statuses: Vec<TaskStatus> = children.iter().map(|c| c.status).collect();
            let derived = derive_status(&statuses);

            if derived == parent.status {
                break;
            }

            self.store
                .update_fields(
                    parent_id,
                    &TaskUpdate {
                        status: Some(derived),
                        ..Default::default()
                    },
                )
                .await?;

            tracing::debug!(task = %parent.public_id, status = %derived, "derived status updated");
            current_id = parent_id;
        }

        Ok(())
    }

    /// Delete `id` and every descendant, children first.
    ///
    /// Rows already gone are skipped silently, so re-deleting is a no-op.
    /// The former parent's derived status is left as it was; the next
    /// status change below it refreshes the chain.
    pub async fn delete_task(&self, id: i64) -> Result<()> {
        self.delete_subtree(id).await?;
        tracing::debug!(task_id = id, "subtree deleted");
        Ok(())
    }

    async fn delete_subtree(&self, id: i64) -> Result<()> {
        let children = self.store.find_by_parent_id(id).await?;
        for child in children {
            Box::pin(self.delete_subtree(child.id)).await?;
        }
        self.store.delete_by_id(id).await
    }

    /// Materialize the subtree rooted at `id` as a read-only snapshot.
    ///
    /// An id with no backing row yields [`TaskTree::missing`] rather than an
    /// error. Siblings appear in creation order.
    pub async fn get_tree(&self, id: i64) -> Result<TaskTree> {
        let Some(task) = self.store.find_by_id(id).await? else {
            return Ok(TaskTree::missing());
        };

        let children = self.store.find_by_parent_id(id).await?;
        let mut subtasks = Vec::with_capacity(children.len());
        for child in children {
            subtasks.push(Box::pin(self.get_tree(child.id)).await?);
        }

        Ok(TaskTree {
            task: Some(task),
            subtasks,
        })
    }
}
