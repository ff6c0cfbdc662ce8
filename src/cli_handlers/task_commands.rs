use crate::cli::TaskCommands;
use crate::db::models::{DeleteResponse, Task, TaskTree, TaskUpdate};
use crate::error::{ForestError, Result};
use crate::status::TaskStatus;
use crate::store::TaskStore;
use crate::tasks::TaskManager;

/// Handle all `tf task` subcommands
pub async fn handle_task_command(store: &TaskStore, cmd: TaskCommands) -> Result<()> {
    match cmd {
        TaskCommands::Create {
            title,
            description,
            parent,
            status,
            format,
        } => handle_create(store, title, description, parent, status, format).await,

        TaskCommands::Get { id, format } => handle_get(store, id, format).await,

        TaskCommands::List { format } => handle_list(store, format).await,

        TaskCommands::Update {
            id,
            title,
            description,
            status,
            format,
        } => handle_update(store, id, title, description, status, format).await,

        TaskCommands::Delete { id, format } => handle_delete(store, id, format).await,

        TaskCommands::Tree { id, format } => handle_tree(store, id, format).await,
    }
}

// ============================================================================
// Boundary helpers
// ============================================================================

/// Resolve a public task handle to the internal storage key.
///
/// Everything below the handlers works on internal keys; public ids stop
/// here.
async fn resolve_task_id(store: &TaskStore, public_id: &str) -> Result<i64> {
    store
        .find_by_public_id(public_id)
        .await?
        .map(|task| task.id)
        .ok_or_else(|| ForestError::TaskNotFound(public_id.to_string()))
}

fn parse_status(status: &str) -> Result<TaskStatus> {
    status.parse().map_err(ForestError::InvalidInput)
}

fn print_task(task: &Task, indent: &str) {
    println!("{}{} [{}] {}", indent, task.public_id, task.status, task.title);
    if let Some(description) = &task.description {
        println!("{}  {}", indent, description);
    }
}

fn print_tree(node: &TaskTree, depth: usize) {
    let indent = "  ".repeat(depth);
    match &node.task {
        Some(task) => println!("{}{} [{}] {}", indent, task.public_id, task.status, task.title),
        None => println!("(no such task)"),
    }
    for child in &node.subtasks {
        print_tree(child, depth + 1);
    }
}

// ============================================================================
// Individual command handlers
// ============================================================================

async fn handle_create(
    store: &TaskStore,
    title: String,
    description: Option<String>,
    parent: Option<String>,
    status: Option<String>,
    format: String,
) -> Result<()> {
    let manager = TaskManager::new(store);

    let parent_id = match parent {
        Some(public_id) => Some(resolve_task_id(store, &public_id).await?),
        None => None,
    };

    let status = match status {
        Some(s) => Some(parse_status(&s)?),
        None => None,
    };

    let task = manager
        .create_task(&title, description.as_deref(), parent_id, status)
        .await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("Task created: {} {}", task.public_id, task.title);
        println!("  Status: {}", task.status);
        if let Some(parent_id) = task.parent_id {
            if let Some(parent) = store.find_by_id(parent_id).await? {
                println!("  Parent: {}", parent.public_id);
            }
        }
        if let Some(description) = &task.description {
            println!("  Description: {}", description);
        }
    }

    Ok(())
}

async fn handle_get(store: &TaskStore, id: String, format: String) -> Result<()> {
    let manager = TaskManager::new(store);
    let task_id = resolve_task_id(store, &id).await?;
    let result = manager.get_task(task_id).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_task(&result.task, "");
        if !result.children.is_empty() {
            println!("Subtasks ({}):", result.children.len());
            for child in &result.children {
                print_task(child, "  ");
            }
        }
    }

    Ok(())
}

async fn handle_list(store: &TaskStore, format: String) -> Result<()> {
    let manager = TaskManager::new(store);
    let tasks = manager.list_tasks().await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else if tasks.is_empty() {
        println!("No tasks.");
    } else {
        for task in &tasks {
            print_task(task, "");
        }
    }

    Ok(())
}

async fn handle_update(
    store: &TaskStore,
    id: String,
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    format: String,
) -> Result<()> {
    let manager = TaskManager::new(store);
    let task_id = resolve_task_id(store, &id).await?;

    let status = match status {
        Some(s) => Some(parse_status(&s)?),
        None => None,
    };

    let task = manager
        .update_task(
            task_id,
            TaskUpdate {
                title: title.as_deref(),
                description: description.as_deref(),
                status,
            },
        )
        .await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("Task updated: {} {}", task.public_id, task.title);
        println!("  Status: {}", task.status);
    }

    Ok(())
}

async fn handle_delete(store: &TaskStore, id: String, format: String) -> Result<()> {
    let manager = TaskManager::new(store);

    // An unknown id is a no-op; the subtree is simply already gone.
    if let Some(task) = store.find_by_public_id(&id).await? {
        manager.delete_task(task.id).await?;
    }

    if format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&DeleteResponse { deleted: true })?
        );
    } else {
        println!("Deleted {} and its subtree.", id);
    }

    Ok(())
}

async fn handle_tree(store: &TaskStore, id: String, format: String) -> Result<()> {
    let manager = TaskManager::new(store);

    let tree = match store.find_by_public_id(&id).await? {
        Some(task) => manager.get_tree(task.id).await?,
        None => TaskTree::missing(),
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        print_tree(&tree, 0);
    }

    Ok(())
}
