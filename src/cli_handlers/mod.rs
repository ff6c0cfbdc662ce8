mod task_commands;

pub use task_commands::handle_task_command;

use crate::error::{ForestError, Result};
use crate::project::ProjectContext;
use std::path::PathBuf;

/// Handle `tf init`
pub async fn handle_init_command(at: Option<String>, force: bool) -> Result<()> {
    let root = match at {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir()?,
    };

    let forest_dir = ProjectContext::forest_dir(&root);
    if forest_dir.exists() && !force {
        return Err(ForestError::InvalidInput(format!(
            "already initialized at {} (use --force to re-initialize)",
            root.display()
        )));
    }

    let ctx = ProjectContext::initialize_at(root).await?;
    println!("Initialized Task-Forest project at {}", ctx.root.display());

    Ok(())
}
