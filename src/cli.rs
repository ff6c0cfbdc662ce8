use clap::{Parser, Subcommand};

const LONG_ABOUT: &str = r#"
Task-Forest - hierarchical task tracking with derived statuses

Tasks form trees: any task can own subtasks, and a parent's status is
derived from its children automatically.

Rules:
  • a parent becomes in_progress as soon as one subtask is in_progress
  • a parent becomes completed once every subtask is completed
  • a task cannot be completed while any subtask is incomplete
  • deleting a task deletes its whole subtree

Typical session:
  tf init
  tf task create "Ship v1"
  tf task create "Write docs" --parent tsk_xxxxxxxx
  tf task update tsk_yyyyyyyy --status in_progress
  tf task tree tsk_xxxxxxxx
"#;

#[derive(Parser, Clone)]
#[command(name = "task-forest")]
#[command(about = "Hierarchical task tracking - subtasks, derived statuses, cascading deletes")]
#[command(long_about = LONG_ABOUT)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output (-q)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output logs in JSON format
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Initialize a new Task-Forest project
    ///
    /// Creates a .task-forest directory with the database.
    ///
    /// Examples:
    ///   tf init                    # Initialize in current directory
    ///   tf init --at /my/project   # Initialize at specific directory
    Init {
        /// Custom directory to initialize (default: current directory)
        #[arg(long)]
        at: Option<String>,

        /// Re-initialize even if .task-forest already exists
        #[arg(long)]
        force: bool,
    },

    /// Operations on tasks and their subtrees
    ///
    /// Examples:
    ///   tf task create "Implement auth" --description "JWT-based auth"
    ///   tf task get tsk_h4X9k2Pq
    ///   tf task list
    ///   tf task update tsk_h4X9k2Pq --status completed
    ///   tf task delete tsk_h4X9k2Pq
    ///   tf task tree tsk_h4X9k2Pq
    #[command(subcommand)]
    Task(TaskCommands),
}

#[derive(Subcommand, Clone)]
pub enum TaskCommands {
    /// Create a new task
    ///
    /// Status defaults to pending. Creating a subtask refreshes the
    /// parent's derived status.
    ///
    /// Examples:
    ///   tf task create "Implement auth"
    ///   tf task create "Add tests" --description "Unit + integration" --parent tsk_h4X9k2Pq
    ///   tf task create "Spike" --status in_progress
    Create {
        /// Task title
        title: String,

        /// Task description (markdown supported)
        #[arg(short, long)]
        description: Option<String>,

        /// Parent task id (omit for a root task)
        #[arg(short, long)]
        parent: Option<String>,

        /// Initial status (pending, in_progress, completed; default: pending)
        #[arg(short, long)]
        status: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Get a task with its direct subtasks
    ///
    /// Examples:
    ///   tf task get tsk_h4X9k2Pq
    ///   tf task get tsk_h4X9k2Pq --format json
    Get {
        /// Task id
        id: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List all tasks
    ///
    /// Examples:
    ///   tf task list
    ///   tf task list --format json
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Update fields on an existing task
    ///
    /// A transition to completed is rejected while any subtask is
    /// incomplete. A status change updates ancestor statuses.
    ///
    /// Examples:
    ///   tf task update tsk_h4X9k2Pq --title "New title"
    ///   tf task update tsk_h4X9k2Pq --description "Updated details"
    ///   tf task update tsk_h4X9k2Pq --status in_progress
    Update {
        /// Task id
        id: String,

        /// New task title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New status (pending, in_progress, completed)
        #[arg(short, long)]
        status: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Delete a task and its whole subtree
    ///
    /// Deleting an unknown id is a no-op, not an error.
    ///
    /// Examples:
    ///   tf task delete tsk_h4X9k2Pq
    Delete {
        /// Task id
        id: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show the full subtree rooted at a task
    ///
    /// Examples:
    ///   tf task tree tsk_h4X9k2Pq
    ///   tf task tree tsk_h4X9k2Pq --format json
    Tree {
        /// Task id
        id: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
