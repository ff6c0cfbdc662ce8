use crate::db::{create_pool, run_migrations};
use crate::error::{ForestError, Result};
use crate::store::TaskStore;
use std::path::PathBuf;

const FOREST_DIR: &str = ".task-forest";
const DB_FILE: &str = "tasks.db";

/// Project root markers in priority order (highest priority first)
/// These are used to identify the root directory of a project
const PROJECT_ROOT_MARKERS: &[&str] = &[
    ".git",           // Git (highest priority)
    ".hg",            // Mercurial
    "package.json",   // Node.js
    "Cargo.toml",     // Rust
    "pyproject.toml", // Python (PEP 518)
    "go.mod",         // Go Modules
    "pom.xml",        // Maven (Java)
    "build.gradle",   // Gradle (Java/Kotlin)
];

/// Process-wide handle on a project: its root, its database, and the one
/// long-lived store client every component borrows.
#[derive(Debug)]
pub struct ProjectContext {
    pub root: PathBuf,
    pub db_path: PathBuf,
    pub store: TaskStore,
}

impl ProjectContext {
    /// Find the project root by searching upwards for a .task-forest directory
    ///
    /// Search strategy (in priority order):
    /// 1. Check TASK_FOREST_PROJECT_DIR environment variable
    /// 2. Search upwards from current directory for .task-forest/
    /// 3. Check user's home directory for .task-forest/
    pub fn find_project_root() -> Option<PathBuf> {
        if let Ok(env_path) = std::env::var("TASK_FOREST_PROJECT_DIR") {
            let path = PathBuf::from(env_path);
            let forest_dir = path.join(FOREST_DIR);
            if forest_dir.exists() && forest_dir.is_dir() {
                return Some(path);
            } else {
                eprintln!(
                    "TASK_FOREST_PROJECT_DIR set but no {} found: {}",
                    FOREST_DIR,
                    path.display()
                );
            }
        }

        if let Ok(mut current) = std::env::current_dir() {
            loop {
                let forest_dir = current.join(FOREST_DIR);
                if forest_dir.exists() && forest_dir.is_dir() {
                    return Some(current);
                }

                if !current.pop() {
                    break;
                }
            }
        }

        if let Some(home) = dirs::home_dir() {
            let forest_dir = home.join(FOREST_DIR);
            if forest_dir.exists() && forest_dir.is_dir() {
                return Some(home);
            }
        }

        None
    }

    /// Infer the project root directory based on common project markers
    ///
    /// Traverses upwards from the current directory and returns the first
    /// directory containing any marker; None means the caller falls back
    /// to the current directory.
    fn infer_project_root() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        let mut current = cwd;

        loop {
            for marker in PROJECT_ROOT_MARKERS {
                if current.join(marker).exists() {
                    return Some(current);
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Initialize a new Task-Forest project at the inferred root, falling
    /// back to the current directory with a warning.
    pub async fn initialize_project() -> Result<Self> {
        let cwd = std::env::current_dir()?;

        let root = match Self::infer_project_root() {
            Some(inferred_root) => inferred_root,
            None => {
                eprintln!(
                    "Warning: could not determine a project root based on common markers (e.g. .git, package.json).\n\
                     Initialized Task-Forest in the current directory '{}'.",
                    cwd.display()
                );
                cwd
            },
        };

        Self::initialize_at(root).await
    }

    /// Initialize a project rooted at `root`, creating the data directory
    /// and database as needed.
    pub async fn initialize_at(root: PathBuf) -> Result<Self> {
        let forest_dir = root.join(FOREST_DIR);
        let db_path = forest_dir.join(DB_FILE);

        if !forest_dir.exists() {
            std::fs::create_dir_all(&forest_dir)?;
        }

        let pool = create_pool(&db_path).await?;
        run_migrations(&pool).await?;

        Ok(ProjectContext {
            root,
            db_path,
            store: TaskStore::new(pool),
        })
    }

    /// Load an existing project context
    pub async fn load() -> Result<Self> {
        let root = Self::find_project_root().ok_or(ForestError::NotAProject)?;
        let db_path = root.join(FOREST_DIR).join(DB_FILE);

        let pool = create_pool(&db_path).await?;
        run_migrations(&pool).await?;

        Ok(ProjectContext {
            root,
            db_path,
            store: TaskStore::new(pool),
        })
    }

    /// Load project context, initializing if necessary (for write commands)
    pub async fn load_or_init() -> Result<Self> {
        match Self::load().await {
            Ok(ctx) => Ok(ctx),
            Err(ForestError::NotAProject) => Self::initialize_project().await,
            Err(e) => Err(e),
        }
    }

    pub fn forest_dir(root: &std::path::Path) -> PathBuf {
        root.join(FOREST_DIR)
    }
}
