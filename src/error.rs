use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForestError {
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("cannot complete task while subtasks are incomplete")]
    IncompleteSubtasks,

    #[error("current directory is not a Task-Forest project")]
    NotAProject,

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ForestError {
    pub fn to_error_code(&self) -> &'static str {
        match self {
            ForestError::TaskNotFound(_) => "TASK_NOT_FOUND",
            ForestError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            ForestError::InvalidInput(_) => "INVALID_INPUT",
            ForestError::IncompleteSubtasks => "PRECONDITION_FAILED",
            ForestError::NotAProject => "NOT_A_PROJECT",
            _ => "INTERNAL_ERROR",
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.to_error_code().to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ForestError>;
