use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskBoardError>;

#[derive(Debug, Error)]
pub enum TaskBoardError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Board not loaded")]
    BoardNotLoaded,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TaskBoardError {
    /// True for failures reported by (or on the way to) the backend.
    ///
    /// These are the errors a caller answers with a canonical re-fetch.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            Self::BackendUnavailable(_) | Self::RequestFailed { .. }
        )
    }
}

#[cfg(feature = "http-api")]
impl From<reqwest::Error> for TaskBoardError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::RequestFailed {
                status: status.as_u16(),
                body: err.to_string(),
            },
            None => Self::BackendUnavailable(err.to_string()),
        }
    }
}
