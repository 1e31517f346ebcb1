use crate::domain::{ColumnId, SameColumnDrop};
use crate::error::{Result, TaskBoardError};
use std::time::Duration;

/// Connection settings for the board REST API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Prefix that `/board` and `/tasks` are appended to
    pub base_url: String,
    /// Per-request timeout; `None` waits for the transport to give up
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    pub const BASE_URL_ENV: &'static str = "TASKBOARD_API_URL";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reads the base URL from `TASKBOARD_API_URL`, falling back to the default
    pub fn from_env() -> Result<Self> {
        match std::env::var(Self::BASE_URL_ENV) {
            Ok(url) => Self::from_value(&url),
            Err(_) => Ok(Self::default()),
        }
    }

    fn from_value(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(TaskBoardError::Config(format!(
                "{} is set but empty",
                Self::BASE_URL_ENV
            )));
        }
        Ok(Self::new(url))
    }

    /// Joins `path` onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000/api")
    }
}

/// Board behaviour the session applies to every move
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Column whose entry counts as completing a task
    pub done_column: ColumnId,
    pub same_column_drop: SameColumnDrop,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            done_column: ColumnId::from("column-3"),
            same_column_drop: SameColumnDrop::default(),
        }
    }
}
