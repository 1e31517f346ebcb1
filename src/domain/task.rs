use crate::error::{Result, TaskBoardError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Opaque task identifier assigned by the backend (e.g. `task-<uuid>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Column identifier, unique within a board (e.g. `column-1`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Sort rank: high=3, medium=2, low=1. Missing priority ranks 0, see [`rank_of`].
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

/// Rank of an optional priority; tasks without one rank lowest.
pub fn rank_of(priority: Option<Priority>) -> u8 {
    priority.map(Priority::rank).unwrap_or(0)
}

impl FromStr for Priority {
    type Err = TaskBoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(TaskBoardError::Validation(format!(
                "Invalid priority '{}'. Valid priorities: low, medium, high",
                s
            ))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Free-form board coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A task card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub column_id: ColumnId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_steps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_steps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl Task {
    /// Creates a task in the given column, stamped with the current time
    pub fn new(id: TaskId, title: impl Into<String>, column_id: ColumnId) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            created_at: Utc::now(),
            column_id,
            position: None,
            priority: None,
            color: None,
            tags: None,
            sort_order: None,
            completed_steps: None,
            total_steps: None,
            due_date: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Case-insensitive substring match over title, description and tags.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        let in_title = self.title.to_lowercase().contains(needle);

        let in_description = self
            .description
            .as_ref()
            .map(|d| d.to_lowercase().contains(needle))
            .unwrap_or(false);

        let in_tags = self
            .tags
            .as_ref()
            .map(|tags| tags.iter().any(|t| t.to_lowercase().contains(needle)))
            .unwrap_or(false);

        in_title || in_description || in_tags
    }

    /// Completed/total step ratio, when both counts are known
    pub fn progress(&self) -> Option<f64> {
        match (self.completed_steps, self.total_steps) {
            (Some(done), Some(total)) if total > 0 => {
                Some((done.min(total) as f64) / (total as f64))
            }
            _ => None,
        }
    }
}

/// Payload for creating a task; the column is supplied separately
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl NewTask {
    /// Validates and normalizes form input.
    ///
    /// The title is trimmed and must not be empty. A blank description is
    /// dropped.
    pub fn new(
        title: &str,
        description: Option<&str>,
        priority: Option<Priority>,
    ) -> Result<Self> {
        Ok(Self {
            title: validate_title(title)?,
            description: normalize_description(description),
            priority,
        })
    }

    /// Re-checks a value that may have been built field by field
    pub fn validated(self) -> Result<Self> {
        Self::new(&self.title, self.description.as_deref(), self.priority)
    }
}

/// Partial task update, sent as the body of `PATCH /tasks/{id}`.
///
/// Only the fields that are set are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_id: Option<ColumnId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Rejects a blank title and trims the text fields
    pub fn validated(mut self) -> Result<Self> {
        if let Some(title) = self.title.as_deref() {
            self.title = Some(validate_title(title)?);
        }
        if let Some(description) = self.description.as_deref() {
            self.description = Some(description.trim().to_string());
        }
        Ok(self)
    }

    /// Applies every field except `column_id` to the task.
    ///
    /// Column membership is owned by the board, see `Board::apply_patch`.
    pub fn apply_fields(&self, task: &mut Task) {
        if let Some(position) = self.position {
            task.position = Some(position);
        }
        if let Some(sort_order) = self.sort_order {
            task.sort_order = Some(sort_order);
        }
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = Some(description.clone());
        }
        if let Some(priority) = self.priority {
            task.priority = Some(priority);
        }
    }
}

fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskBoardError::Validation("Title is required".to_string()));
    }
    Ok(trimmed.to_string())
}

fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// `createdAt` accepts RFC 3339 as well as naive ISO-8601 (read as UTC)
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    pub(super) fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Utc.from_utc_datetime(&naive))
            .map_err(|e| format!("invalid timestamp '{}': {}", raw, e))
    }
}
