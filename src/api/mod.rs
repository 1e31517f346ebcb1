use crate::{
    domain::{Board, ColumnId, NewTask, Task, TaskId, TaskPatch},
    error::Result,
};
use async_trait::async_trait;

#[cfg(feature = "http-api")]
pub mod http;
pub mod memory;

/// The board backend: one snapshot read and task CRUD
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// Fetches the canonical board (`GET /board`)
    async fn fetch_board(&self) -> Result<Board>;

    /// Creates a task in `column` (`POST /tasks`)
    async fn create_task(&self, column: &ColumnId, task: &NewTask) -> Result<Task>;

    /// Applies a partial update (`PATCH /tasks/{id}`)
    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task>;

    /// Deletes a task (`DELETE /tasks/{id}`)
    async fn delete_task(&self, id: &TaskId) -> Result<()>;
}
