use crate::{
    api::BoardApi,
    domain::{Board, ColumnId, NewTask, Task, TaskId, TaskPatch},
    error::{Result, TaskBoardError},
};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// In-process board backend.
///
/// Behaves like the REST server: ids are `task-<uuid>`, a PATCH that
/// changes `columnId` appends the task to the new column, and unknown ids
/// are rejected.
pub struct MemoryApi {
    board: Mutex<Board>,
}

impl MemoryApi {
    /// Three empty columns: To Do, In Progress, Done
    pub fn new() -> Self {
        Self::from_board(Board::default())
    }

    pub fn from_board(board: Board) -> Self {
        Self {
            board: Mutex::new(board),
        }
    }

    /// The default columns seeded with a handful of starter tasks
    pub fn with_sample_data() -> Self {
        let samples = [
            (
                "Research project requirements",
                "Gather all necessary information about the project scope and requirements.",
                "column-1",
            ),
            (
                "Design database schema",
                "Create ER diagrams and define the database structure.",
                "column-1",
            ),
            (
                "Implement authentication",
                "Add user login and registration functionality.",
                "column-2",
            ),
            (
                "Write unit tests",
                "Create comprehensive test suite for all core functionality.",
                "column-2",
            ),
            (
                "Fix navigation bug",
                "Address the issue with sidebar navigation in mobile view.",
                "column-3",
            ),
        ];

        let mut board = Board::default();
        for (title, description, column) in samples {
            let column = ColumnId::from(column);
            let task = Task::new(Self::next_id(), title, column.clone()).with_description(description);
            if let Some(col) = board.column_mut(&column) {
                col.tasks.push(task);
            }
        }
        Self::from_board(board)
    }

    /// Current server-side state
    pub async fn snapshot(&self) -> Board {
        self.board.lock().await.clone()
    }

    fn next_id() -> TaskId {
        TaskId::new(format!("task-{}", Uuid::new_v4()))
    }
}

impl Default for MemoryApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BoardApi for MemoryApi {
    async fn fetch_board(&self) -> Result<Board> {
        Ok(self.board.lock().await.clone())
    }

    async fn create_task(&self, column: &ColumnId, task: &NewTask) -> Result<Task> {
        let mut board = self.board.lock().await;
        let col = board
            .column_mut(column)
            .ok_or_else(|| TaskBoardError::ColumnNotFound(column.to_string()))?;

        let mut created = Task::new(Self::next_id(), task.title.clone(), column.clone());
        created.description = task.description.clone();
        created.priority = task.priority;
        col.tasks.push(created.clone());

        debug!(task = %created.id, column = %column, "created task");
        Ok(created)
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task> {
        let mut board = self.board.lock().await;
        board.apply_patch(id, patch)?;

        debug!(task = %id, "updated task");
        board
            .task(id)
            .cloned()
            .ok_or_else(|| TaskBoardError::TaskNotFound(id.to_string()))
    }

    async fn delete_task(&self, id: &TaskId) -> Result<()> {
        let mut board = self.board.lock().await;
        let (ci, ti) = board
            .locate(id)
            .ok_or_else(|| TaskBoardError::TaskNotFound(id.to_string()))?;
        board.columns[ci].tasks.remove(ti);

        debug!(task = %id, "deleted task");
        Ok(())
    }
}
