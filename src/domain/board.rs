use crate::domain::task::{ColumnId, Task, TaskId, TaskPatch};
use crate::error::{Result, TaskBoardError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named, ordered bucket of tasks. Sequence order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: ColumnId::new(id),
            title: title.into(),
            tasks: Vec::new(),
            color: None,
            icon: None,
        }
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    fn position_of(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// How the board is laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Kanban,
    Freeform,
}

/// Kanban board state
///
/// The backend snapshot only carries `columns`; the display flags fall back
/// to their defaults when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub view: ViewMode,
    #[serde(default)]
    pub confetti: bool,
    #[serde(default)]
    pub sound: bool,
}

impl Board {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            theme: Theme::default(),
            view: ViewMode::default(),
            confetti: false,
            sound: false,
        }
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| &c.id == id)
    }

    pub fn has_column(&self, id: &ColumnId) -> bool {
        self.column(id).is_some()
    }

    /// Finds a task, returning `(column index, task index)`
    pub fn locate(&self, id: &TaskId) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(ci, col)| col.position_of(id).map(|ti| (ci, ti)))
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.locate(id)
            .map(|(ci, ti)| &self.columns[ci].tasks[ti])
    }

    /// Total number of tasks across all columns
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    /// Merges a patch into the local copy of a task.
    ///
    /// A changed `column_id` moves the task to the end of the destination
    /// column, the same way the backend handles it.
    pub fn apply_patch(&mut self, id: &TaskId, patch: &TaskPatch) -> Result<()> {
        let (ci, ti) = self
            .locate(id)
            .ok_or_else(|| TaskBoardError::TaskNotFound(id.to_string()))?;

        let target = match &patch.column_id {
            Some(col) if col != &self.columns[ci].id => {
                if !self.has_column(col) {
                    return Err(TaskBoardError::ColumnNotFound(col.to_string()));
                }
                Some(col.clone())
            }
            _ => None,
        };

        match target {
            Some(col) => {
                let mut task = self.columns[ci].tasks.remove(ti);
                patch.apply_fields(&mut task);
                task.column_id = col.clone();
                if let Some(dest) = self.column_mut(&col) {
                    dest.tasks.push(task);
                }
            }
            None => patch.apply_fields(&mut self.columns[ci].tasks[ti]),
        }
        Ok(())
    }

    /// Checks the structural invariants: unique column ids, every task in
    /// exactly one column, and every task's `column_id` naming the column
    /// that holds it.
    pub fn check_integrity(&self) -> Result<()> {
        let mut column_ids = HashSet::new();
        let mut task_ids = HashSet::new();

        for column in &self.columns {
            if !column_ids.insert(&column.id) {
                return Err(TaskBoardError::Validation(format!(
                    "Duplicate column id: {}",
                    column.id
                )));
            }
            for task in &column.tasks {
                if !task_ids.insert(&task.id) {
                    return Err(TaskBoardError::Validation(format!(
                        "Task {} appears more than once",
                        task.id
                    )));
                }
                if task.column_id != column.id {
                    return Err(TaskBoardError::Validation(format!(
                        "Task {} claims column {} but is held by {}",
                        task.id, task.column_id, column.id
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(vec![
            Column::new("column-1", "To Do"),
            Column::new("column-2", "In Progress"),
            Column::new("column-3", "Done"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::Position;

    fn sample() -> Board {
        let mut board = Board::default();
        board.columns[0].tasks = vec![
            Task::new(TaskId::from("a"), "A", ColumnId::from("column-1")),
            Task::new(TaskId::from("b"), "B", ColumnId::from("column-1")),
        ];
        board.columns[1].tasks = vec![Task::new(
            TaskId::from("c"),
            "C",
            ColumnId::from("column-2"),
        )];
        board
    }

    #[test]
    fn test_default_board_columns() {
        let board = Board::default();
        let ids: Vec<_> = board.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["column-1", "column-2", "column-3"]);
        assert_eq!(board.view, ViewMode::Kanban);
        assert_eq!(board.task_count(), 0);
    }

    #[test]
    fn test_locate_and_task() {
        let board = sample();
        assert_eq!(board.locate(&TaskId::from("b")), Some((0, 1)));
        assert_eq!(board.locate(&TaskId::from("c")), Some((1, 0)));
        assert!(board.locate(&TaskId::from("zzz")).is_none());
        assert_eq!(board.task(&TaskId::from("c")).unwrap().title, "C");
    }

    #[test]
    fn test_apply_patch_in_place() {
        let mut board = sample();
        let patch = TaskPatch {
            title: Some("A2".into()),
            ..Default::default()
        };
        board.apply_patch(&TaskId::from("a"), &patch).unwrap();

        assert_eq!(board.columns[0].tasks[0].title, "A2");
        assert_eq!(board.columns[0].tasks.len(), 2);
    }

    #[test]
    fn test_apply_patch_moves_column() {
        let mut board = sample();
        let patch = TaskPatch {
            column_id: Some(ColumnId::from("column-2")),
            position: Some(Position::new(1.0, 2.0)),
            ..Default::default()
        };
        board.apply_patch(&TaskId::from("a"), &patch).unwrap();

        assert_eq!(board.columns[0].tasks.len(), 1);
        let moved = board.columns[1].tasks.last().unwrap();
        assert_eq!(moved.id.as_str(), "a");
        assert_eq!(moved.column_id.as_str(), "column-2");
        assert_eq!(moved.position, Some(Position::new(1.0, 2.0)));
        board.check_integrity().unwrap();
    }

    #[test]
    fn test_apply_patch_errors() {
        let mut board = sample();
        let patch = TaskPatch {
            column_id: Some(ColumnId::from("column-9")),
            ..Default::default()
        };

        assert!(matches!(
            board.apply_patch(&TaskId::from("a"), &patch),
            Err(TaskBoardError::ColumnNotFound(_))
        ));
        assert!(matches!(
            board.apply_patch(&TaskId::from("nope"), &TaskPatch::default()),
            Err(TaskBoardError::TaskNotFound(_))
        ));
        assert_eq!(board, sample());
    }

    #[test]
    fn test_check_integrity_detects_mismatch() {
        let mut board = sample();
        board.columns[0].tasks[0].column_id = ColumnId::from("column-2");
        assert!(board.check_integrity().is_err());

        let mut board = sample();
        let dup = board.columns[0].tasks[0].clone();
        board.columns[0].tasks.push(dup);
        assert!(board.check_integrity().is_err());
    }

    #[test]
    fn test_deserialize_backend_snapshot() {
        let json = r#"{"columns":[{"id":"column-1","title":"To Do","tasks":[]}]}"#;
        let board: Board = serde_json::from_str(json).unwrap();

        assert_eq!(board.columns.len(), 1);
        assert_eq!(board.theme, Theme::Light);
        assert_eq!(board.view, ViewMode::Kanban);
        assert!(!board.sound);
    }
}
