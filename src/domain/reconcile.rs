//! Task relocation.
//!
//! A move is computed against a board value and yields the new board plus
//! the update command for the backend. Nothing here talks to the backend
//! or plays feedback; the caller applies the board optimistically, sends
//! the command and re-fetches on failure.

use crate::domain::board::Board;
use crate::domain::task::{ColumnId, Position, TaskId, TaskPatch};
use crate::error::{Result, TaskBoardError};

/// What a drop onto the task's own column does to the sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SameColumnDrop {
    /// Remove and append at the end of the column
    #[default]
    Reappend,
    /// Leave the sequence untouched; only a supplied position is applied
    Keep,
}

/// Backend update produced by a move
#[derive(Debug, Clone, PartialEq)]
pub struct MoveCommand {
    pub task_id: TaskId,
    /// Exactly the changed fields: `column_id` when the column changed,
    /// `position` when one was supplied
    pub patch: TaskPatch,
    pub column_changed: bool,
    /// The task entered the done column from another column
    pub completed: bool,
}

/// Applies moves for a board whose completion column is `done_column`
#[derive(Debug, Clone)]
pub struct Reconciler {
    done_column: ColumnId,
    same_column_drop: SameColumnDrop,
}

impl Reconciler {
    pub fn new(done_column: ColumnId) -> Self {
        Self {
            done_column,
            same_column_drop: SameColumnDrop::default(),
        }
    }

    pub fn with_same_column_drop(mut self, policy: SameColumnDrop) -> Self {
        self.same_column_drop = policy;
        self
    }

    pub fn done_column(&self) -> &ColumnId {
        &self.done_column
    }

    /// Moves `task_id` into `target`, optionally setting its free position.
    ///
    /// Fails with `TaskNotFound` or `ColumnNotFound` without producing a
    /// board; the input board is never modified.
    pub fn move_task(
        &self,
        board: &Board,
        task_id: &TaskId,
        target: &ColumnId,
        position: Option<Position>,
    ) -> Result<(Board, MoveCommand)> {
        let (ci, ti) = board
            .locate(task_id)
            .ok_or_else(|| TaskBoardError::TaskNotFound(task_id.to_string()))?;

        if !board.has_column(target) {
            return Err(TaskBoardError::ColumnNotFound(target.to_string()));
        }

        let mut next = board.clone();
        let source = next.columns[ci].id.clone();
        let column_changed = &source != target;

        if !column_changed && self.same_column_drop == SameColumnDrop::Keep {
            if let Some(pos) = position {
                next.columns[ci].tasks[ti].position = Some(pos);
            }
        } else {
            let mut task = next.columns[ci].tasks.remove(ti);
            if let Some(pos) = position {
                task.position = Some(pos);
            }
            task.column_id = target.clone();
            if let Some(dest) = next.column_mut(target) {
                dest.tasks.push(task);
            }
        }

        let patch = TaskPatch {
            column_id: column_changed.then(|| target.clone()),
            position,
            ..Default::default()
        };

        let completed = column_changed && target == &self.done_column && source != self.done_column;

        Ok((
            next,
            MoveCommand {
                task_id: task_id.clone(),
                patch,
                column_changed,
                completed,
            },
        ))
    }
}
