pub mod board;
pub mod filter;
pub mod reconcile;
pub mod resequence;
pub mod sorting;
pub mod task;

pub use board::{Board, Column, Theme, ViewMode};
pub use filter::{project, ActiveFilter, TaskFilter};
pub use reconcile::{MoveCommand, Reconciler, SameColumnDrop};
pub use resequence::{resequence, SequenceUpdate};
pub use sorting::{sort_tasks, SortKey};
pub use task::{ColumnId, NewTask, Position, Priority, Task, TaskId, TaskPatch};
