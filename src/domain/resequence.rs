use crate::domain::board::Column;
use crate::domain::sorting::{sort_tasks, SortKey};
use crate::domain::task::{TaskId, TaskPatch};

/// One `sort_order` assignment to send to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceUpdate {
    pub task_id: TaskId,
    pub patch: TaskPatch,
}

/// Plans a committed column sort.
///
/// Every task gets `sort_order` equal to its index in the freshly sorted
/// order; updates come back in ascending index order. Columns with fewer
/// than two tasks need no updates.
pub fn resequence(column: &Column, key: SortKey) -> Vec<SequenceUpdate> {
    if column.tasks.len() <= 1 {
        return Vec::new();
    }

    let mut ordered = column.tasks.clone();
    sort_tasks(&mut ordered, key);

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, task)| SequenceUpdate {
            task_id: task.id,
            patch: TaskPatch {
                column_id: Some(column.id.clone()),
                sort_order: Some(index as i64),
                ..Default::default()
            },
        })
        .collect()
}
