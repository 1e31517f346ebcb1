//! Derived board views: search, priority filter and sort.
//!
//! [`project`] never mutates its input and never moves a task between
//! columns. The result is an independent copy that the caller may discard
//! or edit freely.

use crate::domain::board::Board;
use crate::domain::sorting::{apply_manual_order, sort_tasks, SortKey};
use crate::domain::task::{Priority, Task};

/// Predicate filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    HighPriority,
}

/// The single active filter-or-sort selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActiveFilter {
    #[default]
    None,
    Filter(TaskFilter),
    /// `None` sorts by `sort_order` only
    Sort(Option<SortKey>),
}

impl ActiveFilter {
    /// Maps the UI's loose `(kind, value)` pair onto a filter.
    ///
    /// Unknown values degrade to the closest no-op: an unknown filter shows
    /// everything and an unknown sort key keeps only the `sort_order` pass.
    pub fn from_parts(kind: &str, value: &str) -> Self {
        if kind.is_empty() || value.is_empty() {
            return Self::None;
        }
        match kind {
            "filter" => match value {
                "high-priority" => Self::Filter(TaskFilter::HighPriority),
                _ => Self::Filter(TaskFilter::All),
            },
            "sort" => Self::Sort(value.parse().ok()),
            _ => Self::None,
        }
    }
}

/// Computes the view shown to the user
pub fn project(board: &Board, search_term: &str, filter: ActiveFilter) -> Board {
    let mut view = board.clone();
    let needle = search_term.to_lowercase();

    for column in &mut view.columns {
        if !needle.is_empty() {
            column.tasks.retain(|t| t.matches_search(&needle));
        }

        match filter {
            ActiveFilter::None | ActiveFilter::Filter(TaskFilter::All) => {}
            ActiveFilter::Filter(TaskFilter::HighPriority) => {
                column.tasks.retain(is_high_priority);
            }
            ActiveFilter::Sort(key) => {
                apply_manual_order(&mut column.tasks);
                if let Some(key) = key {
                    sort_tasks(&mut column.tasks, key);
                }
            }
        }
    }

    view
}

fn is_high_priority(task: &Task) -> bool {
    task.priority == Some(Priority::High)
}
