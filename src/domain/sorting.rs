use crate::domain::task::{rank_of, Task};
use crate::error::TaskBoardError;
use std::cmp::{Ordering, Reverse};
use std::str::FromStr;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Orderings offered by the board's sort menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Oldest first
    Date,
    /// High priority first; missing priority last
    PriorityHigh,
    /// Missing priority first, then low, medium, high
    PriorityLow,
    Title,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::PriorityHigh => "priority-high",
            Self::PriorityLow => "priority-low",
            Self::Title => "title",
        }
    }
}

impl FromStr for SortKey {
    type Err = TaskBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "priority-high" => Ok(Self::PriorityHigh),
            "priority-low" => Ok(Self::PriorityLow),
            "title" => Ok(Self::Title),
            _ => Err(TaskBoardError::InvalidFilter(format!(
                "Invalid sort key '{}'. Valid keys: date, priority-high, priority-low, title",
                s
            ))),
        }
    }
}

/// Stable sort of tasks by the given key.
///
/// Equal elements keep their relative order, so this can be layered on top
/// of [`apply_manual_order`].
///
/// # Examples
/// ```
/// use taskboard_core::domain::sorting::{sort_tasks, SortKey};
/// use taskboard_core::domain::task::{ColumnId, Task, TaskId};
///
/// let col = ColumnId::from("column-1");
/// let mut tasks = vec![
///     Task::new(TaskId::from("1"), "Charlie", col.clone()),
///     Task::new(TaskId::from("2"), "alpha", col.clone()),
///     Task::new(TaskId::from("3"), "Bravo", col),
/// ];
///
/// sort_tasks(&mut tasks, SortKey::Title);
/// assert_eq!(tasks[0].title, "alpha");
/// assert_eq!(tasks[2].title, "Charlie");
/// ```
pub fn sort_tasks(tasks: &mut [Task], key: SortKey) {
    match key {
        SortKey::Date => tasks.sort_by_key(|t| t.created_at),
        SortKey::PriorityHigh => tasks.sort_by_key(|t| Reverse(rank_of(t.priority))),
        SortKey::PriorityLow => tasks.sort_by_key(|t| rank_of(t.priority)),
        SortKey::Title => tasks.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
}

/// Orders tasks that carry a `sort_order` among themselves.
///
/// Tasks with a `sort_order` are stably sorted ascending within the slots
/// they already occupy; tasks without one keep their slot. When every task
/// has a `sort_order` this is a plain stable sort.
pub fn apply_manual_order(tasks: &mut [Task]) {
    let slots: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.sort_order.is_some())
        .map(|(i, _)| i)
        .collect();

    if slots.len() < 2 {
        return;
    }

    let mut ordered: Vec<Task> = slots.iter().map(|&i| tasks[i].clone()).collect();
    ordered.sort_by_key(|t| t.sort_order);

    for (slot, task) in slots.into_iter().zip(ordered) {
        tasks[slot] = task;
    }
}

/// Locale-style title ordering.
///
/// Primary level ignores case and accents, so `éclair` sorts between
/// `apple` and `zebra`. Ties are settled by accents (unaccented first),
/// then by case (lowercase first), then by the raw text so the order is
/// total.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a, true)
        .cmp(&collation_key(b, true))
        .then_with(|| collation_key(a, false).cmp(&collation_key(b, false)))
        .then_with(|| case_key(a).cmp(&case_key(b)))
        .then_with(|| a.cmp(b))
}

/// Lowercased canonical decomposition, optionally without combining marks
fn collation_key(s: &str, strip_marks: bool) -> String {
    s.nfd()
        .filter(|c| !(strip_marks && is_combining_mark(*c)))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Per-character case rank: lowercase before uppercase
fn case_key(s: &str) -> Vec<u8> {
    s.nfd().map(|c| u8::from(c.is_uppercase())).collect()
}
