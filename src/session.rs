//! Board session: the state the presentation layer renders and the
//! operations it forwards.
//!
//! Moves are two-phase. The new board is computed and applied locally
//! first, then the command is sent; if the backend rejects it the local
//! board is replaced by a fresh canonical copy. Nothing is retried.

use crate::{
    api::BoardApi,
    config::SessionConfig,
    domain::{
        project, resequence, ActiveFilter, Board, ColumnId, MoveCommand, NewTask, Position,
        Reconciler, SortKey, Task, TaskId, TaskPatch, Theme, ViewMode,
    },
    error::{Result, TaskBoardError},
    settings::{AppSettings, SettingsStore, SettingsUpdate},
};
use tracing::{debug, info, warn};

/// Feedback the presentation layer may play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    MoveSound,
    CompleteSound,
    CreateSound,
    Confetti,
}

/// Result of a successful move
#[derive(Debug, Clone, PartialEq)]
pub struct MoveReport {
    pub command: MoveCommand,
    pub cues: Vec<Cue>,
}

/// Result of a successful task creation
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCreated {
    pub task: Task,
    pub cues: Vec<Cue>,
}

pub struct BoardSession<A: BoardApi> {
    api: A,
    reconciler: Reconciler,
    settings: AppSettings,
    store: Option<SettingsStore>,
    board: Option<Board>,
    search_term: String,
    filter: ActiveFilter,
}

impl<A: BoardApi> BoardSession<A> {
    pub fn new(api: A, config: SessionConfig) -> Self {
        Self {
            api,
            reconciler: Reconciler::new(config.done_column)
                .with_same_column_drop(config.same_column_drop),
            settings: AppSettings::default(),
            store: None,
            board: None,
            search_term: String::new(),
            filter: ActiveFilter::None,
        }
    }

    pub fn with_settings(mut self, settings: AppSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Loads settings from `store` and saves every later change to it
    pub async fn with_settings_store(mut self, store: SettingsStore) -> Result<Self> {
        self.settings = store.load().await?;
        self.store = Some(store);
        Ok(self)
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn settings(&self) -> AppSettings {
        self.settings
    }

    /// Base board, as last fetched or optimistically updated
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filter(&self) -> ActiveFilter {
        self.filter
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_filter(&mut self, filter: ActiveFilter) {
        self.filter = filter;
    }

    /// The filtered and sorted board to render
    pub fn view(&self) -> Option<Board> {
        self.board
            .as_ref()
            .map(|b| project(b, &self.search_term, self.filter))
    }

    /// Replaces the local board with the canonical one
    pub async fn load(&mut self) -> Result<()> {
        let board = self.api.fetch_board().await?;
        debug!(tasks = board.task_count(), "board loaded");
        self.board = Some(self.normalize(board));
        Ok(())
    }

    /// Moves a task to `column`.
    ///
    /// `position` is only honoured in freeform mode. On backend failure the
    /// optimistic board is discarded and the error returned.
    pub async fn move_task(
        &mut self,
        task_id: &TaskId,
        column: &ColumnId,
        position: Option<Position>,
    ) -> Result<MoveReport> {
        let position = position.filter(|_| self.settings.freeform_mode);
        let previous = self.board.take().ok_or(TaskBoardError::BoardNotLoaded)?;

        let (next, command) = match self.reconciler.move_task(&previous, task_id, column, position) {
            Ok(moved) => moved,
            Err(err) => {
                self.board = Some(previous);
                return Err(err);
            }
        };
        self.board = Some(next);

        if !command.patch.is_empty() {
            if let Err(err) = self.api.update_task(&command.task_id, &command.patch).await {
                warn!(task = %task_id, error = %err, "move rejected, restoring canonical board");
                self.discard_optimistic(previous).await;
                return Err(err);
            }
        }

        info!(
            task = %task_id,
            column = %column,
            completed = command.completed,
            "task moved"
        );
        let cues = self.move_cues(&command);
        Ok(MoveReport { command, cues })
    }

    /// Creates a task in `column` and refreshes the board.
    ///
    /// A blank title is rejected before anything is sent.
    pub async fn add_task(&mut self, column: &ColumnId, task: NewTask) -> Result<TaskCreated> {
        let task = task.validated()?;
        let created = self.api.create_task(column, &task).await.map_err(|err| {
            warn!(column = %column, error = %err, "failed to add task");
            err
        })?;

        if let Err(err) = self.load().await {
            warn!(error = %err, "refresh after create failed, keeping local copy");
            if let Some(col) = self.board.as_mut().and_then(|b| b.column_mut(column)) {
                col.tasks.push(created.clone());
            }
        }

        let mut cues = Vec::new();
        if self.settings.sound_effects {
            cues.push(Cue::CreateSound);
        }
        Ok(TaskCreated {
            task: created,
            cues,
        })
    }

    /// Sends an edit and merges it into the local board.
    ///
    /// A blank title is rejected before anything is sent. Edits that touch
    /// `sort_order` are followed by a full refresh.
    pub async fn update_task(&mut self, task_id: &TaskId, patch: TaskPatch) -> Result<Task> {
        let patch = patch.validated()?;

        let updated = self.api.update_task(task_id, &patch).await.map_err(|err| {
            warn!(task = %task_id, error = %err, "failed to update task");
            err
        })?;

        let merged = match self.board.as_mut() {
            Some(board) => board.apply_patch(task_id, &patch).is_ok(),
            None => false,
        };

        if !merged || patch.sort_order.is_some() {
            self.load().await?;
        }
        Ok(updated)
    }

    pub async fn delete_task(&mut self, task_id: &TaskId) -> Result<()> {
        self.api.delete_task(task_id).await.map_err(|err| {
            warn!(task = %task_id, error = %err, "failed to delete task");
            err
        })?;

        if let Err(err) = self.load().await {
            warn!(error = %err, "refresh after delete failed, removing locally");
            if let Some(board) = self.board.as_mut() {
                if let Some((ci, ti)) = board.locate(task_id) {
                    board.columns[ci].tasks.remove(ti);
                }
            }
        }
        Ok(())
    }

    /// Persists a sort of `column` as `sort_order` values.
    ///
    /// Every task of the column takes part, including tasks hidden by the
    /// current search or filter; only an active sort carries over as the
    /// starting order. Updates are sent one at a time in ascending order;
    /// the first failure stops the run and re-fetches the board. Returns
    /// the number of updates sent.
    pub async fn commit_sort(&mut self, column: &ColumnId, key: SortKey) -> Result<usize> {
        let base = self.board.as_ref().ok_or(TaskBoardError::BoardNotLoaded)?;
        let ordering = match self.filter {
            ActiveFilter::Sort(current) => ActiveFilter::Sort(current),
            ActiveFilter::None | ActiveFilter::Filter(_) => ActiveFilter::None,
        };
        let arranged = project(base, "", ordering);
        let displayed = arranged
            .column(column)
            .ok_or_else(|| TaskBoardError::ColumnNotFound(column.to_string()))?;

        let updates = resequence(displayed, key);
        if updates.is_empty() {
            debug!(column = %column, "nothing to resequence");
            return Ok(0);
        }

        for update in &updates {
            if let Err(err) = self.api.update_task(&update.task_id, &update.patch).await {
                warn!(
                    column = %column,
                    task = %update.task_id,
                    error = %err,
                    "resequencing stopped"
                );
                if let Err(refresh_err) = self.load().await {
                    warn!(error = %refresh_err, "re-fetch after resequencing failure failed");
                }
                return Err(err);
            }
        }

        info!(column = %column, key = key.as_str(), count = updates.len(), "column resequenced");
        self.load().await?;
        Ok(updates.len())
    }

    /// Merges and persists a settings change.
    ///
    /// The new settings only take effect once they are saved.
    pub async fn update_settings(&mut self, update: SettingsUpdate) -> Result<AppSettings> {
        let merged = self.settings.merged(update);
        if let Some(store) = &self.store {
            store.save(&merged).await?;
        }

        self.settings = merged;
        if let Some(board) = self.board.take() {
            self.board = Some(self.normalize(board));
        }
        Ok(self.settings)
    }

    /// Re-fetches after a rejected write; falls back to `previous` if the
    /// backend cannot be reached either.
    async fn discard_optimistic(&mut self, previous: Board) {
        if let Err(err) = self.load().await {
            warn!(error = %err, "re-fetch failed, reverting to last known board");
            self.board = Some(previous);
        }
    }

    fn normalize(&self, mut board: Board) -> Board {
        board.sound = self.settings.sound_effects;
        board.confetti = false;
        board.theme = if self.settings.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        };
        board.view = if self.settings.freeform_mode {
            ViewMode::Freeform
        } else {
            ViewMode::Kanban
        };
        board
    }

    fn move_cues(&self, command: &MoveCommand) -> Vec<Cue> {
        let mut cues = Vec::new();
        if !command.column_changed {
            return cues;
        }
        if self.settings.sound_effects {
            cues.push(Cue::MoveSound);
        }
        if command.completed {
            if self.settings.animations {
                cues.push(Cue::Confetti);
            }
            if self.settings.sound_effects {
                cues.push(Cue::CompleteSound);
            }
        }
        cues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::MemoryApi;
    use crate::domain::{Column, Priority, SameColumnDrop};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Wraps the in-memory backend, records updates and injects failures
    struct ScriptedApi {
        inner: MemoryApi,
        fail_fetch: AtomicBool,
        fail_updates_from: AtomicUsize,
        updates: Mutex<Vec<(TaskId, TaskPatch)>>,
        creates: AtomicUsize,
    }

    impl ScriptedApi {
        fn new(board: Board) -> Self {
            Self {
                inner: MemoryApi::from_board(board),
                fail_fetch: AtomicBool::new(false),
                fail_updates_from: AtomicUsize::new(usize::MAX),
                updates: Mutex::new(Vec::new()),
                creates: AtomicUsize::new(0),
            }
        }

        fn fail_updates_from(&self, attempt: usize) {
            self.fail_updates_from.store(attempt, Ordering::SeqCst);
        }

        fn recorded(&self) -> Vec<(TaskId, TaskPatch)> {
            self.updates.lock().unwrap().clone()
        }
    }

    fn server_error() -> TaskBoardError {
        TaskBoardError::RequestFailed {
            status: 500,
            body: "Internal Server Error".into(),
        }
    }

    #[async_trait]
    impl BoardApi for ScriptedApi {
        async fn fetch_board(&self) -> Result<Board> {
            if self.fail_fetch.load(Ordering::SeqCst) {
                return Err(TaskBoardError::BackendUnavailable("connection refused".into()));
            }
            self.inner.fetch_board().await
        }

        async fn create_task(&self, column: &ColumnId, task: &NewTask) -> Result<Task> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            self.inner.create_task(column, task).await
        }

        async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task> {
            let attempt = {
                let mut log = self.updates.lock().unwrap();
                log.push((id.clone(), patch.clone()));
                log.len() - 1
            };
            if attempt >= self.fail_updates_from.load(Ordering::SeqCst) {
                return Err(server_error());
            }
            self.inner.update_task(id, patch).await
        }

        async fn delete_task(&self, id: &TaskId) -> Result<()> {
            self.inner.delete_task(id).await
        }
    }

    fn task(id: &str, title: &str, column: &str) -> Task {
        Task::new(TaskId::from(id), title, ColumnId::from(column))
    }

    fn seeded() -> Board {
        let mut board = Board::default();
        board.columns[0].tasks = vec![
            task("a", "Charlie", "column-1").with_priority(Priority::Low),
            task("b", "alpha", "column-1").with_priority(Priority::High),
            task("c", "Bravo", "column-1"),
        ];
        board.columns[1].tasks = vec![task("d", "Review PR", "column-2")];
        board
    }

    async fn session() -> BoardSession<ScriptedApi> {
        let mut s = BoardSession::new(ScriptedApi::new(seeded()), SessionConfig::default());
        s.load().await.unwrap();
        s
    }

    fn ids(board: &Board, column: usize) -> Vec<String> {
        board.columns[column]
            .tasks
            .iter()
            .map(|t| t.id.to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_operations_require_loaded_board() {
        let mut s = BoardSession::new(ScriptedApi::new(seeded()), SessionConfig::default());
        assert!(s.view().is_none());

        let err = s
            .move_task(&TaskId::from("a"), &ColumnId::from("column-2"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, TaskBoardError::BoardNotLoaded));
    }

    #[tokio::test]
    async fn test_load_normalizes_display_flags() {
        let settings = AppSettings {
            sound_effects: false,
            dark_mode: true,
            ..Default::default()
        };
        let mut s = BoardSession::new(ScriptedApi::new(seeded()), SessionConfig::default())
            .with_settings(settings);
        s.load().await.unwrap();

        let board = s.board().unwrap();
        assert!(!board.sound);
        assert!(!board.confetti);
        assert_eq!(board.theme, Theme::Dark);
        assert_eq!(board.view, ViewMode::Kanban);
    }

    #[tokio::test]
    async fn test_move_to_done_applies_and_sends_command() {
        let mut s = session().await;
        let report = s
            .move_task(&TaskId::from("b"), &ColumnId::from("column-3"), None)
            .await
            .unwrap();

        assert!(report.command.completed);
        assert_eq!(
            report.cues,
            vec![Cue::MoveSound, Cue::Confetti, Cue::CompleteSound]
        );

        let local = s.board().unwrap();
        assert_eq!(ids(local, 0), vec!["a", "c"]);
        assert_eq!(ids(local, 2), vec!["b"]);

        let recorded = s.api().recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].1.column_id, Some(ColumnId::from("column-3")));

        let server = s.api().inner.snapshot().await;
        assert_eq!(ids(&server, 2), vec!["b"]);
    }

    #[tokio::test]
    async fn test_move_failure_restores_canonical_board() {
        let mut s = session().await;
        s.api().fail_updates_from(0);

        let err = s
            .move_task(&TaskId::from("a"), &ColumnId::from("column-2"), None)
            .await
            .unwrap_err();
        assert!(err.is_backend_failure());

        let server = s.api().inner.snapshot().await;
        assert_eq!(ids(s.board().unwrap(), 0), ids(&server, 0));
        assert_eq!(ids(s.board().unwrap(), 0), vec!["a", "b", "c"]);
        assert_eq!(ids(s.board().unwrap(), 1), vec!["d"]);
    }

    #[tokio::test]
    async fn test_move_failure_without_backend_reverts_locally() {
        let mut s = session().await;
        let before = s.board().unwrap().clone();
        s.api().fail_updates_from(0);
        s.api().fail_fetch.store(true, Ordering::SeqCst);

        assert!(s
            .move_task(&TaskId::from("a"), &ColumnId::from("column-3"), None)
            .await
            .is_err());
        assert_eq!(s.board().unwrap(), &before);
    }

    #[tokio::test]
    async fn test_move_unknown_task_keeps_board() {
        let mut s = session().await;
        let err = s
            .move_task(&TaskId::from("ghost"), &ColumnId::from("column-2"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, TaskBoardError::TaskNotFound(_)));
        assert_eq!(s.board().unwrap().task_count(), 4);
        assert!(s.api().recorded().is_empty());
    }

    #[tokio::test]
    async fn test_position_only_forwarded_in_freeform_mode() {
        let pos = Position::new(40.0, 80.0);

        let mut s = session().await;
        let report = s
            .move_task(&TaskId::from("a"), &ColumnId::from("column-2"), Some(pos))
            .await
            .unwrap();
        assert!(report.command.patch.position.is_none());

        let mut s = session().await;
        s.update_settings(SettingsUpdate {
            freeform_mode: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
        let report = s
            .move_task(&TaskId::from("a"), &ColumnId::from("column-2"), Some(pos))
            .await
            .unwrap();
        assert_eq!(report.command.patch.position, Some(pos));
        assert_eq!(s.board().unwrap().view, ViewMode::Freeform);
    }

    #[tokio::test]
    async fn test_same_column_drop_sends_nothing() {
        let mut s = session().await;
        let report = s
            .move_task(&TaskId::from("a"), &ColumnId::from("column-1"), None)
            .await
            .unwrap();

        assert!(report.cues.is_empty());
        assert!(s.api().recorded().is_empty());
        assert_eq!(ids(s.board().unwrap(), 0), vec!["b", "c", "a"]);

        let config = SessionConfig {
            same_column_drop: SameColumnDrop::Keep,
            ..Default::default()
        };
        let mut s = BoardSession::new(ScriptedApi::new(seeded()), config);
        s.load().await.unwrap();
        s.move_task(&TaskId::from("a"), &ColumnId::from("column-1"), None)
            .await
            .unwrap();
        assert_eq!(ids(s.board().unwrap(), 0), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_cues_follow_settings() {
        let mut s = session().await;
        s.update_settings(SettingsUpdate {
            sound_effects: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();

        let report = s
            .move_task(&TaskId::from("d"), &ColumnId::from("column-3"), None)
            .await
            .unwrap();
        assert_eq!(report.cues, vec![Cue::Confetti]);

        let report = s
            .move_task(&TaskId::from("d"), &ColumnId::from("column-1"), None)
            .await
            .unwrap();
        assert!(!report.command.completed);
        assert!(report.cues.is_empty());
    }

    #[tokio::test]
    async fn test_add_task_refreshes_board() {
        let mut s = session().await;
        let new_task = NewTask::new("Ship it", None, Some(Priority::High)).unwrap();

        let created = s
            .add_task(&ColumnId::from("column-2"), new_task)
            .await
            .unwrap();
        assert_eq!(created.cues, vec![Cue::CreateSound]);
        assert_eq!(
            s.board().unwrap().task(&created.task.id).unwrap().title,
            "Ship it"
        );
    }

    #[tokio::test]
    async fn test_add_task_rejected_by_backend() {
        let mut s = session().await;
        let new_task = NewTask::new("Nowhere", None, None).unwrap();

        let err = s
            .add_task(&ColumnId::from("column-7"), new_task)
            .await
            .unwrap_err();
        assert!(matches!(err, TaskBoardError::ColumnNotFound(_)));
        assert_eq!(s.board().unwrap().task_count(), 4);
    }

    #[tokio::test]
    async fn test_update_task_validation_blocks_request() {
        let mut s = session().await;
        let patch = TaskPatch {
            title: Some("   ".into()),
            ..Default::default()
        };

        let err = s.update_task(&TaskId::from("a"), patch).await.unwrap_err();
        assert!(matches!(err, TaskBoardError::Validation(_)));
        assert!(s.api().recorded().is_empty());
    }

    #[tokio::test]
    async fn test_update_task_merges_locally() {
        let mut s = session().await;
        let patch = TaskPatch {
            title: Some("Charlie v2".into()),
            priority: Some(Priority::Medium),
            ..Default::default()
        };

        let updated = s.update_task(&TaskId::from("a"), patch).await.unwrap();
        assert_eq!(updated.title, "Charlie v2");

        let local = s.board().unwrap().task(&TaskId::from("a")).unwrap();
        assert_eq!(local.title, "Charlie v2");
        assert_eq!(local.priority, Some(Priority::Medium));
    }

    #[tokio::test]
    async fn test_delete_task() {
        let mut s = session().await;
        s.delete_task(&TaskId::from("d")).await.unwrap();

        assert!(s.board().unwrap().task(&TaskId::from("d")).is_none());
        assert!(s.delete_task(&TaskId::from("d")).await.is_err());
    }

    #[tokio::test]
    async fn test_view_applies_search_and_filter() {
        let mut s = session().await;
        s.set_search("ALPHA");
        let view = s.view().unwrap();
        assert_eq!(ids(&view, 0), vec!["b"]);
        assert!(view.columns[1].tasks.is_empty());

        s.set_search("");
        s.set_filter(ActiveFilter::from_parts("sort", "title"));
        let view = s.view().unwrap();
        assert_eq!(ids(&view, 0), vec!["b", "c", "a"]);

        // the base board keeps its order
        assert_eq!(ids(s.board().unwrap(), 0), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_commit_sort_sends_ordered_updates() {
        let mut s = session().await;
        let sent = s
            .commit_sort(&ColumnId::from("column-1"), SortKey::Title)
            .await
            .unwrap();
        assert_eq!(sent, 3);

        let recorded = s.api().recorded();
        let order: Vec<_> = recorded.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
        let sort_orders: Vec<_> = recorded.iter().map(|(_, p)| p.sort_order).collect();
        assert_eq!(sort_orders, vec![Some(0), Some(1), Some(2)]);

        s.set_filter(ActiveFilter::Sort(None));
        assert_eq!(ids(&s.view().unwrap(), 0), vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn test_commit_sort_small_column_is_noop() {
        let mut s = session().await;
        let sent = s
            .commit_sort(&ColumnId::from("column-2"), SortKey::Date)
            .await
            .unwrap();
        assert_eq!(sent, 0);

        let sent = s
            .commit_sort(&ColumnId::from("column-3"), SortKey::Date)
            .await
            .unwrap();
        assert_eq!(sent, 0);
        assert!(s.api().recorded().is_empty());
    }

    #[tokio::test]
    async fn test_commit_sort_stops_at_first_failure() {
        let mut s = session().await;
        s.api().fail_updates_from(1);

        let err = s
            .commit_sort(&ColumnId::from("column-1"), SortKey::PriorityHigh)
            .await
            .unwrap_err();
        assert!(err.is_backend_failure());
        assert_eq!(s.api().recorded().len(), 2);

        let server = s.api().inner.snapshot().await;
        assert_eq!(s.board().unwrap(), &s.normalize(server));
    }

    #[tokio::test]
    async fn test_add_task_blank_literal_never_sent() {
        let mut s = session().await;
        let literal = NewTask {
            title: "".into(),
            description: None,
            priority: None,
        };

        let err = s
            .add_task(&ColumnId::from("column-1"), literal)
            .await
            .unwrap_err();
        assert!(matches!(err, TaskBoardError::Validation(_)));
        assert_eq!(s.api().creates.load(Ordering::SeqCst), 0);
        assert_eq!(s.api().inner.snapshot().await.task_count(), 4);
    }

    #[tokio::test]
    async fn test_commit_sort_includes_tasks_hidden_by_search() {
        let mut s = session().await;
        s.set_search("r");
        assert_eq!(ids(&s.view().unwrap(), 0), vec!["a", "c"]);

        let sent = s
            .commit_sort(&ColumnId::from("column-1"), SortKey::Title)
            .await
            .unwrap();
        assert_eq!(sent, 3);

        let recorded = s.api().recorded();
        let assigned: Vec<_> = recorded
            .iter()
            .map(|(id, p)| (id.as_str(), p.sort_order))
            .collect();
        assert_eq!(
            assigned,
            vec![("b", Some(0)), ("c", Some(1)), ("a", Some(2))]
        );

        let server = s.api().inner.snapshot().await;
        assert!(server.columns[0].tasks.iter().all(|t| t.sort_order.is_some()));
    }

    #[tokio::test]
    async fn test_commit_sort_ignores_predicate_filter() {
        let mut s = session().await;
        s.set_filter(ActiveFilter::from_parts("filter", "high-priority"));
        assert_eq!(ids(&s.view().unwrap(), 0), vec!["b"]);

        let sent = s
            .commit_sort(&ColumnId::from("column-1"), SortKey::PriorityLow)
            .await
            .unwrap();
        assert_eq!(sent, 3);

        let order: Vec<_> = s
            .api()
            .recorded()
            .into_iter()
            .map(|(id, _)| id.to_string())
            .collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_settings_unchanged_when_save_fails() {
        let temp_dir = TempDir::new().unwrap();
        let not_a_dir = temp_dir.path().join("settings-blocker");
        tokio::fs::write(&not_a_dir, "occupied").await.unwrap();

        let mut s = BoardSession::new(ScriptedApi::new(seeded()), SessionConfig::default())
            .with_settings_store(SettingsStore::new(&not_a_dir))
            .await
            .unwrap();
        s.load().await.unwrap();

        let result = s
            .update_settings(SettingsUpdate {
                dark_mode: Some(true),
                ..Default::default()
            })
            .await;
        assert!(result.is_err());
        assert_eq!(s.settings(), AppSettings::default());
        assert_eq!(s.board().unwrap().theme, Theme::Light);
    }

    #[tokio::test]
    async fn test_commit_sort_unknown_column() {
        let mut s = session().await;
        let err = s
            .commit_sort(&ColumnId::from("column-9"), SortKey::Title)
            .await
            .unwrap_err();
        assert!(matches!(err, TaskBoardError::ColumnNotFound(_)));
    }

    #[tokio::test]
    async fn test_settings_persist_through_store() {
        let temp_dir = TempDir::new().unwrap();

        let mut s = BoardSession::new(ScriptedApi::new(seeded()), SessionConfig::default())
            .with_settings_store(SettingsStore::new(temp_dir.path()))
            .await
            .unwrap();
        assert_eq!(s.settings(), AppSettings::default());

        s.update_settings(SettingsUpdate {
            compact_view: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();

        let reopened = BoardSession::new(
            ScriptedApi::new(Board::new(vec![Column::new("x", "X")])),
            SessionConfig::default(),
        )
        .with_settings_store(SettingsStore::new(temp_dir.path()))
        .await
        .unwrap();
        assert!(reopened.settings().compact_view);
    }
}
