//! # Taskboard Core
//!
//! Board state handling for a REST-backed kanban task board.
//!
//! The crate holds the pieces of the board client that carry actual logic:
//! the search/filter/sort projection, the move reconciler with its
//! optimistic-update-then-confirm cycle, committed column resequencing,
//! and settings persistence. Rendering is left to the host.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod session;
pub mod settings;

// Re-export commonly used types
pub use api::{memory::MemoryApi, BoardApi};
#[cfg(feature = "http-api")]
pub use api::http::HttpApi;
pub use config::{ApiConfig, SessionConfig};
pub use domain::{
    board::{Board, Column},
    filter::{project, ActiveFilter, TaskFilter},
    reconcile::{MoveCommand, Reconciler, SameColumnDrop},
    sorting::SortKey,
    task::{ColumnId, NewTask, Position, Priority, Task, TaskId, TaskPatch},
};
pub use error::{Result, TaskBoardError};
pub use session::{BoardSession, Cue, MoveReport, TaskCreated};
pub use settings::{AppSettings, SettingsStore, SettingsUpdate};
