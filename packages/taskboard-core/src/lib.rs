//! In-process state engine for a multi-dashboard kanban board.
//!
//! `BoardEngine` owns the dashboard registry and UI state, applies every
//! mutation as a new immutable `Snapshot`, and writes each accepted change
//! through a `KeyValueStore`.

pub mod board;
pub mod clock;
pub mod config;
pub mod engine;
pub mod ids;
pub mod persist;
pub mod query;
pub mod registry;
pub mod storage;
pub mod types;
pub mod ui_state;

pub use engine::{BoardEngine, Snapshot};
pub use types::{
    BoardData, ChatMessage, ChatSender, ChecklistItem, Column, Task, TaskDraft, TaskUpdate,
    DEFAULT_DASHBOARD_ID,
};
