//! Task Board Core
//!
//! Layered architecture:
//! - domain: Task entity and column statuses
//! - api: Remote task collection client
//! - overlay: Pending optimistic field overrides
//! - board: Board state machine (snapshot, overlay, drag, load state)
//! - controller: Orchestrates optimistic actions against the API

pub mod api;
pub mod board;
pub mod config;
pub mod controller;
pub mod domain;
pub mod overlay;

pub use api::{ApiError, ApiResult, HttpTaskApi, TaskApi};
pub use board::{BoardState, Columns, DragState, FieldChange, LoadState, Mutation};
pub use config::ApiConfig;
pub use controller::{ActionOutcome, BoardCell, BoardController};
pub use domain::{Task, TaskId, TaskStatus, UnknownStatus};
pub use overlay::{DisplayTask, OverrideField, Overlay, PendingOverride};
