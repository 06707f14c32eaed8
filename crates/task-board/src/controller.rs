//! Board Controller
//!
//! Routes user intents through the overlay and the remote API. State changes
//! happen synchronously before and after each awaited request, never across
//! one, so the board stays consistent on a single-threaded event loop.

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{ApiResult, TaskApi};
use crate::board::{BoardState, FieldChange, Mutation};
use crate::domain::Task;
use crate::overlay::DisplayTask;

/// Storage for the board state shared between event handlers.
///
/// Both methods return `None` once the owner has been torn down; late
/// responses are then dropped.
pub trait BoardCell {
    fn update_board<R>(&self, f: impl FnOnce(&mut BoardState) -> R) -> Option<R>;

    fn read_board<R>(&self, f: impl FnOnce(&BoardState) -> R) -> Option<R>;
}

impl BoardCell for Rc<RefCell<BoardState>> {
    fn update_board<R>(&self, f: impl FnOnce(&mut BoardState) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }

    fn read_board<R>(&self, f: impl FnOnce(&BoardState) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }
}

/// Result of a drag-drop or text edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing to do (same value, invalid target, unknown task, torn-down view)
    Ignored,
    /// Server accepted the change
    Confirmed,
    /// Request failed and the optimistic value was discarded
    RolledBack,
}

/// Orchestrates optimistic actions against a [`TaskApi`]
#[derive(Debug, Clone)]
pub struct BoardController<A, C> {
    api: A,
    cell: C,
}

impl<A: TaskApi, C: BoardCell> BoardController<A, C> {
    pub fn new(api: A, cell: C) -> Self {
        Self { api, cell }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cell(&self) -> &C {
        &self.cell
    }

    /// Fetch the collection and reconcile the overlay against it.
    pub async fn refresh(&self) -> ApiResult<()> {
        if self.cell.update_board(BoardState::begin_refresh).is_none() {
            return Ok(());
        }
        match self.api.list_tasks().await {
            Ok(tasks) => {
                tracing::info!(count = tasks.len(), "board refreshed");
                self.cell.update_board(|board| board.ingest(tasks));
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load tasks");
                self.cell.update_board(|board| board.fail_load(e.to_string()));
                Err(e)
            }
        }
    }

    /// Display form of task `id`
    pub fn find(&self, id: &str) -> Option<DisplayTask> {
        self.cell.read_board(|board| board.find(id)).flatten()
    }

    pub fn drag_start(&self, id: &str) -> bool {
        self.cell.update_board(|board| board.drag_start(id)).unwrap_or(false)
    }

    pub fn drag_cancel(&self) {
        self.cell.update_board(BoardState::drag_cancel);
    }

    /// Drop task `id` on the column identified by `zone`.
    pub async fn drop_task(&self, id: &str, zone: &str) -> ActionOutcome {
        let mutation = self.cell.update_board(|board| board.drop_on(id, zone)).flatten();
        self.confirm(mutation).await
    }

    /// Save edited text for task `id`.
    pub async fn rename_task(&self, id: &str, text: &str) -> ActionOutcome {
        let mutation = self.cell.update_board(|board| board.begin_rename(id, text)).flatten();
        self.confirm(mutation).await
    }

    /// Create a task from `text`; blank text creates nothing.
    pub async fn create_task(&self, text: &str) -> ApiResult<Option<Task>> {
        let name = text.trim();
        if name.is_empty() {
            return Ok(None);
        }
        match self.api.create_task(name).await {
            Ok(task) => {
                tracing::info!(task_id = %task.id, "task created");
                self.refetch().await;
                Ok(Some(task))
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to create task");
                Err(e)
            }
        }
    }

    pub async fn delete_task(&self, id: &str) -> ApiResult<()> {
        match self.api.delete_task(id).await {
            Ok(()) => {
                tracing::info!(task_id = %id, "task deleted");
                self.cell.update_board(|board| board.forget(id));
                self.refetch().await;
                Ok(())
            }
            Err(e) => {
                tracing::error!(task_id = %id, error = %e, "failed to delete task");
                Err(e)
            }
        }
    }

    async fn confirm(&self, mutation: Option<Mutation>) -> ActionOutcome {
        let Some(mutation) = mutation else {
            return ActionOutcome::Ignored;
        };

        let result = match &mutation.change {
            FieldChange::Status(status) => self.api.update_status(&mutation.id, *status).await,
            FieldChange::Name(name) => self.api.update_name(&mutation.id, name).await,
        };

        match result {
            Ok(_) => {
                self.cell.update_board(|board| board.settle(&mutation, true));
                self.refetch().await;
                ActionOutcome::Confirmed
            }
            Err(e) => {
                tracing::warn!(task_id = %mutation.id, field = ?mutation.change.field(), error = %e, "update failed, rolling back");
                self.cell.update_board(|board| board.settle(&mutation, false));
                ActionOutcome::RolledBack
            }
        }
    }

    /// Refetch after a successful write.
    ///
    /// The write already went through, so a failed listing only logs and the
    /// board keeps its snapshot; overrides stay until a later read agrees.
    async fn refetch(&self) {
        match self.api.list_tasks().await {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "refetched after write");
                self.cell.update_board(|board| board.ingest(tasks));
            }
            Err(e) => {
                tracing::warn!(error = %e, "refetch after write failed, keeping current board");
            }
        }
    }
}
