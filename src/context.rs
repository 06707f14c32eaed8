//! Board Context
//!
//! Board state and API settings shared via the Leptos Context API.

use leptos::prelude::*;
use leptos_dragdrop::DndSignals;
use task_board::{ApiConfig, BoardCell, BoardController, BoardState, HttpTaskApi, TaskId, TaskStatus};

/// Drag signals of the board: task ids dragged onto status columns
pub type BoardDnd = DndSignals<TaskId, TaskStatus>;

/// Controller bound to the reactive board state
pub type Controller = BoardController<HttpTaskApi, SignalBoard>;

/// Board state held in a signal.
///
/// Updates after the owning view is disposed return `None`, so responses
/// arriving after teardown are dropped.
#[derive(Clone, Copy)]
pub struct SignalBoard(RwSignal<BoardState>);

impl BoardCell for SignalBoard {
    fn update_board<R>(&self, f: impl FnOnce(&mut BoardState) -> R) -> Option<R> {
        self.0.try_update(f)
    }

    fn read_board<R>(&self, f: impl FnOnce(&BoardState) -> R) -> Option<R> {
        self.0.try_with_untracked(f)
    }
}

/// App-wide board handles provided via context
#[derive(Clone, Copy)]
pub struct BoardContext {
    /// Snapshot, overlay, drag and load state
    pub board: RwSignal<BoardState>,
    config: StoredValue<ApiConfig>,
}

impl BoardContext {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            board: RwSignal::new(BoardState::new()),
            config: StoredValue::new(config),
        }
    }

    /// Controller for one user action
    pub fn controller(&self) -> Controller {
        BoardController::new(HttpTaskApi::new(self.config.get_value()), SignalBoard(self.board))
    }
}

/// Get the board context
pub fn use_board() -> BoardContext {
    expect_context::<BoardContext>()
}
