//! Board State
//!
//! Everything the board renders from: the last server snapshot, the
//! optimistic overlay, the drag gesture and the load status. All methods are
//! synchronous; the controller wraps them around the asynchronous API calls.

use crate::domain::{Task, TaskId, TaskStatus};
use crate::overlay::{DisplayTask, OverrideField, Overlay, PendingOverride};

/// Listing status of the whole board
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    /// Last listing failed; recoverable through an explicit retry
    Failed(String),
}

/// Drag gesture lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(TaskId),
}

/// Field value a mutation request carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Status(TaskStatus),
    Name(String),
}

impl FieldChange {
    pub fn field(&self) -> OverrideField {
        match self {
            FieldChange::Status(_) => OverrideField::Status,
            FieldChange::Name(_) => OverrideField::Name,
        }
    }
}

/// An optimistically applied change awaiting server confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub id: TaskId,
    pub change: FieldChange,
}

/// Display tasks bucketed by column, each in server order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns {
    pub todo: Vec<DisplayTask>,
    pub doing: Vec<DisplayTask>,
    pub done: Vec<DisplayTask>,
}

impl Columns {
    pub fn group(tasks: Vec<DisplayTask>) -> Self {
        let mut columns = Columns::default();
        for task in tasks {
            match task.task.status {
                TaskStatus::Todo => columns.todo.push(task),
                TaskStatus::Doing => columns.doing.push(task),
                TaskStatus::Done => columns.done.push(task),
            }
        }
        columns
    }

    pub fn get(&self, status: TaskStatus) -> &[DisplayTask] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::Doing => &self.doing,
            TaskStatus::Done => &self.done,
        }
    }
}

/// Board-wide state owned by one controller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    tasks: Vec<Task>,
    overlay: Overlay,
    drag: DragState,
    load: LoadState,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last server snapshot, without overrides
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    // ========================
    // Snapshot lifecycle
    // ========================

    /// Take a fresh listing: replace the snapshot and let the overlay catch up.
    pub fn ingest(&mut self, tasks: Vec<Task>) {
        self.overlay.reconcile(&tasks);
        self.tasks = tasks;
        self.load = LoadState::Ready;
    }

    pub fn fail_load(&mut self, message: impl Into<String>) {
        self.load = LoadState::Failed(message.into());
    }

    /// A retry after failure shows the loader; background refetches keep the board visible.
    pub fn begin_refresh(&mut self) {
        if matches!(self.load, LoadState::Failed(_)) {
            self.load = LoadState::Loading;
        }
    }

    // ========================
    // Projection
    // ========================

    pub fn display_tasks(&self) -> Vec<DisplayTask> {
        self.overlay.apply(&self.tasks)
    }

    pub fn columns(&self) -> Columns {
        Columns::group(self.display_tasks())
    }

    /// Display form of one task
    pub fn find(&self, id: &str) -> Option<DisplayTask> {
        let task = self.tasks.iter().find(|t| t.id == id)?;
        self.overlay.apply(std::slice::from_ref(task)).pop()
    }

    // ========================
    // Drag gesture
    // ========================

    /// Enter `Dragging` for a known task; returns false otherwise.
    pub fn drag_start(&mut self, id: &str) -> bool {
        if self.tasks.iter().any(|t| t.id == id) {
            self.drag = DragState::Dragging(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn drag_cancel(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Task under the pointer while dragging
    pub fn active_task(&self) -> Option<DisplayTask> {
        match &self.drag {
            DragState::Dragging(id) => self.find(id),
            DragState::Idle => None,
        }
    }

    /// Finish the gesture over `zone`; applies and returns the status change if there is one.
    pub fn drop_on(&mut self, id: &str, zone: &str) -> Option<Mutation> {
        self.drag = DragState::Idle;

        let status = match zone.parse::<TaskStatus>() {
            Ok(status) => status,
            Err(e) => {
                tracing::debug!(task_id = %id, error = %e, "drop outside a column ignored");
                return None;
            }
        };
        let current = self.find(id)?;
        if current.task.status == status {
            return None;
        }

        self.overlay.set_override(id, PendingOverride::status(status));
        Some(Mutation {
            id: id.to_string(),
            change: FieldChange::Status(status),
        })
    }

    // ========================
    // Text edit
    // ========================

    /// Apply an edited name; blank or unchanged text yields nothing.
    pub fn begin_rename(&mut self, id: &str, text: &str) -> Option<Mutation> {
        let name = text.trim();
        if name.is_empty() {
            return None;
        }
        let current = self.find(id)?;
        if current.task.name == name {
            return None;
        }

        self.overlay.set_override(id, PendingOverride::name(name));
        Some(Mutation {
            id: id.to_string(),
            change: FieldChange::Name(name.to_string()),
        })
    }

    // ========================
    // Confirmation
    // ========================

    /// Record the outcome of `mutation`'s request. Success waits for the next
    /// snapshot to reconcile; failure rolls back exactly the touched field.
    pub fn settle(&mut self, mutation: &Mutation, succeeded: bool) {
        if !succeeded {
            self.overlay.rollback(&mutation.id, mutation.change.field());
        }
    }

    /// Task was deleted on the server
    pub fn forget(&mut self, id: &str) {
        self.overlay.forget(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn task(id: &str, name: &str, status: TaskStatus) -> Task {
        Task::new(id, name, status, DateTime::from_timestamp(1_756_200_000, 0).unwrap())
    }

    fn loaded(tasks: Vec<Task>) -> BoardState {
        let mut board = BoardState::new();
        board.ingest(tasks);
        board
    }

    #[test]
    fn test_starts_loading() {
        let board = BoardState::new();
        assert_eq!(board.load_state(), &LoadState::Loading);
        assert!(board.columns().todo.is_empty());
    }

    #[test]
    fn test_columns_group_by_display_status() {
        let mut board = loaded(vec![
            task("1", "a", TaskStatus::Todo),
            task("2", "b", TaskStatus::Doing),
            task("3", "c", TaskStatus::Todo),
        ]);
        board.drop_on("3", "done");

        let columns = board.columns();
        let ids = |list: &[DisplayTask]| list.iter().map(|t| t.task.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(columns.get(TaskStatus::Todo)), vec!["1"]);
        assert_eq!(ids(columns.get(TaskStatus::Doing)), vec!["2"]);
        assert_eq!(ids(columns.get(TaskStatus::Done)), vec!["3"]);
    }

    #[test]
    fn test_drop_on_same_column_is_noop() {
        let mut board = loaded(vec![task("1", "a", TaskStatus::Todo)]);
        assert!(board.drag_start("1"));
        assert_eq!(board.drop_on("1", "todo"), None);
        assert!(board.overlay().is_empty());
        assert_eq!(board.drag(), &DragState::Idle);
    }

    #[test]
    fn test_drop_on_invalid_zone_is_noop() {
        let mut board = loaded(vec![task("1", "a", TaskStatus::Todo)]);
        board.drag_start("1");
        assert_eq!(board.drop_on("1", "2"), None);
        assert_eq!(board.drop_on("1", "DONE"), None);
        assert!(board.overlay().is_empty());
    }

    #[test]
    fn test_drop_compares_against_displayed_status() {
        let mut board = loaded(vec![task("1", "a", TaskStatus::Todo)]);
        assert!(board.drop_on("1", "doing").is_some());
        // Displayed status is now doing; dropping on doing again changes nothing.
        assert_eq!(board.drop_on("1", "doing"), None);
        // Back to the server's column is a real change.
        let back = board.drop_on("1", "todo").unwrap();
        assert_eq!(back.change, FieldChange::Status(TaskStatus::Todo));
    }

    #[test]
    fn test_drop_applies_override() {
        let mut board = loaded(vec![task("1", "buy milk", TaskStatus::Todo)]);
        board.drag_start("1");
        let mutation = board.drop_on("1", "doing").unwrap();
        assert_eq!(mutation.id, "1");
        assert_eq!(board.find("1").unwrap().task.status, TaskStatus::Doing);
        assert_eq!(board.tasks()[0].status, TaskStatus::Todo);
    }

    #[test]
    fn test_drop_of_unknown_task_is_noop() {
        let mut board = loaded(vec![task("1", "a", TaskStatus::Todo)]);
        assert_eq!(board.drop_on("404", "done"), None);
        assert!(board.overlay().is_empty());
    }

    #[test]
    fn test_drag_lifecycle() {
        let mut board = loaded(vec![task("1", "a", TaskStatus::Todo)]);
        assert!(!board.drag_start("nope"));
        assert_eq!(board.drag(), &DragState::Idle);

        assert!(board.drag_start("1"));
        assert_eq!(board.active_task().unwrap().task.name, "a");
        board.drag_cancel();
        assert!(board.active_task().is_none());
    }

    #[test]
    fn test_failed_move_rolls_back() {
        let mut board = loaded(vec![task("1", "buy milk", TaskStatus::Todo)]);
        let mutation = board.drop_on("1", "doing").unwrap();
        board.settle(&mutation, false);
        assert_eq!(board.find("1").unwrap().task.status, TaskStatus::Todo);
        assert!(board.overlay().is_empty());
    }

    #[test]
    fn test_rollback_keeps_other_field() {
        let mut board = loaded(vec![task("1", "a", TaskStatus::Todo)]);
        let rename = board.begin_rename("1", "b").unwrap();
        let moved = board.drop_on("1", "done").unwrap();
        board.settle(&moved, false);
        assert_eq!(board.overlay().get("1"), Some(&PendingOverride::name("b")));
        board.settle(&rename, true);
        assert_eq!(board.overlay().get("1"), Some(&PendingOverride::name("b")));
    }

    #[test]
    fn test_confirmation_waits_for_snapshot() {
        let mut board = loaded(vec![task("1", "a", TaskStatus::Todo)]);
        let mutation = board.drop_on("1", "done").unwrap();
        board.settle(&mutation, true);
        assert_eq!(board.overlay().len(), 1);

        board.ingest(vec![task("1", "a", TaskStatus::Done)]);
        assert!(board.overlay().is_empty());
        assert_eq!(board.find("1").unwrap().task.status, TaskStatus::Done);
    }

    #[test]
    fn test_rename_trims_and_skips_noops() {
        let mut board = loaded(vec![task("1", "buy milk", TaskStatus::Todo)]);
        assert_eq!(board.begin_rename("1", "   "), None);
        assert_eq!(board.begin_rename("1", " buy milk "), None);

        let mutation = board.begin_rename("1", "  buy oat milk ").unwrap();
        assert_eq!(mutation.change, FieldChange::Name("buy oat milk".into()));
        assert_eq!(board.find("1").unwrap().task.name, "buy oat milk");
    }

    #[test]
    fn test_load_failure_and_retry() {
        let mut board = BoardState::new();
        board.fail_load("HTTP 500");
        assert_eq!(board.load_state(), &LoadState::Failed("HTTP 500".into()));

        board.begin_refresh();
        assert_eq!(board.load_state(), &LoadState::Loading);

        board.ingest(vec![]);
        board.begin_refresh();
        assert_eq!(board.load_state(), &LoadState::Ready);
    }

    #[test]
    fn test_forget_clears_override() {
        let mut board = loaded(vec![task("1", "a", TaskStatus::Todo)]);
        board.drop_on("1", "done");
        board.forget("1");
        assert!(board.overlay().is_empty());
    }
}
