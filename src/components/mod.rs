//! UI Components
//!
//! Reusable Leptos components.

mod delete_task_button;
mod drag_preview;
mod error_alert;
mod loader;
mod todo_board;
mod todo_column;
mod todo_input;
mod todo_item;

pub use delete_task_button::DeleteTaskButton;
pub use drag_preview::DragPreview;
pub use error_alert::ErrorAlert;
pub use loader::Loader;
pub use todo_board::TodoBoard;
pub use todo_column::TodoColumn;
pub use todo_input::TodoInput;
pub use todo_item::TodoItem;
