//! Domain Layer
//!
//! Task entity and the status values that double as column identifiers.

mod status;
mod task;

pub use status::{TaskStatus, UnknownStatus};
pub use task::{Task, TaskId};
