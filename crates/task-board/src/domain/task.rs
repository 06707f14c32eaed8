//! Task Entity
//!
//! A single to-do item as held on the client after ingestion.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::TaskStatus;

/// Server-assigned task identifier
pub type TaskId = String;

/// A to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier (assigned by the remote collection)
    pub id: TaskId,
    /// Task text
    pub name: String,
    /// Column the task sits in
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a task with both timestamps set to `at`
    pub fn new(id: impl Into<TaskId>, name: impl Into<String>, status: TaskStatus, at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status,
            created_at: at,
            updated_at: at,
        }
    }

    pub fn created_at_iso(&self) -> String {
        iso_8601(&self.created_at)
    }

    pub fn updated_at_iso(&self) -> String {
        iso_8601(&self.updated_at)
    }
}

/// `YYYY-MM-DDTHH:MM:SS.mmmZ`
fn iso_8601(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_rendering() {
        let at = DateTime::from_timestamp(1_756_200_000, 0).unwrap();
        let task = Task::new("1", "buy milk", TaskStatus::Todo, at);
        assert_eq!(task.created_at_iso(), "2025-08-26T09:20:00.000Z");
        assert_eq!(task.updated_at_iso(), task.created_at_iso());
    }

    #[test]
    fn test_camel_case_serialization() {
        let at = DateTime::from_timestamp(0, 0).unwrap();
        let task = Task::new("7", "x", TaskStatus::Done, at);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], "done");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
