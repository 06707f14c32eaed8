//! Optimistic Overlay
//!
//! Locally applied field changes that the server has not confirmed yet,
//! keyed by task id and projected on top of the latest server snapshot.
//!
//! An entry loses a field when either
//! - a later snapshot reports the same value for that field (`reconcile`), or
//! - the request that introduced it fails (`rollback`).
//!
//! Entries without fields are never retained.
//!
//! Reconciliation compares values only; intent order is not tracked. If the
//! same field is changed twice before a snapshot lands, a snapshot or a failed
//! request belonging to the first change can clear or keep the second one.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::{Task, TaskId, TaskStatus};

/// Unconfirmed field values for one task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingOverride {
    pub status: Option<TaskStatus>,
    pub name: Option<String>,
}

/// A field an override can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideField {
    Status,
    Name,
}

impl PendingOverride {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            name: None,
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            status: None,
            name: Some(name.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.name.is_none()
    }

    /// Fields present in `patch` replace ours; absent ones are left alone.
    fn merge(&mut self, patch: PendingOverride) {
        if patch.status.is_some() {
            self.status = patch.status;
        }
        if patch.name.is_some() {
            self.name = patch.name;
        }
    }

    fn clear(&mut self, field: OverrideField) {
        match field {
            OverrideField::Status => self.status = None,
            OverrideField::Name => self.name = None,
        }
    }

    /// Drop every field the server already agrees with.
    fn clear_confirmed(&mut self, task: &Task) {
        if self.status == Some(task.status) {
            self.status = None;
        }
        if self.name.as_deref() == Some(task.name.as_str()) {
            self.name = None;
        }
    }
}

/// Task as rendered: server data with pending overrides applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTask {
    pub task: Task,
    /// An unconfirmed override was applied
    pub pending: bool,
}

impl DisplayTask {
    pub fn id(&self) -> &str {
        &self.task.id
    }
}

/// Map from task id to its pending override
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    entries: HashMap<TaskId, PendingOverride>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&PendingOverride> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge `patch` into the entry for `id`, creating it if absent.
    pub fn set_override(&mut self, id: &str, patch: PendingOverride) {
        if patch.is_empty() {
            return;
        }
        self.entries.entry(id.to_string()).or_default().merge(patch);
    }

    /// Clear every overridden field that `snapshot` already reports.
    pub fn reconcile(&mut self, snapshot: &[Task]) {
        for task in snapshot {
            let Some(entry) = self.entries.get_mut(&task.id) else {
                continue;
            };
            entry.clear_confirmed(task);
            if entry.is_empty() {
                self.entries.remove(&task.id);
                tracing::debug!(task_id = %task.id, "override confirmed by server");
            }
        }
    }

    /// Next overlay after `snapshot` lands, leaving `self` untouched.
    pub fn reconciled(&self, snapshot: &[Task]) -> Overlay {
        let mut next = self.clone();
        next.reconcile(snapshot);
        next
    }

    /// Unconditionally discard `field` from the entry for `id`.
    pub fn rollback(&mut self, id: &str, field: OverrideField) {
        let Some(entry) = self.entries.get_mut(id) else {
            return;
        };
        entry.clear(field);
        if entry.is_empty() {
            self.entries.remove(id);
        }
    }

    /// Drop the whole entry for `id` (task no longer exists).
    pub fn forget(&mut self, id: &str) {
        self.entries.remove(id);
    }

    /// Project `snapshot` through the overlay, stamping overridden tasks with the current time.
    pub fn apply(&self, snapshot: &[Task]) -> Vec<DisplayTask> {
        self.apply_at(snapshot, Utc::now())
    }

    /// Project `snapshot` through the overlay, stamping overridden tasks with `now`.
    pub fn apply_at(&self, snapshot: &[Task], now: DateTime<Utc>) -> Vec<DisplayTask> {
        snapshot
            .iter()
            .map(|task| match self.entries.get(&task.id) {
                Some(pending) => {
                    let mut task = task.clone();
                    if let Some(status) = pending.status {
                        task.status = status;
                    }
                    if let Some(name) = &pending.name {
                        task.name = name.clone();
                    }
                    task.updated_at = now;
                    DisplayTask { task, pending: true }
                }
                None => DisplayTask {
                    task: task.clone(),
                    pending: false,
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, name: &str, status: TaskStatus) -> Task {
        Task::new(id, name, status, DateTime::from_timestamp(1_756_200_000, 0).unwrap())
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_756_300_000, 0).unwrap()
    }

    #[test]
    fn test_display_equals_source_without_overrides() {
        let overlay = Overlay::new();
        let source = vec![task("1", "a", TaskStatus::Todo), task("2", "b", TaskStatus::Done)];
        let shown = overlay.apply(&source);
        let tasks: Vec<Task> = shown.iter().map(|d| d.task.clone()).collect();
        assert_eq!(tasks, source);
        assert!(shown.iter().all(|d| !d.pending));
    }

    #[test]
    fn test_status_override_wins_over_server() {
        let mut overlay = Overlay::new();
        overlay.set_override("1", PendingOverride::status(TaskStatus::Doing));
        for server_status in TaskStatus::ALL {
            let shown = overlay.apply_at(&[task("1", "a", server_status)], now());
            assert_eq!(shown[0].task.status, TaskStatus::Doing);
            assert!(shown[0].pending);
            assert_eq!(shown[0].task.updated_at, now());
        }
    }

    #[test]
    fn test_set_override_merges_fields() {
        let mut overlay = Overlay::new();
        overlay.set_override("1", PendingOverride::name("x"));
        overlay.set_override("1", PendingOverride::status(TaskStatus::Done));
        assert_eq!(
            overlay.get("1"),
            Some(&PendingOverride {
                status: Some(TaskStatus::Done),
                name: Some("x".into()),
            })
        );
    }

    #[test]
    fn test_empty_patch_creates_no_entry() {
        let mut overlay = Overlay::new();
        overlay.set_override("1", PendingOverride::default());
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_reconcile_clears_matching_field_only() {
        let mut overlay = Overlay::new();
        overlay.set_override(
            "1",
            PendingOverride {
                status: Some(TaskStatus::Doing),
                name: Some("new text".into()),
            },
        );
        overlay.reconcile(&[task("1", "old text", TaskStatus::Doing)]);
        assert_eq!(overlay.get("1"), Some(&PendingOverride::name("new text")));
    }

    #[test]
    fn test_reconcile_removes_emptied_entry() {
        let mut overlay = Overlay::new();
        overlay.set_override("1", PendingOverride::status(TaskStatus::Done));
        overlay.reconcile(&[task("1", "a", TaskStatus::Done)]);
        assert!(overlay.get("1").is_none());
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_reconcile_keeps_unconfirmed_and_absent_entries() {
        let mut overlay = Overlay::new();
        overlay.set_override("1", PendingOverride::status(TaskStatus::Done));
        overlay.set_override("9", PendingOverride::name("elsewhere"));
        overlay.reconcile(&[task("1", "a", TaskStatus::Todo)]);
        assert_eq!(overlay.len(), 2);
    }

    #[test]
    fn test_reconciled_is_pure() {
        let mut overlay = Overlay::new();
        overlay.set_override("1", PendingOverride::status(TaskStatus::Done));
        let next = overlay.reconciled(&[task("1", "a", TaskStatus::Done)]);
        assert!(next.is_empty());
        assert_eq!(overlay.len(), 1);
    }

    #[test]
    fn test_rollback_removes_only_that_field() {
        let mut overlay = Overlay::new();
        overlay.set_override(
            "1",
            PendingOverride {
                status: Some(TaskStatus::Done),
                name: Some("x".into()),
            },
        );
        overlay.rollback("1", OverrideField::Status);
        assert_eq!(overlay.get("1"), Some(&PendingOverride::name("x")));
        overlay.rollback("1", OverrideField::Name);
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_rollback_of_missing_entry_is_noop() {
        let mut overlay = Overlay::new();
        overlay.rollback("1", OverrideField::Name);
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_failed_move_reverts_display() {
        let source = vec![task("1", "buy milk", TaskStatus::Todo)];
        let mut overlay = Overlay::new();
        overlay.set_override("1", PendingOverride::status(TaskStatus::Doing));
        assert_eq!(overlay.apply(&source)[0].task.status, TaskStatus::Doing);

        overlay.rollback("1", OverrideField::Status);
        let shown = overlay.apply(&source);
        assert_eq!(shown[0].task.status, TaskStatus::Todo);
        assert_eq!(shown[0].task, source[0]);
    }

    #[test]
    fn test_second_change_lost_when_first_request_fails() {
        // Value equality only: the failure of the first move discards the second.
        let mut overlay = Overlay::new();
        overlay.set_override("1", PendingOverride::status(TaskStatus::Doing));
        overlay.set_override("1", PendingOverride::status(TaskStatus::Done));
        overlay.rollback("1", OverrideField::Status);
        assert!(overlay.get("1").is_none());
    }

    #[test]
    fn test_forget_drops_entry() {
        let mut overlay = Overlay::new();
        overlay.set_override("1", PendingOverride::name("x"));
        overlay.forget("1");
        assert!(overlay.is_empty());
    }
}
