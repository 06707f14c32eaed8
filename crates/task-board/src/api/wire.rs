//! Wire Records
//!
//! Shapes exchanged with the remote collection. Timestamps arrive as epoch
//! seconds and are converted on ingestion; writes carry raw fields only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiResult};
use crate::domain::{Task, TaskStatus};

/// Task as returned by the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTask {
    pub id: String,
    pub name: String,
    /// Raw column identifier, validated by `into_task`
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ApiTask {
    pub fn into_task(self) -> ApiResult<Task> {
        let status = self
            .status
            .parse::<TaskStatus>()
            .map_err(|e| ApiError::Malformed(format!("task {}: {}", self.id, e)))?;
        let created_at = from_epoch_seconds(&self.id, "createdAt", self.created_at)?;
        let updated_at = from_epoch_seconds(&self.id, "updatedAt", self.updated_at)?;
        Ok(Task {
            id: self.id,
            name: self.name,
            status,
            created_at,
            updated_at,
        })
    }
}

/// Convert a listing, skipping records that cannot be placed on the board.
pub(super) fn ingest_listing(records: Vec<ApiTask>) -> Vec<Task> {
    records
        .into_iter()
        .filter_map(|record| match record.into_task() {
            Ok(task) => Some(task),
            Err(e) => {
                tracing::warn!(error = %e, "skipping task record");
                None
            }
        })
        .collect()
}

fn from_epoch_seconds(id: &str, field: &str, secs: i64) -> ApiResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| ApiError::Malformed(format!("task {}: {} out of range ({})", id, field, secs)))
}

/// `POST /` body
#[derive(Debug, Serialize)]
pub(super) struct CreateTaskBody<'a> {
    pub name: &'a str,
    pub status: TaskStatus,
}

/// `PUT /{id}` body for a column move
#[derive(Debug, Serialize)]
pub(super) struct StatusBody {
    pub status: TaskStatus,
}

/// `PUT /{id}` body for a text edit
#[derive(Debug, Serialize)]
pub(super) struct NameBody<'a> {
    pub name: &'a str,
}
