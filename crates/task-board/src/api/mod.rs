//! Remote Task API
//!
//! Abstract interface to the hosted task collection plus its HTTP
//! implementation. The collection owns identity and persistence; the client
//! only issues CRUD requests and normalises timestamps on the way in.

mod http;
mod wire;

use async_trait::async_trait;

use crate::domain::{Task, TaskStatus};

pub use http::HttpTaskApi;
pub use wire::ApiTask;

/// Common result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures talking to the remote collection
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: String,
        url: String,
        status: u16,
    },

    #[error("malformed task record: {0}")]
    Malformed(String),
}

/// CRUD contract of the remote task collection
///
/// Futures are not required to be `Send`: in the browser they run on the
/// single-threaded event loop.
#[async_trait(?Send)]
pub trait TaskApi {
    /// Fetch every task in the collection
    async fn list_tasks(&self) -> ApiResult<Vec<Task>>;

    /// Create a task in the `todo` column
    async fn create_task(&self, name: &str) -> ApiResult<Task>;

    /// Move a task to another column
    async fn update_status(&self, id: &str, status: TaskStatus) -> ApiResult<Task>;

    /// Replace a task's text
    async fn update_name(&self, id: &str, name: &str) -> ApiResult<Task>;

    async fn delete_task(&self, id: &str) -> ApiResult<()>;
}
