//! HTTP Task API
//!
//! `reqwest` client for the hosted collection. On wasm32 reqwest issues the
//! requests through the browser's `fetch`.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Serialize;

use super::wire::{ingest_listing, ApiTask, CreateTaskBody, NameBody, StatusBody};
use super::{ApiError, ApiResult, TaskApi};
use crate::config::ApiConfig;
use crate::domain::{Task, TaskStatus};

/// Task API backed by the remote REST collection
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    config: ApiConfig,
}

impl HttpTaskApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn send(&self, method: Method, url: Url, build: impl FnOnce(RequestBuilder) -> RequestBuilder) -> ApiResult<Response> {
        tracing::debug!(%method, %url, "sending task request");
        let request = build(self.client.request(method.clone(), url.clone()));
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn put_task<B: Serialize>(&self, id: &str, body: &B) -> ApiResult<Task> {
        let url = self.config.item_url(id)?;
        let response = self.send(Method::PUT, url, |req| req.json(body)).await?;
        let record: ApiTask = response.json().await?;
        record.into_task()
    }
}

#[async_trait(?Send)]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        let url = self.config.collection_url()?;
        let response = self.send(Method::GET, url, |req| req).await?;
        let records: Vec<ApiTask> = response.json().await?;
        let tasks = ingest_listing(records);
        tracing::debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    async fn create_task(&self, name: &str) -> ApiResult<Task> {
        let url = self.config.collection_url()?;
        let body = CreateTaskBody {
            name,
            status: TaskStatus::Todo,
        };
        let response = self.send(Method::POST, url, |req| req.json(&body)).await?;
        let record: ApiTask = response.json().await?;
        record.into_task()
    }

    async fn update_status(&self, id: &str, status: TaskStatus) -> ApiResult<Task> {
        self.put_task(id, &StatusBody { status }).await
    }

    async fn update_name(&self, id: &str, name: &str) -> ApiResult<Task> {
        self.put_task(id, &NameBody { name }).await
    }

    async fn delete_task(&self, id: &str) -> ApiResult<()> {
        let url = self.config.item_url(id)?;
        self.send(Method::DELETE, url, |req| req).await?;
        Ok(())
    }
}
