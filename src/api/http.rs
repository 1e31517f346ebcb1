use crate::{
    api::BoardApi,
    config::ApiConfig,
    domain::{Board, ColumnId, NewTask, Task, TaskId, TaskPatch},
    error::{Result, TaskBoardError},
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// REST client for the board backend
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    config: ApiConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskRequest<'a> {
    #[serde(flatten)]
    task: &'a NewTask,
    column_id: &'a ColumnId,
}

/// FastAPI-style error body
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

impl HttpApi {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn task_url(&self, id: &TaskId) -> String {
        self.config.url(&format!("tasks/{}", id.as_str()))
    }

    /// Turns a non-2xx response into `RequestFailed`
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str::<ErrorBody>(&text)
            .map(|e| e.detail)
            .unwrap_or(text);

        warn!(status = status.as_u16(), %body, "board API request failed");
        Err(TaskBoardError::RequestFailed {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl BoardApi for HttpApi {
    async fn fetch_board(&self) -> Result<Board> {
        let url = self.config.url("board");
        debug!(%url, "fetching board");

        let response = self.client.get(&url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create_task(&self, column: &ColumnId, task: &NewTask) -> Result<Task> {
        let url = self.config.url("tasks");
        debug!(%url, column = %column, "creating task");

        let request = CreateTaskRequest {
            task,
            column_id: column,
        };
        let response = self.client.post(&url).json(&request).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task> {
        let url = self.task_url(id);
        debug!(%url, "updating task");

        let response = self.client.patch(&url).json(patch).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<()> {
        let url = self.task_url(id);
        debug!(%url, "deleting task");

        let response = self.client.delete(&url).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
