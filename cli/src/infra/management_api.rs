//! Infrastructure implementation of the `ManagementApi` port over HTTP.
//!
//! Endpoints, relative to the API root (`<base>/api/v2.0`):
//! - `GET  /app`           → JSON array of app records
//! - `POST /app/upgrade`   → `{"app_name": <id>}`, answers with a raw job id
//! - `POST /core/job_wait` → raw job id, answers 200 once the job is done
//!
//! Only status 200 counts as success on any of them.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};

use crate::application::ports::ManagementApi;
use crate::domain::{AppId, AppRecord, ApiError, JobHandle};

/// Production `ManagementApi` backed by a `reqwest::Client`.
pub struct HttpManagementApi {
    client: reqwest::Client,
    api_root: String,
}

impl HttpManagementApi {
    /// Wrap a client built by [`crate::infra::http::api_client`].
    #[must_use]
    pub fn new(client: reqwest::Client, api_root: impl Into<String>) -> Self {
        Self {
            client,
            api_root: api_root.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_root)
    }
}

impl ManagementApi for HttpManagementApi {
    async fn list_apps(&self) -> Result<Vec<AppRecord>, ApiError> {
        let resp = self
            .client
            .get(self.url("/app"))
            .send()
            .await
            .map_err(transport)?;
        let resp = ensure_ok(resp).await?;
        resp.json::<Vec<AppRecord>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn trigger_upgrade(&self, id: &AppId) -> Result<JobHandle, ApiError> {
        let resp = self
            .client
            .post(self.url("/app/upgrade"))
            .json(&serde_json::json!({ "app_name": id }))
            .send()
            .await
            .map_err(transport)?;
        let resp = ensure_ok(resp).await?;
        let body = resp.text().await.map_err(transport)?;
        Ok(JobHandle::new(body))
    }

    async fn wait_for_job(&self, job: &JobHandle) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(self.url("/core/job_wait"))
            .header(CONTENT_TYPE, "application/json")
            .body(job.as_str().to_owned())
            .send()
            .await
            .map_err(transport)?;
        ensure_ok(resp).await.map(drop)
    }
}

async fn ensure_ok(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status == StatusCode::OK {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), body = %body, "management API rejected request");
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

#[allow(clippy::needless_pass_by_value)]
fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}
