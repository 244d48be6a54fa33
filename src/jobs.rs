//! Job and application endpoints.
//!
//! Thin wrappers over `ApiClient`; the interceptor pair handles tokens and
//! auth failures, so these stay contract-shaped: path, body, response type.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::ApiClient;

/// A posted job as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub budget: Option<f64>,
    pub poster_id: i64,
}

/// Body for `create_job`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

/// A tasker's application to a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    pub job_id: i64,
    pub tasker_id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
struct NewApplication<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl ApiClient {
    /// `GET /jobs` — list open jobs.
    pub async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.get_json("/jobs").await
    }

    /// `POST /jobs` — post a new job (posters only).
    pub async fn create_job(&self, job: &NewJob) -> Result<Job, ApiError> {
        self.post_json("/jobs", job).await
    }

    /// `POST /jobs/{id}/applications` — apply to a job (taskers only).
    pub async fn apply_to_job(&self, job_id: i64, message: Option<&str>) -> Result<Application, ApiError> {
        let path = format!("/jobs/{job_id}/applications");
        self.post_json(&path, &NewApplication { message }).await
    }
}

#[cfg(test)]
#[path = "jobs_test.rs"]
mod tests;
