//! The task API seam.
//!
//! [`TaskApi`] is the narrow interface the orchestration layer talks
//! to: submit one job, fetch one status document. [`GoApiClient`] is
//! the production implementation; tests substitute doubles.

use async_trait::async_trait;

use mjstudio_core::job::JobRequest;

use crate::client::{GoApiClient, GoApiError};
use crate::submit;
use crate::task::TaskDocument;

/// Remote task service as seen by the job orchestrator.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Submit a job, returning the server-assigned task id.
    async fn submit_job(&self, request: &JobRequest) -> Result<String, GoApiError>;

    /// Fetch the current status document for a task.
    async fn fetch(&self, task_id: &str) -> Result<TaskDocument, GoApiError>;
}

#[async_trait]
impl TaskApi for GoApiClient {
    async fn submit_job(&self, request: &JobRequest) -> Result<String, GoApiError> {
        let (endpoint, payload) = submit::submission(request);
        tracing::debug!(kind = %request.kind(), endpoint = endpoint.path(), "Submitting job");
        self.submit(endpoint, &payload).await
    }

    async fn fetch(&self, task_id: &str) -> Result<TaskDocument, GoApiError> {
        GoApiClient::fetch(self, task_id).await
    }
}
