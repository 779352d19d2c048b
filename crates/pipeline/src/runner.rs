//! The job runner: one rendering job from request to stored result.

use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use mjstudio_core::error::CoreError;
use mjstudio_core::job::JobRequest;
use mjstudio_goapi::api::TaskApi;
use mjstudio_goapi::poll::{poll_until_terminal, PollOptions};

use crate::error::JobError;
use crate::store::ResultStore;

/// Executes rendering jobs against injected service seams.
///
/// Constructed once at startup and shared; every HTTP job request
/// drives one independent [`JobRunner::execute`].
pub struct JobRunner {
    api: Arc<dyn TaskApi>,
    store: Arc<dyn ResultStore>,
    poll: PollOptions,
}

impl JobRunner {
    pub fn new(api: Arc<dyn TaskApi>, store: Arc<dyn ResultStore>, poll: PollOptions) -> Self {
        Self { api, store, poll }
    }

    /// Run one job to completion: validate, submit, poll, persist.
    ///
    /// Returns the terminal task document exactly as the remote
    /// produced it; the storage id stays internal. Exactly one record
    /// is persisted on success and none on any failure path.
    pub async fn execute(
        &self,
        request: JobRequest,
        cancel: &CancellationToken,
    ) -> Result<Value, JobError> {
        request.validate().map_err(|e| match e {
            CoreError::Validation(detail) => JobError::InvalidRequest(detail),
            other => JobError::InvalidRequest(other.to_string()),
        })?;

        let kind = request.kind();
        let task_id = self.api.submit_job(&request).await?;
        tracing::info!(%kind, %task_id, "Job submitted");

        let document = poll_until_terminal(self.api.as_ref(), &task_id, &self.poll, cancel).await?;

        let body = document.into_body();
        let stored_id = self.store.save(&body).await?;
        tracing::info!(%kind, %task_id, %stored_id, "Job finished and persisted");

        Ok(body)
    }
}
