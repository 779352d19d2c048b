//! Error taxonomy for the job pipeline.
//!
//! `JobError` is the single error surface handlers see; every lower
//! layer's failure folds into exactly one of its kinds, so "bad
//! input", "remote refused", "remote failed", and "gave up waiting"
//! stay distinguishable all the way to the HTTP response.

use mjstudio_goapi::client::GoApiError;
use mjstudio_goapi::poll::PollError;

/// Errors from persisting a result document.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors from executing one rendering job end to end.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// The request failed validation; nothing left the process.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The remote service refused to accept the job.
    #[error("Job submission failed: {0}")]
    SubmissionFailed(String),

    /// A remote call failed at the network layer.
    #[error("Remote service unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    /// The remote service answered with something unparseable.
    #[error("Malformed remote response: {0}")]
    MalformedResponse(String),

    /// The job reached terminal failure on the remote side.
    #[error("Remote job failed: {0}")]
    RemoteJobFailed(String),

    /// The job never turned terminal within the polling budget.
    #[error("Job still not finished after {attempts} poll attempts")]
    PollTimeout { attempts: u32 },

    /// Cancelled by shutdown or request abandonment.
    #[error("Job cancelled")]
    Cancelled,

    /// The terminal document could not be persisted.
    #[error("Failed to persist job result: {0}")]
    Store(#[from] StoreError),
}

impl From<GoApiError> for JobError {
    fn from(err: GoApiError) -> Self {
        match err {
            GoApiError::Transport(e) => JobError::Transport(e),
            GoApiError::Rejected { status, detail } => {
                JobError::SubmissionFailed(format!("remote status {status}: {detail}"))
            }
            GoApiError::Malformed(message) => JobError::MalformedResponse(message),
        }
    }
}

impl From<PollError> for JobError {
    fn from(err: PollError) -> Self {
        match err {
            PollError::Api(api) => api.into(),
            PollError::JobFailed { message } => JobError::RemoteJobFailed(message),
            PollError::Timeout { attempts } => JobError::PollTimeout { attempts },
            PollError::Cancelled => JobError::Cancelled,
        }
    }
}
