//! Bounded polling of submitted tasks.
//!
//! The remote service completes jobs asynchronously; the only way to
//! learn the outcome is to fetch the task document until its status
//! turns terminal. [`poll_until_terminal`] drives that loop with a
//! fixed interval, a hard attempt bound, and cooperative cancellation
//! via a [`CancellationToken`].

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api::TaskApi;
use crate::client::GoApiError;
use crate::task::{TaskDocument, TaskState};

/// Tunable parameters for the polling loop.
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Delay between consecutive fetch attempts.
    pub interval: Duration,
    /// Hard bound on the number of fetch attempts.
    pub max_attempts: u32,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_attempts: 60,
        }
    }
}

/// Errors from the polling loop.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// A fetch attempt failed at the transport or decoding layer.
    #[error(transparent)]
    Api(#[from] GoApiError),

    /// The task reached terminal failure.
    #[error("Remote job failed: {message}")]
    JobFailed { message: String },

    /// The task never turned terminal within the attempt bound.
    #[error("Job still not finished after {attempts} poll attempts")]
    Timeout { attempts: u32 },

    /// The cancellation token fired before a terminal status.
    #[error("Polling cancelled")]
    Cancelled,
}

/// Fetch `task_id` until its status is terminal.
///
/// Attempts are strictly sequential, spaced by `options.interval`.
/// A `finished` document is returned as-is; a `failed` document aborts
/// immediately with the remote failure reason; fetch errors propagate
/// without retry. Once `options.max_attempts` fetches have all come
/// back non-terminal the loop gives up with [`PollError::Timeout`].
///
/// Cancellation is observed before the first fetch and during every
/// inter-attempt wait.
pub async fn poll_until_terminal(
    api: &dyn TaskApi,
    task_id: &str,
    options: &PollOptions,
    cancel: &CancellationToken,
) -> Result<TaskDocument, PollError> {
    if cancel.is_cancelled() {
        return Err(PollError::Cancelled);
    }

    let mut attempt = 0u32;
    while attempt < options.max_attempts {
        attempt += 1;

        let document = api.fetch(task_id).await?;
        match document.state() {
            TaskState::Finished => {
                tracing::info!(task_id, attempt, "Task finished");
                return Ok(document);
            }
            TaskState::Failed => {
                let message = document.error_message();
                tracing::warn!(task_id, attempt, message = %message, "Task failed");
                return Err(PollError::JobFailed { message });
            }
            TaskState::Running(label) => {
                tracing::debug!(task_id, attempt, status = %label, "Task still running");
            }
        }

        // Wait before the next attempt, respecting cancellation. No
        // wait after the final attempt; the verdict is already in.
        if attempt < options.max_attempts {
            tokio::select! {
                _ = cancel.cancelled() => return Err(PollError::Cancelled),
                _ = tokio::time::sleep(options.interval) => {}
            }
        }
    }

    Err(PollError::Timeout {
        attempts: options.max_attempts,
    })
}
