//! Task status documents and their classification.
//!
//! Every fetch of a submitted task returns a JSON document carrying a
//! `status` label. Only two labels are terminal; everything else
//! (queued, processing, staged, retry, ...) means the task is still in
//! flight and the vocabulary is owned by the remote service.

use serde_json::Value;

/// Status label marking terminal success.
pub const STATUS_FINISHED: &str = "finished";

/// Status label marking terminal failure.
pub const STATUS_FAILED: &str = "failed";

/// Fallback detail when a failed response names no reason.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Tri-state classification of a task status label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    /// Terminal success; the document is the final result.
    Finished,
    /// Terminal failure; the task will never finish.
    Failed,
    /// Any non-terminal label, preserved for logging.
    Running(String),
}

impl TaskState {
    /// Classify a raw status label.
    pub fn classify(status: &str) -> TaskState {
        match status {
            STATUS_FINISHED => TaskState::Finished,
            STATUS_FAILED => TaskState::Failed,
            other => TaskState::Running(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Finished | TaskState::Failed)
    }
}

/// One fetched task document: the raw JSON body plus its extracted
/// status label.
#[derive(Debug, Clone)]
pub struct TaskDocument {
    body: Value,
    status: String,
}

impl TaskDocument {
    /// Wrap a fetched JSON body. Returns `None` when the body carries
    /// no string `status` field and therefore cannot be classified.
    pub fn from_value(body: Value) -> Option<TaskDocument> {
        let status = body.get("status")?.as_str()?.to_string();
        Some(TaskDocument { body, status })
    }

    /// The raw status label as the remote reported it.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn state(&self) -> TaskState {
        TaskState::classify(&self.status)
    }

    /// Remote-supplied failure detail, following the service's
    /// convention: `error`, else `message`, else [`UNKNOWN_ERROR`].
    pub fn error_message(&self) -> String {
        error_detail(&self.body)
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Consume the document, yielding the raw JSON body.
    pub fn into_body(self) -> Value {
        self.body
    }
}

/// Extract the error detail from a response body: the string under
/// `error`, else under `message`, else [`UNKNOWN_ERROR`].
pub fn error_detail(body: &Value) -> String {
    body.get("error")
        .and_then(Value::as_str)
        .or_else(|| body.get("message").and_then(Value::as_str))
        .unwrap_or(UNKNOWN_ERROR)
        .to_string()
}
