//! REST client for the rendering service's HTTP endpoints.
//!
//! Wraps the submission endpoints (`imagine`, `upscale`, `inpaint`,
//! `outpaint`) and the task status endpoint (`fetch`) using
//! [`reqwest`]. The service signals acceptance in the JSON body, not
//! the HTTP status line, so parsing inspects the `status` field of
//! every response.

use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::submit::Endpoint;
use crate::task::{error_detail, TaskDocument};

/// Public base URL of the rendering service.
pub const DEFAULT_BASE_URL: &str = "https://api.midjourneyapi.xyz/mj/v2";

/// Header carrying the account's API key on every call.
const API_KEY_HEADER: &str = "X-API-KEY";

/// `status` value a submission response uses to signal acceptance.
const SUBMIT_ACCEPTED: &str = "success";

/// Errors from the rendering service REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GoApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service refused the submission: its `status` field was not
    /// `"success"`.
    #[error("Job submission rejected (status {status}): {detail}")]
    Rejected {
        /// Value of the response's `status` field.
        status: String,
        /// Remote-supplied reason (`error`, else `message`, else a
        /// fixed fallback).
        detail: String,
    },

    /// The response body could not be interpreted.
    #[error("Malformed API response: {0}")]
    Malformed(String),
}

/// HTTP client for one rendering service account.
pub struct GoApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoApiClient {
    /// Create a new client for the given base URL and API key.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling with other outbound calls).
    pub fn with_client(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Submit a job payload to one of the submission endpoints.
    ///
    /// Returns the server-assigned task id on acceptance.
    pub async fn submit(&self, endpoint: Endpoint, payload: &Value) -> Result<String, GoApiError> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, endpoint.path()))
            .header(API_KEY_HEADER, &self.api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        parse_submission(status, &body)
    }

    /// Fetch the current status document for a submitted task.
    pub async fn fetch(&self, task_id: &str) -> Result<TaskDocument, GoApiError> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, Endpoint::Fetch.path()))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&json!({ "task_id": task_id }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        parse_fetch(status, &body)
    }
}

// ---------------------------------------------------------------------------
// Response parsing (pure, unit-testable)
// ---------------------------------------------------------------------------

/// Interpret a submission response body.
///
/// Acceptance requires `status == "success"` and a string `task_id`.
/// Any other `status` is a rejection carrying whatever reason the
/// service supplied.
fn parse_submission(http_status: StatusCode, body: &str) -> Result<String, GoApiError> {
    let value = decode_body(http_status, body)?;

    let status = value
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| GoApiError::Malformed("submission response has no status field".into()))?;

    if status != SUBMIT_ACCEPTED {
        tracing::debug!(%http_status, body, "Job submission rejected");
        return Err(GoApiError::Rejected {
            status: status.to_string(),
            detail: error_detail(&value),
        });
    }

    let task_id = value
        .get("task_id")
        .and_then(Value::as_str)
        .ok_or_else(|| GoApiError::Malformed("accepted submission has no task_id".into()))?;

    Ok(task_id.to_string())
}

/// Interpret a fetch response body as a classified task document.
fn parse_fetch(http_status: StatusCode, body: &str) -> Result<TaskDocument, GoApiError> {
    let value = decode_body(http_status, body)?;
    TaskDocument::from_value(value)
        .ok_or_else(|| GoApiError::Malformed("fetch response has no status field".into()))
}

fn decode_body(http_status: StatusCode, body: &str) -> Result<Value, GoApiError> {
    serde_json::from_str(body).map_err(|e| {
        GoApiError::Malformed(format!("undecodable body (HTTP {http_status}): {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::task::TaskState;

    #[test]
    fn accepted_submission_yields_task_id() {
        let body = r#"{"status": "success", "task_id": "abc-123"}"#;
        let task_id = parse_submission(StatusCode::OK, body).unwrap();
        assert_eq!(task_id, "abc-123");
    }

    #[test]
    fn rejected_submission_carries_remote_reason() {
        let body = r#"{"status": "error", "error": "banned prompt"}"#;
        let err = parse_submission(StatusCode::OK, body).unwrap_err();
        assert_matches!(
            err,
            GoApiError::Rejected { status, detail }
                if status == "error" && detail == "banned prompt"
        );
    }

    #[test]
    fn rejected_submission_falls_back_to_message_field() {
        let body = r#"{"status": "error", "message": "quota exceeded"}"#;
        let err = parse_submission(StatusCode::OK, body).unwrap_err();
        assert_matches!(err, GoApiError::Rejected { detail, .. } if detail == "quota exceeded");
    }

    #[test]
    fn rejected_submission_without_reason_uses_fallback() {
        let body = r#"{"status": "error"}"#;
        let err = parse_submission(StatusCode::OK, body).unwrap_err();
        assert_matches!(err, GoApiError::Rejected { detail, .. } if detail == "Unknown error");
    }

    #[test]
    fn accepted_submission_without_task_id_is_malformed() {
        let body = r#"{"status": "success"}"#;
        let err = parse_submission(StatusCode::OK, body).unwrap_err();
        assert_matches!(err, GoApiError::Malformed(_));
    }

    #[test]
    fn non_json_submission_body_is_malformed() {
        let err = parse_submission(StatusCode::BAD_GATEWAY, "<html>oops</html>").unwrap_err();
        assert_matches!(err, GoApiError::Malformed(msg) if msg.contains("502"));
    }

    #[test]
    fn submission_body_without_status_is_malformed() {
        let err = parse_submission(StatusCode::OK, r#"{"task_id": "abc"}"#).unwrap_err();
        assert_matches!(err, GoApiError::Malformed(_));
    }

    #[test]
    fn fetch_body_classifies_status() {
        let body = r#"{"status": "processing", "task_id": "abc"}"#;
        let doc = parse_fetch(StatusCode::OK, body).unwrap();
        assert_eq!(doc.state(), TaskState::Running("processing".to_string()));
    }

    #[test]
    fn fetch_body_without_status_is_malformed() {
        let err = parse_fetch(StatusCode::OK, r#"{"task_id": "abc"}"#).unwrap_err();
        assert_matches!(err, GoApiError::Malformed(_));
    }
}
