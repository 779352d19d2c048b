//! API error types and their HTTP response mapping.
//!
//! Every error renders as a JSON envelope `{ "error": <message>,
//! "code": <machine code> }`. Internal details (database failures,
//! persistence errors) are logged and replaced with a generic message
//! before they reach the wire.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mjstudio_pipeline::error::JobError;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by API handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Job(#[from] JobError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Job(err) => classify_job_error(err),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", message.clone())
            }
            AppError::InternalError(message) => {
                tracing::error!("Internal error: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message, "code": code }));
        (status, body).into_response()
    }
}

/// Map a job pipeline error onto a status and stable error code.
///
/// Caller mistakes (bad input, submissions the remote refuses) are 400s;
/// upstream failures are gateway errors so clients can tell them apart
/// from anything this service did wrong.
fn classify_job_error(err: &JobError) -> (StatusCode, &'static str, String) {
    match err {
        JobError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", err.to_string()),
        JobError::SubmissionFailed(_) => {
            (StatusCode::BAD_REQUEST, "SUBMISSION_FAILED", err.to_string())
        }
        JobError::Transport(_) => (StatusCode::BAD_GATEWAY, "TRANSPORT_ERROR", err.to_string()),
        JobError::MalformedResponse(_) => {
            (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE", err.to_string())
        }
        JobError::RemoteJobFailed(_) => {
            (StatusCode::BAD_GATEWAY, "REMOTE_JOB_FAILED", err.to_string())
        }
        JobError::PollTimeout { .. } => {
            (StatusCode::GATEWAY_TIMEOUT, "POLL_TIMEOUT", err.to_string())
        }
        JobError::Cancelled => (StatusCode::SERVICE_UNAVAILABLE, "CANCELLED", err.to_string()),
        JobError::Store(source) => {
            tracing::error!("Failed to persist job result: {source}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if matches!(err, sqlx::Error::RowNotFound) {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Record not found".to_string(),
        );
    }
    tracing::error!("Database error: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "DATABASE_ERROR",
        "A database error occurred".to_string(),
    )
}
