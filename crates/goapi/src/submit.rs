//! Submission endpoints and payload builders.
//!
//! Maps each [`JobRequest`] variant onto the remote endpoint it posts
//! to and the exact JSON body that endpoint expects. Field names are
//! part of the remote contract; change nothing here without checking
//! the service docs.

use serde_json::{json, Value};

use mjstudio_core::job::JobRequest;

/// Processing mode sent with every generation submission.
pub const PROCESS_MODE: &str = "fast";

/// The remote API's HTTP endpoints, relative to the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Imagine,
    Upscale,
    Inpaint,
    Outpaint,
    Fetch,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Imagine => "imagine",
            Endpoint::Upscale => "upscale",
            Endpoint::Inpaint => "inpaint",
            Endpoint::Outpaint => "outpaint",
            Endpoint::Fetch => "fetch",
        }
    }
}

/// Build the submission endpoint and JSON payload for a job request.
pub fn submission(request: &JobRequest) -> (Endpoint, Value) {
    match request {
        JobRequest::Generate { prompt } => (
            Endpoint::Imagine,
            json!({
                "prompt": prompt,
                "process_mode": PROCESS_MODE,
            }),
        ),
        JobRequest::Upscale {
            origin_task_id,
            index,
        } => (
            Endpoint::Upscale,
            json!({
                "origin_task_id": origin_task_id,
                "index": index,
            }),
        ),
        JobRequest::Inpaint {
            origin_task_id,
            prompt,
            mask,
        } => (
            Endpoint::Inpaint,
            json!({
                "origin_task_id": origin_task_id,
                "prompt": prompt,
                "mask": mask,
            }),
        ),
        JobRequest::Outpaint {
            origin_task_id,
            zoom_ratio,
            aspect_ratio,
            prompt,
        } => (
            Endpoint::Outpaint,
            json!({
                "origin_task_id": origin_task_id,
                "zoom_ratio": zoom_ratio,
                "aspect_ratio": aspect_ratio,
                "prompt": prompt,
            }),
        ),
    }
}
