//! Image generation job endpoints.
//!
//! Each job endpoint runs the full pipeline synchronously within the
//! request: submit to the remote API, poll to a terminal state, persist
//! the final task document, and return it. Responses are the raw task
//! documents the original service exposed, not an envelope.

use axum::extract::State;
use axum::Json;
use mjstudio_core::job::JobRequest;
use mjstudio_db::repositories::GeneratedImageRepo;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpscaleRequest {
    pub origin_task_id: Option<String>,
    pub index: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InpaintRequest {
    pub origin_task_id: Option<String>,
    pub prompt: Option<String>,
    pub mask: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OutpaintRequest {
    pub origin_task_id: Option<String>,
    pub zoom_ratio: Option<String>,
    pub aspect_ratio: Option<String>,
    pub prompt: Option<String>,
}

/// `POST /generate-image` -- generate images from a text prompt.
pub async fn generate_image(
    State(state): State<AppState>,
    Json(payload): Json<GenerateImageRequest>,
) -> AppResult<Json<Value>> {
    let request = JobRequest::generate(payload.text.unwrap_or_default());
    run_job(&state, request).await
}

/// `POST /upscale` -- upscale one image from an earlier task.
pub async fn upscale(
    State(state): State<AppState>,
    Json(payload): Json<UpscaleRequest>,
) -> AppResult<Json<Value>> {
    let request = JobRequest::upscale(payload.origin_task_id.unwrap_or_default(), payload.index);
    run_job(&state, request).await
}

/// `POST /inpaint` -- regenerate the masked region of an earlier task.
pub async fn inpaint(
    State(state): State<AppState>,
    Json(payload): Json<InpaintRequest>,
) -> AppResult<Json<Value>> {
    let request = JobRequest::inpaint(
        payload.origin_task_id.unwrap_or_default(),
        payload.prompt.unwrap_or_default(),
        payload.mask.unwrap_or_default(),
    );
    run_job(&state, request).await
}

/// `POST /outpaint` -- extend an earlier task's image beyond its borders.
pub async fn outpaint(
    State(state): State<AppState>,
    Json(payload): Json<OutpaintRequest>,
) -> AppResult<Json<Value>> {
    let request = JobRequest::outpaint(
        payload.origin_task_id.unwrap_or_default(),
        payload.zoom_ratio,
        payload.aspect_ratio,
        payload.prompt,
    );
    run_job(&state, request).await
}

/// `GET /get-images` -- list every persisted generation result, oldest
/// first, as the raw stored documents.
pub async fn get_images(State(state): State<AppState>) -> AppResult<Json<Vec<Value>>> {
    let rows = GeneratedImageRepo::list_all(&state.pool).await?;
    let documents = rows.into_iter().map(|row| row.document.0).collect();

    Ok(Json(documents))
}

/// Run a job to completion under the process shutdown token, so an
/// exiting server aborts the poll loop instead of holding the drain open.
async fn run_job(state: &AppState, request: JobRequest) -> AppResult<Json<Value>> {
    let cancel = state.shutdown.child_token();
    let document = state.runner.execute(request, &cancel).await?;

    Ok(Json(document))
}
