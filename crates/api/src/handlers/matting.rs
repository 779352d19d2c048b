//! Background removal endpoint.

use std::io::Cursor;

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Json;
use image::{DynamicImage, ImageFormat};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RemoveBackgroundRequest {
    pub image_url: String,
}

/// `POST /remove-background` -- strip the background from an image and
/// return the cut-out as PNG.
///
/// The source image comes either from a multipart `file` field or, for
/// non-multipart requests, from a JSON body naming an `image_url` to
/// download. Undecodable and missing input is the caller's fault: 400.
pub async fn remove_background(
    State(state): State<AppState>,
    request: Request,
) -> AppResult<Response> {
    let bytes = source_bytes(&state, request).await?;

    let image = image::load_from_memory(&bytes)
        .map_err(|e| AppError::BadRequest(format!("Could not decode image: {e}")))?;

    // Matting walks every pixel; keep it off the async workers.
    let remover = state.remover.clone();
    let png = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, AppError> {
        let matted = remover
            .remove(&image)
            .map_err(|e| AppError::BadRequest(format!("Could not process image: {e}")))?;

        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(matted)
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| AppError::InternalError(format!("Failed to encode PNG: {e}")))?;
        Ok(buffer.into_inner())
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Background removal task failed: {e}")))??;

    Ok(([(CONTENT_TYPE, "image/png")], png).into_response())
}

/// Pull the raw image bytes out of the request, whichever way the
/// caller chose to send them.
async fn source_bytes(state: &AppState, request: Request) -> AppResult<Bytes> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    if is_multipart {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart data: {e}")))?;

        let mut file: Option<Bytes> = None;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart data: {e}")))?
        {
            if field.name() == Some("file") {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {e}")))?;
                file = Some(bytes);
            }
        }

        return file.ok_or_else(|| AppError::BadRequest("No file part".to_string()));
    }

    let Json(payload) = Json::<RemoveBackgroundRequest>::from_request(request, &())
        .await
        .map_err(|e| AppError::BadRequest(format!("Expected a file upload or an image_url: {e}")))?;

    let response = state
        .http
        .get(&payload.image_url)
        .send()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to fetch image_url: {e}")))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to fetch image_url: {e}")))?;

    Ok(bytes)
}
