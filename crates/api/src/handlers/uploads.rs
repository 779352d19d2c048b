//! Upload endpoints.
//!
//! `/upload-image` keeps the original service's plain-text contract:
//! rejected uploads are plain 400 bodies (`No file part`,
//! `No selected file`, `Unsupported file type`) and success is a plain
//! `File uploaded successfully`, not the JSON envelope the rest of the
//! API uses.

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mjstudio_core::upload;
use mjstudio_db::models::{CreateUpload, UploadRecord};
use mjstudio_db::repositories::UploadRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const MSG_UPLOADED: &str = "File uploaded successfully";
const MSG_NO_FILE_PART: &str = "No file part";
const MSG_NO_SELECTED_FILE: &str = "No selected file";
const MSG_UNSUPPORTED_FILE_TYPE: &str = "Unsupported file type";

/// `POST /upload-image` -- write a multipart image upload to the upload
/// directory and record its path.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart data: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read file: {e}")))?;
            file = Some((filename, bytes));
        }
        // Unknown fields are ignored.
    }

    let Some((filename, bytes)) = file else {
        return Ok(reject(MSG_NO_FILE_PART));
    };
    if filename.is_empty() {
        return Ok(reject(MSG_NO_SELECTED_FILE));
    }
    if !upload::is_allowed(&filename) {
        return Ok(reject(MSG_UNSUPPORTED_FILE_TYPE));
    }

    // The sanitized name is never empty once the extension check passed,
    // but a garbage name degrades to the same rejection rather than a
    // panic if that ever changes.
    let safe_name = upload::sanitize_filename(&filename);
    if safe_name.is_empty() {
        return Ok(reject(MSG_NO_SELECTED_FILE));
    }

    let dir = std::path::Path::new(&state.config.upload_dir);
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload directory: {e}")))?;

    let path = dir.join(&safe_name);
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to write upload: {e}")))?;

    let record = UploadRepo::create(
        &state.pool,
        &CreateUpload {
            image_path: path.to_string_lossy().into_owned(),
        },
    )
    .await?;

    // The listing cache now lies; drop it so the next read sees this row.
    state.uploads_cache.invalidate().await;

    tracing::info!(id = %record.id, path = %record.image_path, "Stored upload");

    Ok((StatusCode::OK, MSG_UPLOADED).into_response())
}

fn reject(message: &'static str) -> Response {
    (StatusCode::BAD_REQUEST, message).into_response()
}

/// `GET /get-uploads` -- list upload records oldest first, served from a
/// short-lived cache to spare the database on hot reads.
pub async fn get_uploads(State(state): State<AppState>) -> AppResult<Json<Vec<UploadRecord>>> {
    if let Some(records) = state.uploads_cache.get().await {
        return Ok(Json(records));
    }

    let records = UploadRepo::list_all(&state.pool).await?;
    state.uploads_cache.put(records.clone()).await;

    Ok(Json(records))
}
