//! Upload entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use mjstudio_core::types::{DocId, Timestamp};

/// A row from the `uploads` table.
///
/// Serializing one reproduces the legacy listing document exactly:
/// `{"_id": …, "image_path": …}`. `created_at` orders listings and is
/// kept off the wire.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UploadRecord {
    #[serde(rename = "_id")]
    pub id: DocId,
    pub image_path: String,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
}

/// DTO for recording a newly stored upload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUpload {
    /// Path the file was written to, as the caller will read it back.
    pub image_path: String,
}
