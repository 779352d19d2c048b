//! Generated image entity model.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use mjstudio_core::types::{DocId, Timestamp};

/// A row from the `generated_images` table.
///
/// `document` is the terminal task document exactly as the remote API
/// returned it, except that the row id has been embedded under `_id`
/// at insert time. Listings return the documents, not the rows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GeneratedImage {
    pub id: DocId,
    pub document: Json<serde_json::Value>,
    pub created_at: Timestamp,
}
