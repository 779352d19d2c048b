//! Repository for the `uploads` table.

use chrono::Utc;
use uuid::Uuid;

use crate::models::upload::{CreateUpload, UploadRecord};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, image_path, created_at";

/// Provides insert and list operations for uploads.
pub struct UploadRepo;

impl UploadRepo {
    /// Record a stored upload, returning the created row.
    ///
    /// The id is a fresh UUID v4, so two uploads of the same path are
    /// distinct rows.
    pub async fn create(pool: &DbPool, input: &CreateUpload) -> Result<UploadRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO uploads (id, image_path, created_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UploadRecord>(&query)
            .bind(Uuid::new_v4().to_string())
            .bind(&input.image_path)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// List every upload, oldest first.
    pub async fn list_all(pool: &DbPool) -> Result<Vec<UploadRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM uploads ORDER BY created_at ASC");
        sqlx::query_as::<_, UploadRecord>(&query)
            .fetch_all(pool)
            .await
    }
}
