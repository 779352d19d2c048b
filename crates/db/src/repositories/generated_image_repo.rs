//! Repository for the `generated_images` table.

use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::generated_image::GeneratedImage;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, document, created_at";

/// Provides insert and list operations for generated image documents.
pub struct GeneratedImageRepo;

impl GeneratedImageRepo {
    /// Persist a terminal task document, returning the created row.
    ///
    /// A fresh UUID v4 becomes both the row id and, when the document
    /// is a JSON object, its embedded `_id` member. The caller's value
    /// is never mutated.
    pub async fn create(
        pool: &DbPool,
        document: &serde_json::Value,
    ) -> Result<GeneratedImage, sqlx::Error> {
        let id = Uuid::new_v4().to_string();

        let mut stored = document.clone();
        if let Some(object) = stored.as_object_mut() {
            object.insert("_id".to_string(), serde_json::Value::String(id.clone()));
        }

        let query = format!(
            "INSERT INTO generated_images (id, document, created_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GeneratedImage>(&query)
            .bind(&id)
            .bind(Json(&stored))
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// List every stored document row, oldest first.
    pub async fn list_all(pool: &DbPool) -> Result<Vec<GeneratedImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generated_images ORDER BY created_at ASC");
        sqlx::query_as::<_, GeneratedImage>(&query)
            .fetch_all(pool)
            .await
    }
}
