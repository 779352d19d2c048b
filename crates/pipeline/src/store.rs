//! Result persistence seam.

use async_trait::async_trait;
use serde_json::Value;

use mjstudio_core::types::DocId;
use mjstudio_db::repositories::GeneratedImageRepo;
use mjstudio_db::DbPool;

use crate::error::StoreError;

/// Where terminal job documents go.
///
/// One call per successful job; implementations generate the storage
/// id and must leave the caller's document untouched.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Persist `document`, returning the generated storage id.
    async fn save(&self, document: &Value) -> Result<DocId, StoreError>;
}

/// Production store writing to the `generated_images` table.
pub struct SqliteImageStore {
    pool: DbPool,
}

impl SqliteImageStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultStore for SqliteImageStore {
    async fn save(&self, document: &Value) -> Result<DocId, StoreError> {
        let row = GeneratedImageRepo::create(&self.pool, document).await?;
        tracing::info!(id = %row.id, "Job result persisted");
        Ok(row.id)
    }
}
