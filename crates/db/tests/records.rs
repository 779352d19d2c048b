//! Integration tests for the upload and generated-image repositories.
//!
//! Exercises the repository layer against a real database:
//! - Pool bootstrap and health check
//! - Upload insert, id generation, and listing order
//! - Document insert with `_id` embedding
//! - Legacy wire shapes of the serialized rows

use serde_json::json;
use sqlx::SqlitePool;

use mjstudio_db::models::upload::CreateUpload;
use mjstudio_db::repositories::{GeneratedImageRepo, UploadRepo};

#[sqlx::test(migrations = "./migrations")]
async fn bootstrap_creates_both_tables(pool: SqlitePool) {
    mjstudio_db::health_check(&pool).await.unwrap();

    for table in ["uploads", "generated_images"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn upload_rows_get_distinct_ids(pool: SqlitePool) {
    let first = UploadRepo::create(
        &pool,
        &CreateUpload {
            image_path: "./uploads/photo.png".to_string(),
        },
    )
    .await
    .unwrap();
    let second = UploadRepo::create(
        &pool,
        &CreateUpload {
            image_path: "./uploads/photo.png".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(!first.id.is_empty());
    assert_ne!(first.id, second.id, "same path must still be two rows");

    let all = UploadRepo::list_all(&pool).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first.id, "listing is oldest first");
    assert_eq!(all[1].id, second.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn upload_serializes_to_legacy_document(pool: SqlitePool) {
    let record = UploadRepo::create(
        &pool,
        &CreateUpload {
            image_path: "./uploads/shot.jpeg".to_string(),
        },
    )
    .await
    .unwrap();

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["_id"], json!(record.id));
    assert_eq!(value["image_path"], json!("./uploads/shot.jpeg"));
    assert_eq!(
        value.as_object().unwrap().len(),
        2,
        "only _id and image_path go on the wire"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn document_gets_embedded_id(pool: SqlitePool) {
    let document = json!({
        "task_id": "remote-123",
        "status": "finished",
        "task_result": {"image_url": "https://cdn.example/img.png"},
    });

    let row = GeneratedImageRepo::create(&pool, &document).await.unwrap();

    assert_eq!(row.document.0["_id"], json!(row.id));
    assert_eq!(row.document.0["task_id"], json!("remote-123"));
    assert_eq!(
        row.document.0["task_result"]["image_url"],
        json!("https://cdn.example/img.png")
    );

    // Caller's document is untouched.
    assert!(document.get("_id").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn non_object_document_is_stored_verbatim(pool: SqlitePool) {
    let row = GeneratedImageRepo::create(&pool, &json!("not an object"))
        .await
        .unwrap();
    assert_eq!(row.document.0, json!("not an object"));
}

#[sqlx::test(migrations = "./migrations")]
async fn documents_list_oldest_first(pool: SqlitePool) {
    let first = GeneratedImageRepo::create(&pool, &json!({"task_id": "a"}))
        .await
        .unwrap();
    let second = GeneratedImageRepo::create(&pool, &json!({"task_id": "b"}))
        .await
        .unwrap();

    let all = GeneratedImageRepo::list_all(&pool).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[1].id, second.id);
}
