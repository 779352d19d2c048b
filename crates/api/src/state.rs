//! Shared application state.

use std::sync::Arc;

use mjstudio_db::models::UploadRecord;
use mjstudio_db::DbPool;
use mjstudio_matting::remover::BackgroundRemover;
use mjstudio_pipeline::runner::JobRunner;
use tokio_util::sync::CancellationToken;

use crate::cache::TtlCache;
use crate::config::ServerConfig;

/// State shared across all request handlers.
///
/// Cloned per request by axum; every field is either a pool, an `Arc`,
/// or otherwise cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
    /// Runs generation jobs end to end (submit, poll, persist).
    pub runner: Arc<JobRunner>,
    /// Background-removal implementation; handlers run it on the
    /// blocking pool.
    pub remover: Arc<dyn BackgroundRemover>,
    /// Shared HTTP client for fetching caller-supplied image URLs.
    pub http: reqwest::Client,
    /// Cached `/get-uploads` listing, invalidated on upload.
    pub uploads_cache: Arc<TtlCache<Vec<UploadRecord>>>,
    /// Cancelled when the process is shutting down; in-flight polls
    /// observe it and abort instead of holding the drain open.
    pub shutdown: CancellationToken,
}
