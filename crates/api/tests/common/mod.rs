#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::Cursor;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use serde_json::Value;
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use mjstudio_api::cache::TtlCache;
use mjstudio_api::config::{GoApiConfig, ServerConfig};
use mjstudio_api::router::build_app_router;
use mjstudio_api::state::AppState;
use mjstudio_core::job::JobRequest;
use mjstudio_goapi::api::TaskApi;
use mjstudio_goapi::client::GoApiError;
use mjstudio_goapi::poll::PollOptions;
use mjstudio_goapi::task::TaskDocument;
use mjstudio_matting::chroma::ChromaMatte;
use mjstudio_pipeline::runner::JobRunner;
use mjstudio_pipeline::store::SqliteImageStore;

// ---------------------------------------------------------------------------
// Scripted remote API
// ---------------------------------------------------------------------------

pub enum SubmitOutcome {
    Accept(String),
    Reject { status: String, detail: String },
}

/// Test double for the remote job API: records every submission and
/// serves fetch responses from a fixed script.
pub struct ScriptedApi {
    outcome: SubmitOutcome,
    fetch_script: Mutex<VecDeque<Value>>,
    pub submitted: Mutex<Vec<JobRequest>>,
}

impl ScriptedApi {
    pub fn accepting(task_id: &str, responses: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            outcome: SubmitOutcome::Accept(task_id.to_string()),
            fetch_script: Mutex::new(responses.into()),
            submitted: Mutex::new(Vec::new()),
        })
    }

    pub fn rejecting(status: &str, detail: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: SubmitOutcome::Reject {
                status: status.to_string(),
                detail: detail.to_string(),
            },
            fetch_script: Mutex::new(VecDeque::new()),
            submitted: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TaskApi for ScriptedApi {
    async fn submit_job(&self, request: &JobRequest) -> Result<String, GoApiError> {
        self.submitted.lock().unwrap().push(request.clone());
        match &self.outcome {
            SubmitOutcome::Accept(task_id) => Ok(task_id.clone()),
            SubmitOutcome::Reject { status, detail } => Err(GoApiError::Rejected {
                status: status.clone(),
                detail: detail.clone(),
            }),
        }
    }

    async fn fetch(&self, _task_id: &str) -> Result<TaskDocument, GoApiError> {
        let body = self
            .fetch_script
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected extra fetch");
        Ok(TaskDocument::from_value(body).expect("scripted body has a status"))
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults: wildcard CORS (the
/// production default) and a short request timeout.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        upload_dir: upload_dir.to_string_lossy().into_owned(),
        uploads_cache_ttl_secs: 60,
        goapi: GoApiConfig {
            // Never dialled; tests inject a scripted TaskApi instead.
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: "test-key".to_string(),
            timeout_secs: 5,
            poll_interval_secs: 1,
            poll_max_attempts: 3,
        },
    }
}

/// Polling schedule that keeps scripted jobs fast: three attempts a
/// millisecond apart.
pub fn fast_poll() -> PollOptions {
    PollOptions {
        interval: Duration::from_millis(1),
        max_attempts: 3,
    }
}

/// Build the full application router around a scripted remote API.
///
/// Mirrors the construction in `main.rs` via [`build_app_router`], so
/// tests exercise the same middleware stack production uses.
pub fn build_test_app_with(pool: SqlitePool, api: Arc<dyn TaskApi>, upload_dir: &Path) -> Router {
    let config = test_config(upload_dir);

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        runner: Arc::new(JobRunner::new(
            api,
            Arc::new(SqliteImageStore::new(pool)),
            fast_poll(),
        )),
        remover: Arc::new(ChromaMatte::default()),
        http: reqwest::Client::new(),
        uploads_cache: Arc::new(TtlCache::new(Duration::from_secs(60))),
        shutdown: CancellationToken::new(),
    };

    build_app_router(state, &config)
}

/// Build a test app for routes that never reach the remote API.
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_test_app_with(
        pool,
        ScriptedApi::accepting("unused", Vec::new()),
        Path::new("./uploads"),
    )
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub const MULTIPART_BOUNDARY: &str = "mjstudio-test-boundary";

/// Encode a single-field multipart body carrying one file.
pub fn multipart_file(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: Router, uri: &str, body: Vec<u8>) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_bytes(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = body_bytes(response).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// An 8x8 PNG: red 4x4 centre on a white border, sized so the default
/// matting settings read the border as background.
pub fn sample_png() -> Vec<u8> {
    let image = RgbaImage::from_fn(8, 8, |x, y| {
        if (2..6).contains(&x) && (2..6).contains(&y) {
            Rgba([200, 30, 30, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    });

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}
