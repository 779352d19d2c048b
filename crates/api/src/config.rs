//! Server configuration loaded from environment variables.

use std::time::Duration;

use mjstudio_goapi::client::DEFAULT_BASE_URL;
use mjstudio_goapi::poll::PollOptions;

/// Runtime configuration for the API server.
///
/// All values come from environment variables (a `.env` file is loaded
/// at startup when present):
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `HOST` | `0.0.0.0` | Bind address |
/// | `PORT` | `3000` | Bind port |
/// | `CORS_ORIGINS` | `*` | Comma-separated allowed origins, or `*` for any |
/// | `REQUEST_TIMEOUT_SECS` | `660` | Per-request timeout; must exceed the poll budget (`POLL_INTERVAL_SECS` x `POLL_MAX_ATTEMPTS`) or long jobs are cut off mid-flight |
/// | `SHUTDOWN_TIMEOUT_SECS` | `30` | Grace period for connection draining on shutdown |
/// | `UPLOAD_DIR` | `./uploads` | Directory uploaded images are written to |
/// | `UPLOADS_CACHE_TTL_SECS` | `60` | How long the upload listing may be served from cache |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Reserved for bounding the connection drain; the listener already
    /// stops accepting as soon as the shutdown signal fires.
    #[allow(dead_code)]
    pub shutdown_timeout_secs: u64,
    pub upload_dir: String,
    pub uploads_cache_ttl_secs: u64,
    pub goapi: GoApiConfig,
}

/// Settings for the upstream image-generation API.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `GOAPI_BASE_URL` | production endpoint | Base URL of the remote API |
/// | `GOAPI_KEY` | empty | API key sent as `X-API-KEY` on every call |
/// | `GOAPI_TIMEOUT_SECS` | `30` | Timeout for a single HTTP call to the remote |
/// | `POLL_INTERVAL_SECS` | `10` | Delay between task status fetches |
/// | `POLL_MAX_ATTEMPTS` | `60` | Fetch attempts before a job is declared timed out |
#[derive(Debug, Clone)]
pub struct GoApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
    pub poll_interval_secs: u64,
    pub poll_max_attempts: u32,
}

impl ServerConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// Panics when a numeric variable is set but unparseable; a typo'd
    /// port or timeout should stop the boot, not be silently defaulted.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .expect("PORT must be a number"),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "660".into())
                .parse()
                .expect("REQUEST_TIMEOUT_SECS must be a number"),
            shutdown_timeout_secs: std::env::var("SHUTDOWN_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .expect("SHUTDOWN_TIMEOUT_SECS must be a number"),
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".into()),
            uploads_cache_ttl_secs: std::env::var("UPLOADS_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "60".into())
                .parse()
                .expect("UPLOADS_CACHE_TTL_SECS must be a number"),
            goapi: GoApiConfig::from_env(),
        }
    }

    pub fn uploads_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.uploads_cache_ttl_secs)
    }
}

impl GoApiConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("GOAPI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            api_key: std::env::var("GOAPI_KEY").unwrap_or_default(),
            timeout_secs: std::env::var("GOAPI_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .expect("GOAPI_TIMEOUT_SECS must be a number"),
            poll_interval_secs: std::env::var("POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .expect("POLL_INTERVAL_SECS must be a number"),
            poll_max_attempts: std::env::var("POLL_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "60".into())
                .parse()
                .expect("POLL_MAX_ATTEMPTS must be a number"),
        }
    }

    /// Polling schedule derived from the interval and attempt settings.
    pub fn poll_options(&self) -> PollOptions {
        PollOptions {
            interval: Duration::from_secs(self.poll_interval_secs),
            max_attempts: self.poll_max_attempts,
        }
    }
}
