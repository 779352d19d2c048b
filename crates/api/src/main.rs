//! API server binary.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mjstudio_api::cache::TtlCache;
use mjstudio_api::config::ServerConfig;
use mjstudio_api::router::build_app_router;
use mjstudio_api::state::AppState;
use mjstudio_goapi::client::GoApiClient;
use mjstudio_matting::chroma::ChromaMatte;
use mjstudio_pipeline::runner::JobRunner;
use mjstudio_pipeline::store::SqliteImageStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mjstudio_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = config.port, "Loaded server configuration");

    if config.goapi.api_key.is_empty() {
        tracing::warn!("GOAPI_KEY is not set; remote submissions will be rejected");
    }

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = mjstudio_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    mjstudio_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    mjstudio_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let shutdown = CancellationToken::new();

    // One connection pool serves both the remote job API and
    // caller-supplied image URL fetches.
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.goapi.timeout_secs))
        .build()
        .expect("Failed to build HTTP client");

    let goapi = GoApiClient::with_client(
        http.clone(),
        config.goapi.base_url.clone(),
        config.goapi.api_key.clone(),
    );
    let store = SqliteImageStore::new(pool.clone());
    let runner = Arc::new(JobRunner::new(
        Arc::new(goapi),
        Arc::new(store),
        config.goapi.poll_options(),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        runner,
        remover: Arc::new(ChromaMatte::default()),
        http,
        uploads_cache: Arc::new(TtlCache::new(config.uploads_cache_ttl())),
        shutdown: shutdown.clone(),
    };

    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let listener = TcpListener::bind(addr).await.expect("Failed to bind address");
    tracing::info!("Server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // Abort in-flight poll loops; otherwise the connection
            // drain waits out the rest of each poll budget.
            shutdown.cancel();
        })
        .await
        .expect("Server error");

    tracing::info!("Server shut down cleanly");
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
