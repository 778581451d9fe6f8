use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use palmares_ai::{ScraperClient, TextGenClient};
use palmares_api::cache::ContestCache;
use palmares_api::config::ServerConfig;
use palmares_api::router::build_app_router;
use palmares_api::state::AppState;
use palmares_store::{FsBlobStore, LocalStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "palmares_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database (the authenticated path) ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = palmares_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    palmares_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    palmares_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Local stores (the unauthenticated path + blob bytes) ---
    let local = LocalStore::open(&config.local_store_dir).expect("Failed to open local store");
    tracing::info!(dir = %config.local_store_dir, "Local store opened");

    let blobs = FsBlobStore::open(&config.blob_dir, config.blob_public_base.clone())
        .expect("Failed to open blob store");
    tracing::info!(dir = %config.blob_dir, "Blob store opened");

    // --- AI collaborators ---
    let genai = TextGenClient::new(config.genai.api_url.clone(), config.genai.api_key.clone());
    let scraper = ScraperClient::new(
        config.scraper.api_url.clone(),
        config.scraper.api_key.clone(),
    );
    tracing::info!(
        genai_configured = genai.is_configured(),
        scraper_configured = scraper.is_configured(),
        "AI collaborator clients created"
    );

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        local: Arc::new(local),
        blobs: Arc::new(blobs),
        genai: Arc::new(genai),
        scraper: Arc::new(scraper),
        contest_cache: Arc::new(ContestCache::new()),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
