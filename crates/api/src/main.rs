use std::net::SocketAddr;
use std::sync::Arc;

use breaktime_api::config::ServerConfig;
use breaktime_api::router::build_app_router;
use breaktime_api::state::AppState;
use breaktime_db::{BreakStore, SeedOutcome};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "breaktime_api=debug,breaktime_db=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        database = %config.database_path.display(),
        auth_enabled = config.admin.is_some(),
        "Loaded server configuration",
    );

    // --- Database ---
    let pool = breaktime_db::create_pool(&config.database_path)
        .await
        .expect("Failed to open database");
    tracing::info!("Database connection pool created");

    breaktime_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    let store = BreakStore::open(pool.clone());
    store
        .initialize()
        .await
        .expect("Failed to initialize break store");
    tracing::info!("Database migrations applied");

    // --- Seed ---
    match store.seed_from_source(&config.seed_path).await {
        Ok(SeedOutcome::Seeded(report)) => tracing::info!(
            inserted = report.inserted,
            skipped = report.skipped,
            "Bootstrap file imported",
        ),
        Ok(SeedOutcome::AlreadySeeded) => {
            tracing::info!("Breaks already present, bootstrap file ignored");
        }
        Ok(SeedOutcome::SourceMissing) => {
            tracing::info!(path = %config.seed_path.display(), "No bootstrap file found");
        }
        Err(e) => {
            tracing::error!(error = %e, "Bootstrap import failed, continuing with existing data");
        }
    }

    // --- App state ---
    let state = AppState {
        pool: pool.clone(),
        store,
        config: Arc::new(config.clone()),
    };

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

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, closing database");
    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
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
