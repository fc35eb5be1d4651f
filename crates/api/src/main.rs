use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_api::config::ServerConfig;
use catalog_api::router::build_app_router;
use catalog_api::state::AppState;
use catalog_events::{AuditLogger, EventBus, PgAuditSink, TracingSink};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = match &config.database_url {
        Some(database_url) => {
            let pool = catalog_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            catalog_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");
            Some(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory stores");
            None
        }
    };

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::new(config.audit_bus_capacity));
    tracing::info!(capacity = config.audit_bus_capacity, "Event bus created");

    // Spawn audit loggers (structured log always, `logs` table when a database is configured).
    let mut logger_handles = vec![tokio::spawn(AuditLogger::run(
        TracingSink,
        event_bus.subscribe(),
    ))];
    if let Some(pool) = &pool {
        logger_handles.push(tokio::spawn(AuditLogger::run(
            PgAuditSink::new(pool.clone()),
            event_bus.subscribe(),
        )));
    }
    tracing::info!(count = logger_handles.len(), "Audit loggers started");

    // --- App state ---
    let config = Arc::new(config);
    let state = match pool {
        Some(pool) => AppState::postgres(Arc::clone(&config), Arc::clone(&event_bus), pool),
        None => AppState::in_memory(Arc::clone(&config), Arc::clone(&event_bus)),
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

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Dropping the last sender closes the channel; loggers drain and exit.
    drop(event_bus);
    let timeout = Duration::from_secs(config.shutdown_timeout_secs);
    for handle in logger_handles {
        if tokio::time::timeout(timeout, handle).await.is_err() {
            tracing::warn!("Audit logger did not finish within the shutdown timeout");
        }
    }
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
