//! Application builder: wires router, middleware, and state into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use stockshare_core::config::{AppConfig, CorsConfig};
use stockshare_core::error::AppError;
use stockshare_core::traits::SystemTimeSource;
use stockshare_database::Stores;

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState, cors_config: &CorsConfig) -> Router {
    build_router(state)
        .layer(build_compression_layer())
        .layer(build_cors_layer(cors_config))
        .layer(TraceLayer::new_for_http())
}

/// Runs the StockShare server until Ctrl+C (or SIGTERM on Unix).
pub async fn run_server(config: AppConfig, stores: Stores) -> Result<(), AppError> {
    tracing::info!(
        provider = stores.provider_name(),
        "Starting StockShare server..."
    );

    // ── Step 1: Build services ───────────────────────────────────
    let cors_config = config.server.cors.clone();
    let addr = config.server.bind_address();
    let sweep_interval = config.share.sweep_interval_seconds;
    let state = AppState::build(config, stores.clone(), Arc::new(SystemTimeSource));

    // ── Step 2: Shutdown channel & sweeper ───────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper_handle = if sweep_interval > 0 {
        let maintenance = (*state.share_maintenance).clone();
        Some(tokio::spawn(maintenance.run_sweeper(
            Duration::from_secs(sweep_interval),
            shutdown_rx,
        )))
    } else {
        tracing::info!("Eager share token sweeping disabled; expiry is detected on access");
        None
    };

    // ── Step 3: Build and start HTTP server ──────────────────────
    let app = build_app(state, &cors_config);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("StockShare server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let served = server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")));

    // ── Step 4: Drain background work and release the store ──────
    if let Some(handle) = sweeper_handle {
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "Share token sweeper task ended abnormally");
        }
    }
    stores.close().await;
    tracing::info!("StockShare server stopped");

    served
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
