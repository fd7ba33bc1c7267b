//! StockShare Server: inventory catalogs with expiring public share links.
//!
//! Main entry point that loads configuration, opens the store, and starts
//! the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use stockshare_core::config::{AppConfig, LogFormat};
use stockshare_core::error::AppError;
use stockshare_database::Stores;
use stockshare_database::migration::run_migrations;

#[tokio::main]
async fn main() {
    let env = std::env::var("STOCKSHARE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_current_span(false)
                .init();
        }
        LogFormat::Pretty => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting StockShare v{}", env!("CARGO_PKG_VERSION"));

    if config.auth.uses_placeholder_secret() {
        tracing::warn!(
            "auth.jwt_secret is unset or a placeholder; set STOCKSHARE__AUTH__JWT_SECRET before deploying"
        );
    }

    // ── Step 1: Open the store ───────────────────────────────────
    let stores = Stores::connect(&config.database).await?;

    // ── Step 2: Migrations ───────────────────────────────────────
    if let Some(pool) = stores.pool() {
        if config.database.run_migrations {
            run_migrations(pool.pool()).await?;
        } else {
            tracing::info!("Skipping migrations (database.run_migrations = false)");
        }
    }

    // ── Step 3: Serve ────────────────────────────────────────────
    stockshare_api::run_server(config, stores).await
}
