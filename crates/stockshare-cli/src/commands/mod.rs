//! CLI command definitions and dispatch.

pub mod migrate;
pub mod serve;
pub mod share;
pub mod user;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use stockshare_api::AppState;
use stockshare_core::config::AppConfig;
use stockshare_core::error::AppError;
use stockshare_core::traits::SystemTimeSource;
use stockshare_database::Stores;

use crate::output::{self, OutputFormat};

/// StockShare: inventory catalogs with expiring public share links
#[derive(Debug, Parser)]
#[command(name = "stockshare", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay to load on top of config/default.toml
    #[arg(short, long, env = "STOCKSHARE_ENV", default_value = "development")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Apply database migrations
    Migrate,
    /// Merchant account management
    User(user::UserArgs),
    /// Share token maintenance
    Share(share::ShareArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate => migrate::execute(&self.config).await,
            Commands::User(args) => user::execute(args, &self.config, self.format).await,
            Commands::Share(args) => share::execute(args, &self.config, self.format).await,
        }
    }
}

/// Load configuration for the selected overlay.
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

/// Open the configured store and wire the services against it.
pub async fn connect(env: &str) -> Result<AppState, AppError> {
    let config = load_config(env)?;
    let stores = Stores::connect(&config.database).await?;
    if stores.pool().is_none() {
        output::print_warning("Using the in-memory store; changes are discarded on exit.");
    }
    Ok(AppState::build(config, stores, Arc::new(SystemTimeSource)))
}
