//! Start the StockShare server.

use clap::Args;

use stockshare_core::error::AppError;
use stockshare_database::{Stores, migration};

use crate::output;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Skip migrations even when `database.run_migrations` is set
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, env: &str) -> Result<(), AppError> {
    let mut config = super::load_config(env)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }

    println!("Starting StockShare server...");
    output::print_kv("Environment", env);
    output::print_kv("Address", &config.server.bind_address());
    output::print_kv("Store", &format!("{:?}", config.database.provider).to_lowercase());

    if config.auth.uses_placeholder_secret() {
        output::print_warning("auth.jwt_secret is not set; sessions are signed with a placeholder.");
    }

    let stores = Stores::connect(&config.database).await?;

    if let Some(pool) = stores.pool() {
        if config.database.run_migrations && !args.no_migrate {
            println!("Running database migrations...");
            migration::run_migrations(pool.pool()).await?;
        }
    }

    stockshare_api::run_server(config, stores).await
}
