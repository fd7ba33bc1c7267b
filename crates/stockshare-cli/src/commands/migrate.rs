//! Database migration command.

use stockshare_core::config::StoreProvider;
use stockshare_core::error::AppError;
use stockshare_database::{DatabasePool, migration};

use crate::output;

/// Apply every pending migration to the configured PostgreSQL database.
pub async fn execute(env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    if config.database.provider == StoreProvider::Memory {
        output::print_warning("The in-memory store has no schema to migrate.");
        return Ok(());
    }

    let pool = DatabasePool::connect(&config.database).await?;

    println!("Running database migrations...");
    let result = migration::run_migrations(pool.pool()).await;
    pool.close().await;
    result?;

    output::print_success("All migrations applied successfully.");
    Ok(())
}
