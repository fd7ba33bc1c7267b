//! Share token maintenance commands.

use chrono::{Duration, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use stockshare_api::AppState;
use stockshare_core::error::AppError;
use stockshare_entity::share::ShareToken;

use crate::output::{self, OutputFormat};

/// Arguments for share commands
#[derive(Debug, Args)]
pub struct ShareArgs {
    #[command(subcommand)]
    pub command: ShareCommand,
}

/// Share subcommands
#[derive(Debug, Subcommand)]
pub enum ShareCommand {
    /// Deactivate every expired token that is still flagged active
    Sweep,
    /// Delete inactive tokens that expired more than N days ago
    Purge {
        /// Age threshold in days
        #[arg(long, default_value_t = 30)]
        older_than_days: u32,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// List every token issued to a merchant, newest first
    List {
        /// Merchant login email
        #[arg(long)]
        email: String,
    },
}

/// Share token display row. The token itself is abbreviated.
#[derive(Debug, Serialize, Tabled)]
pub struct ShareRow {
    pub token: String,
    pub active: bool,
    pub created_at: String,
    pub expires_at: String,
}

impl From<&ShareToken> for ShareRow {
    fn from(token: &ShareToken) -> Self {
        let prefix: String = token.token.chars().take(8).collect();
        Self {
            token: format!("{prefix}…"),
            active: token.is_active,
            created_at: token.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            expires_at: token.expires_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Execute share commands
pub async fn execute(args: &ShareArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let state = super::connect(env).await?;
    let result = run(&state, &args.command, format).await;
    state.stores.close().await;
    result
}

async fn run(state: &AppState, command: &ShareCommand, format: OutputFormat) -> Result<(), AppError> {
    match command {
        ShareCommand::Sweep => {
            let swept = state.share_maintenance.sweep_expired().await?;
            output::print_success(&format!("{swept} expired share token(s) deactivated"));
        }
        ShareCommand::Purge {
            older_than_days,
            force,
        } => {
            let cutoff = Utc::now() - Duration::days(i64::from(*older_than_days));

            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Permanently delete inactive share tokens that expired before {}?",
                        cutoff.format("%Y-%m-%d %H:%M")
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let purged = state.share_maintenance.purge_inactive(cutoff).await?;
            output::print_success(&format!("{purged} share token(s) purged"));
        }
        ShareCommand::List { email } => {
            let user = state
                .account_service
                .find_by_email(email)
                .await?
                .ok_or_else(|| AppError::not_found(format!("No account for '{email}'")))?;

            let tokens = state.share_maintenance.history(user.id).await?;
            let rows: Vec<ShareRow> = tokens.iter().map(ShareRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
