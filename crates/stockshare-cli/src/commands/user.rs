//! Merchant account CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use stockshare_api::AppState;
use stockshare_core::error::AppError;
use stockshare_entity::user::User;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a merchant account
    Create {
        /// Login email
        email: String,
        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Show a merchant account
    Show {
        /// Login email
        email: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub created_at: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            created_at: user.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(args: &UserArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let state = super::connect(env).await?;
    let result = run(&state, &args.command, format).await;
    state.stores.close().await;
    result
}

async fn run(state: &AppState, command: &UserCommand, format: OutputFormat) -> Result<(), AppError> {
    match command {
        UserCommand::Create { email, password } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Repeat password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let session = state.account_service.signup(email, &password).await?;
            output::print_success(&format!("Account '{}' created", session.user.email));
            output::print_item(&UserRow::from(&session.user), format);
        }
        UserCommand::Show { email } => {
            let user = state
                .account_service
                .find_by_email(email)
                .await?
                .ok_or_else(|| AppError::not_found(format!("No account for '{email}'")))?;
            output::print_item(&UserRow::from(&user), format);
        }
    }

    Ok(())
}
