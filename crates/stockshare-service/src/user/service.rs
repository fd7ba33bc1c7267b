//! Signup, login, and session-holder lookup.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use stockshare_auth::{CredentialPolicy, JwtEncoder, PasswordHasher};
use stockshare_core::error::AppError;
use stockshare_core::result::AppResult;
use stockshare_database::UserStore;
use stockshare_entity::user::{CreateUser, User};

/// Same message for an unknown email and a wrong password.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// A freshly issued session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

/// Handles merchant signup and login.
#[derive(Debug, Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    policy: Arc<CredentialPolicy>,
    encoder: Arc<JwtEncoder>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<CredentialPolicy>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            policy,
            encoder,
        }
    }

    /// Create an account and sign it in.
    pub async fn signup(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let email = self.policy.check_signup(email, password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("An account with this email already exists"));
        }

        let password_hash = self.hasher.hash(password)?;
        let user = self
            .users
            .create(&CreateUser {
                email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "Account created");
        self.open_session(user)
    }

    /// Verify credentials and issue a session.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let email = CredentialPolicy::normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }

        let Some(user) = self.users.find_by_email(&email).await? else {
            self.hasher.verify_decoy(password);
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        info!(user_id = %user.id, "Login succeeded");
        self.open_session(user)
    }

    /// Load the account behind a verified session token.
    ///
    /// A deleted account is `Unauthorized`, not `NotFound`.
    pub async fn authenticate(&self, user_id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))
    }

    /// Look up an account by email, for operator tooling.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.users
            .find_by_email(&CredentialPolicy::normalize_email(email))
            .await
    }

    fn open_session(&self, user: User) -> AppResult<AuthSession> {
        let issued = self.encoder.issue(user.id, &user.email)?;
        Ok(AuthSession {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        })
    }
}
