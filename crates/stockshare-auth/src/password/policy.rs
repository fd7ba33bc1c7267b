//! Signup credential rules.

use validator::ValidateEmail;

use stockshare_core::config::AuthConfig;
use stockshare_core::error::AppError;

/// Longest password accepted, bounding the hashing cost of one request.
const MAX_PASSWORD_LENGTH: usize = 1024;

/// Email normalization plus the password and domain rules applied at signup.
#[derive(Debug, Clone)]
pub struct CredentialPolicy {
    min_password_length: usize,
    allowed_domains: Vec<String>,
}

impl CredentialPolicy {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_password_length: config.password_min_length,
            allowed_domains: config
                .allowed_email_domains
                .iter()
                .map(|d| d.trim().trim_start_matches('@').to_ascii_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    /// Trim and lower-case an email. Used for both signup and login.
    pub fn normalize_email(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// Validate signup credentials and return the normalized email.
    pub fn check_signup(&self, raw_email: &str, password: &str) -> Result<String, AppError> {
        let email = Self::normalize_email(raw_email);
        if email.is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }

        if !email.validate_email() {
            return Err(AppError::validation("Email address is not valid"));
        }

        if !self.allowed_domains.is_empty() {
            let domain = email.rsplit_once('@').map(|(_, d)| d).unwrap_or_default();
            if !self.allowed_domains.iter().any(|allowed| allowed == domain) {
                return Err(AppError::validation(format!(
                    "Sign up is limited to {} addresses",
                    self.allowed_domains
                        .iter()
                        .map(|d| format!("@{d}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                )));
            }
        }

        let length = password.chars().count();
        if length < self.min_password_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.min_password_length
            )));
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(AppError::validation("Password is too long"));
        }

        Ok(email)
    }
}
