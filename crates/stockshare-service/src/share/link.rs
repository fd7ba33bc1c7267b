//! Share token generation and public URL construction.

use rand::RngCore;
use rand::rngs::OsRng;

use stockshare_core::config::ShareConfig;
use stockshare_entity::share::{ShareLink, ShareToken};

/// Bytes of OS entropy per token (hex encoded to twice as many characters).
pub const TOKEN_BYTES: usize = 16;

/// Longest token value `resolve` will look up.
pub const MAX_TOKEN_LENGTH: usize = 128;

/// Source of fresh token values.
pub trait TokenGenerator: Send + Sync + std::fmt::Debug + 'static {
    fn generate(&self) -> String;
}

/// Generates share tokens and turns issued tokens into customer links.
#[derive(Debug, Clone)]
pub struct LinkService {
    customer_path: String,
}

impl LinkService {
    pub fn new(config: &ShareConfig) -> Self {
        let trimmed = config.customer_path.trim().trim_matches('/');
        let customer_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        Self { customer_path }
    }

    /// Build the customer-facing link for an issued token.
    ///
    /// `base_url` is an origin such as `https://shop.example.com`.
    pub fn share_link(&self, record: &ShareToken, base_url: &str) -> ShareLink {
        ShareLink {
            token: record.token.clone(),
            expires_at: record.expires_at,
            url: format!(
                "{}{}/{}",
                base_url.trim_end_matches('/'),
                self.customer_path,
                record.token
            ),
        }
    }

    /// Cheap syntactic check applied before any store lookup.
    pub fn is_plausible_token(token: &str) -> bool {
        !token.is_empty()
            && token.len() <= MAX_TOKEN_LENGTH
            && token
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }
}

impl Default for LinkService {
    fn default() -> Self {
        Self::new(&ShareConfig::default())
    }
}

impl TokenGenerator for LinkService {
    fn generate(&self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}
