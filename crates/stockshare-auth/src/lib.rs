//! # stockshare-auth
//!
//! Credential mechanics for StockShare merchants.
//!
//! - `jwt`: HS256 session token creation and validation
//! - `password`: Argon2id hashing and the signup credential policy

pub mod jwt;
pub mod password;

pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
pub use password::{CredentialPolicy, PasswordHasher};
