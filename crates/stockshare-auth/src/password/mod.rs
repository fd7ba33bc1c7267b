//! Password hashing and signup credential policy.

pub mod hasher;
pub mod policy;

pub use hasher::PasswordHasher;
pub use policy::CredentialPolicy;
