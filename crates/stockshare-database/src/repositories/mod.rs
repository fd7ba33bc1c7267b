//! PostgreSQL implementations of the store traits.

pub mod product;
pub mod share_token;
pub mod user;

pub use product::ProductRepository;
pub use share_token::ShareTokenRepository;
pub use user::UserRepository;
