//! # stockshare-service
//!
//! Business logic for StockShare. Each service receives its stores and
//! collaborators as `Arc` handles at construction time.

pub mod context;
pub mod dashboard;
pub mod product;
pub mod share;
pub mod user;

pub use context::RequestContext;
pub use dashboard::{DashboardService, DashboardSummary};
pub use product::{ProductInput, ProductService};
pub use share::{
    CatalogAccessService, LinkService, Resolution, ShareMaintenance, ShareService, TokenGenerator,
    TtlPolicy,
};
pub use user::{AccountService, AuthSession};
