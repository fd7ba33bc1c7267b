//! Share link issuance, resolution, and upkeep.

pub mod access;
pub mod link;
pub mod maintenance;
pub mod policy;
pub mod service;

pub use access::CatalogAccessService;
pub use link::{LinkService, TokenGenerator};
pub use maintenance::ShareMaintenance;
pub use policy::TtlPolicy;
pub use service::{Resolution, ShareService};
