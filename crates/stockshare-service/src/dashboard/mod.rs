//! Inventory summaries for the merchant dashboard.

pub mod aggregator;
pub mod service;

pub use aggregator::{CategoryTotals, DashboardSummary, summarize};
pub use service::DashboardService;
