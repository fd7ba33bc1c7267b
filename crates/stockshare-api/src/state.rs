//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use stockshare_auth::{CredentialPolicy, JwtDecoder, JwtEncoder, PasswordHasher};
use stockshare_core::config::AppConfig;
use stockshare_core::traits::TimeSource;
use stockshare_database::Stores;
use stockshare_service::{
    AccountService, CatalogAccessService, DashboardService, LinkService, ProductService,
    ShareMaintenance, ShareService, TtlPolicy,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Store handles (PostgreSQL or in-memory)
    pub stores: Stores,

    // ── Auth ─────────────────────────────────────────────────
    pub jwt_decoder: Arc<JwtDecoder>,
    pub account_service: Arc<AccountService>,

    // ── Services ─────────────────────────────────────────────
    pub product_service: Arc<ProductService>,
    pub dashboard_service: Arc<DashboardService>,
    pub share_service: Arc<ShareService>,
    pub catalog_access: Arc<CatalogAccessService>,
    pub link_service: Arc<LinkService>,
    pub share_maintenance: Arc<ShareMaintenance>,
}

impl AppState {
    /// Wire every service against `stores`, reading time from `clock`.
    pub fn build(config: AppConfig, stores: Stores, clock: Arc<dyn TimeSource>) -> Self {
        let password_hasher = Arc::new(PasswordHasher::new());
        let credential_policy = Arc::new(CredentialPolicy::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let account_service = Arc::new(AccountService::new(
            Arc::clone(&stores.users),
            password_hasher,
            credential_policy,
            jwt_encoder,
        ));

        let link_service = Arc::new(LinkService::new(&config.share));
        let share_service = Arc::new(ShareService::new(
            Arc::clone(&stores.share_tokens),
            link_service.clone(),
            TtlPolicy::new(&config.share),
            Arc::clone(&clock),
        ));
        let catalog_access = Arc::new(CatalogAccessService::new(
            Arc::clone(&share_service),
            Arc::clone(&stores.products),
        ));
        let share_maintenance = Arc::new(ShareMaintenance::new(
            Arc::clone(&stores.share_tokens),
            clock,
        ));

        let product_service = Arc::new(ProductService::new(Arc::clone(&stores.products)));
        let dashboard_service = Arc::new(DashboardService::new(Arc::clone(&stores.products)));

        Self {
            config: Arc::new(config),
            stores,
            jwt_decoder,
            account_service,
            product_service,
            dashboard_service,
            share_service,
            catalog_access,
            link_service,
            share_maintenance,
        }
    }
}
