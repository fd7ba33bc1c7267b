//! Route definitions for the StockShare HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with every route, the body limit, and request logging.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(product_routes())
        .merge(dashboard_routes())
        .merge(share_routes())
        .merge(public_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Health and public client configuration
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/config", get(handlers::config::public_config))
}

/// Signup, login, and the current account
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(handlers::product::list_products).post(handlers::product::create_product),
        )
        .route(
            "/products/{id}",
            put(handlers::product::update_product).delete(handlers::product::delete_product),
        )
}

fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(handlers::dashboard::summary))
}

/// Share link management for the signed-in merchant
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/share-links", post(handlers::share::create_share_link))
        .route(
            "/share-links/current",
            get(handlers::share::current_share_link),
        )
}

/// Anonymous, token-scoped catalog
fn public_routes() -> Router<AppState> {
    Router::new().route(
        "/public/products/{token}",
        get(handlers::public::shared_catalog),
    )
}
