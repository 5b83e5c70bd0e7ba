//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{accounts, admin, health, keys, redeem};
use crate::state::AppState;

// ============================================================================
// Concurrency Limiting Constants
// ============================================================================

/// Maximum concurrent requests for the public redemption endpoint.
const REDEEM_MAX_CONCURRENT_REQUESTS: usize = 100;

/// Maximum concurrent requests for admin endpoints.
const ADMIN_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
/// - `POST /api/redeem-key` - Redeem a code for an account
///
/// ## Admin
/// - `POST /api/admin/verify` - Exchange the admin password for a token
///
/// ## Admin (bearer token auth)
/// - `GET /api/admin/accounts` - List credentials
/// - `POST /api/admin/accounts` - Stock a credential
/// - `DELETE /api/admin/accounts/:id` - Remove a credential
/// - `GET /api/admin/keys` - List codes
/// - `POST /api/admin/keys` - Stock a code
/// - `DELETE /api/admin/keys/:id` - Remove a code
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let admin_routes = Router::new()
        .route("/verify", post(admin::verify))
        // Accounts
        .route(
            "/accounts",
            get(accounts::list_accounts).post(accounts::create_account),
        )
        .route("/accounts/:id", delete(accounts::delete_account))
        // Keys
        .route("/keys", get(keys::list_keys).post(keys::create_key))
        .route("/keys/:id", delete(keys::delete_key))
        .layer(ConcurrencyLimitLayer::new(ADMIN_MAX_CONCURRENT_REQUESTS));

    let redeem_routes = Router::new()
        .route("/redeem-key", post(redeem::redeem_key))
        .layer(ConcurrencyLimitLayer::new(REDEEM_MAX_CONCURRENT_REQUESTS));

    let api_routes = Router::new()
        .nest("/admin", admin_routes)
        .merge(redeem_routes);

    Router::new()
        // Health (public, no rate limit)
        .route("/health", get(health::health))
        .nest("/api", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
