//! Application state.

use std::sync::Arc;
use std::time::Duration;

use key_delivery_store::RocksStore;

use crate::auth::TokenIssuer;
use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<RocksStore>,

    /// Service configuration.
    pub config: ServiceConfig,

    /// Admin token issuer and validator.
    pub tokens: TokenIssuer,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<RocksStore>, config: ServiceConfig) -> Self {
        if config.admin_password.is_none() {
            tracing::warn!("ADMIN_PASSWORD not configured - admin endpoints are unreachable");
        }

        let tokens = TokenIssuer::new(
            config.admin_token_secret.as_bytes(),
            Duration::from_secs(config.admin_token_ttl_seconds),
        );

        Self {
            store,
            config,
            tokens,
        }
    }

    /// Check if admin login is possible.
    #[must_use]
    pub fn has_admin_password(&self) -> bool {
        self.config.admin_password.is_some()
    }
}
