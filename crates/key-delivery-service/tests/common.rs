//! Common test utilities for key-delivery integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use axum_test::TestServer;
use serde_json::json;
use tempfile::TempDir;

use key_delivery_service::auth::TokenIssuer;
use key_delivery_service::{create_router, AppState, ServiceConfig};
use key_delivery_store::RocksStore;

/// Admin password configured on every test server.
pub const ADMIN_PASSWORD: &str = "test-admin-password";

/// Token signing key configured on every test server.
pub const TOKEN_SECRET: &str = "test-token-secret";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with a fresh database.
    pub fn new() -> Self {
        Self::with_admin_password(Some(ADMIN_PASSWORD))
    }

    /// Create a harness whose admin password is `password` (or unset).
    pub fn with_admin_password(password: Option<&str>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = RocksStore::open(temp_dir.path()).expect("Failed to open store");

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            admin_password: password.map(str::to_string),
            admin_token_secret: TOKEN_SECRET.into(),
            admin_token_ttl_seconds: 3600,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(Arc::new(store), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            _temp_dir: temp_dir,
        }
    }

    /// Mint a valid admin token signed with the harness key.
    pub fn admin_token() -> String {
        TokenIssuer::new(TOKEN_SECRET.as_bytes(), Duration::from_secs(3600))
            .issue()
            .expect("Failed to issue admin token")
            .token
    }

    /// Get the authorization header name.
    pub fn auth_header_name() -> HeaderName {
        AUTHORIZATION
    }

    /// Get a bearer authorization header carrying a valid admin token.
    pub fn admin_auth_header() -> HeaderValue {
        Self::bearer(&Self::admin_token())
    }

    /// Get a bearer authorization header carrying an arbitrary token.
    pub fn bearer(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {token}")).expect("Invalid header value")
    }

    /// Stock a credential through the admin API and return its record.
    pub async fn create_account(&self, username: &str, password: &str) -> serde_json::Value {
        let response = self
            .server
            .post("/api/admin/accounts")
            .add_header(Self::auth_header_name(), Self::admin_auth_header())
            .json(&json!({ "username": username, "password": password }))
            .await;
        response.assert_status_ok();
        response.json()
    }

    /// Stock a redemption code through the admin API and return its record.
    pub async fn create_key(&self, key_value: &str) -> serde_json::Value {
        let response = self
            .server
            .post("/api/admin/keys")
            .add_header(Self::auth_header_name(), Self::admin_auth_header())
            .json(&json!({ "key_value": key_value }))
            .await;
        response.assert_status_ok();
        response.json()
    }

    /// List codes through the admin API.
    pub async fn list_keys(&self) -> Vec<serde_json::Value> {
        let response = self
            .server
            .get("/api/admin/keys")
            .add_header(Self::auth_header_name(), Self::admin_auth_header())
            .await;
        response.assert_status_ok();
        response.json()
    }

    /// List credentials through the admin API.
    pub async fn list_accounts(&self) -> Vec<serde_json::Value> {
        let response = self
            .server
            .get("/api/admin/accounts")
            .add_header(Self::auth_header_name(), Self::admin_auth_header())
            .await;
        response.assert_status_ok();
        response.json()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
