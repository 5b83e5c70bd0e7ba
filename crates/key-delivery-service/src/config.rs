//! Service configuration.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::crypto::generate_secret;

/// Default admin token lifetime: one hour.
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 3600;

/// Service configuration loaded from environment variables.
#[derive(Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Path to `RocksDB` data directory (default: "/data/key-delivery").
    pub data_dir: String,

    /// Shared admin password. When unset, every admin login is rejected.
    pub admin_password: Option<String>,

    /// HMAC key used to sign admin tokens.
    ///
    /// Generated at startup when not configured, which invalidates issued
    /// tokens on restart.
    pub admin_token_secret: String,

    /// Admin token lifetime in seconds.
    pub admin_token_ttl_seconds: u64,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

/// Admin secrets file structure.
#[derive(Debug, Default, Deserialize)]
struct AdminSecrets {
    password: Option<String>,
    #[serde(default)]
    token_secret: Option<String>,
}

impl ServiceConfig {
    /// Load configuration from environment variables and the admin secrets file.
    #[must_use]
    pub fn from_env() -> Self {
        let secrets = load_admin_secrets();
        Self::from_vars(|name| std::env::var(name).ok(), secrets)
    }

    /// Build configuration from a variable lookup, letting file secrets win
    /// over variables.
    fn from_vars(var: impl Fn(&str) -> Option<String>, secrets: AdminSecrets) -> Self {
        let admin_password = secrets
            .password
            .or_else(|| var("ADMIN_PASSWORD"))
            .filter(|p| !p.is_empty());

        let admin_token_secret = secrets
            .token_secret
            .or_else(|| var("ADMIN_TOKEN_SECRET"))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                tracing::warn!("ADMIN_TOKEN_SECRET not set - generated a per-process signing key");
                generate_secret()
            });

        Self {
            listen_addr: var("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".into()),
            data_dir: var("DATA_DIR").unwrap_or_else(|| "/data/key-delivery".into()),
            admin_password,
            admin_token_secret,
            admin_token_ttl_seconds: var("ADMIN_TOKEN_TTL_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TOKEN_TTL_SECONDS),
            cors_origins: parse_origins(&var("CORS_ORIGINS").unwrap_or_else(|| "*".into())),
            max_body_bytes: var("MAX_BODY_BYTES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(64 * 1024), // 64KB
            request_timeout_seconds: var("REQUEST_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}

/// Split a comma-separated origin list.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Load admin secrets from file, or nothing if no file is present.
fn load_admin_secrets() -> AdminSecrets {
    let secret_paths = [
        ".secrets/admin.json",
        "key-delivery/.secrets/admin.json",
        "../.secrets/admin.json",
    ];

    for path in &secret_paths {
        match load_secrets_file::<AdminSecrets>(path) {
            Ok(secrets) => {
                tracing::info!(path = %path, "Loaded admin secrets from file");
                return secrets;
            }
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                tracing::warn!(path = %path, error = %e, "Ignoring malformed admin secrets file");
            }
            Err(_) => {}
        }
    }

    tracing::debug!("Admin secrets file not found, using environment variables");
    AdminSecrets::default()
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("listen_addr", &self.listen_addr)
            .field("data_dir", &self.data_dir)
            .field("admin_password_set", &self.admin_password.is_some())
            .field("admin_token_ttl_seconds", &self.admin_token_ttl_seconds)
            .field("cors_origins", &self.cors_origins)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish_non_exhaustive()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            data_dir: "/data/key-delivery".into(),
            admin_password: None,
            admin_token_secret: generate_secret(),
            admin_token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
            cors_origins: vec!["*".into()],
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 30,
        }
    }
}
