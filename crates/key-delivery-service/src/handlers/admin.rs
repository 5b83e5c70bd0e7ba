//! Admin login.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::verify_admin_password;
use crate::error::ApiError;
use crate::state::AppState;

/// Admin login request.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// The shared admin password.
    pub password: String,
}

/// Admin login response.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    /// Always true; a wrong password is answered with 401.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
    /// Bearer token for the other admin endpoints.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

/// Exchange the admin password for a signed, expiring admin token.
///
/// Any failed login, including an unreadable body, is answered with 401.
pub async fn verify(
    State(state): State<Arc<AppState>>,
    body: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Admin login rejected: unreadable body");
        ApiError::Unauthorized
    })?;

    if !verify_admin_password(state.config.admin_password.as_deref(), &body.password) {
        // Only the log line differs between the two causes.
        if state.has_admin_password() {
            tracing::warn!("Admin login rejected: invalid password");
        } else {
            tracing::warn!("Admin login rejected: no admin password is configured");
        }
        return Err(ApiError::Unauthorized);
    }

    let issued = state.tokens.issue()?;

    tracing::info!(expires_at = %issued.expires_at, "Admin authenticated");

    Ok(Json(VerifyResponse {
        success: true,
        message: "Admin authenticated successfully".to_string(),
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}
