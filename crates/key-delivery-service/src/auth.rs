//! Admin authentication.
//!
//! An admin logs in once with the shared password and receives a signed,
//! expiring token. Every other admin route requires that token as a bearer
//! credential, checked by the [`AdminAuth`] extractor before the handler runs.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::crypto::constant_time_eq;
use crate::error::ApiError;
use crate::state::AppState;

/// Issuer claim stamped on every admin token.
pub const TOKEN_ISSUER: &str = "key-delivery";

/// Subject claim of admin tokens.
pub const ADMIN_SUBJECT: &str = "admin";

/// Check a submitted admin password against the configured one.
///
/// Always fails when no password is configured.
#[must_use]
pub fn verify_admin_password(expected: Option<&str>, submitted: &str) -> bool {
    expected.is_some_and(|expected| constant_time_eq(expected, submitted))
}

/// JWT claims carried by admin tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Subject, always [`ADMIN_SUBJECT`].
    pub sub: String,
    /// Issuer, always [`TOKEN_ISSUER`].
    pub iss: String,
    /// Issued at (seconds since epoch).
    pub iat: i64,
    /// Expiration time (seconds since epoch).
    pub exp: i64,
}

/// A freshly issued admin token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The encoded JWT.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Issues and validates HS256 admin tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer signing with `secret`, issuing tokens valid for `ttl`.
    #[must_use]
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Issue a new admin token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the token cannot be encoded.
    pub fn issue(&self) -> Result<IssuedToken, ApiError> {
        let now = Utc::now();
        let ttl = chrono::Duration::from_std(self.ttl)
            .map_err(|e| ApiError::Internal(format!("invalid token ttl: {e}")))?;
        let expires_at = now + ttl;

        let claims = AdminClaims {
            sub: ADMIN_SUBJECT.to_string(),
            iss: TOKEN_ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("failed to sign admin token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Validate an admin token's signature, expiry, issuer and subject.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if the token is not acceptable.
    pub fn validate(&self, token: &str) -> Result<AdminClaims, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.sub = Some(ADMIN_SUBJECT.to_string());

        let token_data =
            decode::<AdminClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!(error = %e, "Admin token validation failed");
                ApiError::Unauthorized
            })?;

        Ok(token_data.claims)
    }
}

/// An authenticated admin, extracted from a valid bearer token.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    /// The validated token claims.
    pub claims: AdminClaims,
}

impl FromRequestParts<Arc<AppState>> for AdminAuth {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            // Extract the Authorization header
            let auth_header = parts
                .headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or(ApiError::Unauthorized)?;

            // Extract the Bearer token
            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or(ApiError::Unauthorized)?;

            let claims = state.tokens.validate(token)?;

            Ok(AdminAuth { claims })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(b"test-signing-key", Duration::from_secs(3600))
    }

    #[test]
    fn issued_token_validates() {
        let issuer = issuer();
        let issued = issuer.issue().unwrap();

        let claims = issuer.validate(&issued.token).unwrap();
        assert_eq!(claims.sub, ADMIN_SUBJECT);
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn token_from_other_key_is_rejected() {
        let other = TokenIssuer::new(b"another-key", Duration::from_secs(3600));
        let issued = other.issue().unwrap();

        assert!(matches!(
            issuer().validate(&issued.token),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: ADMIN_SUBJECT.into(),
            iss: TOKEN_ISSUER.into(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-signing-key"),
        )
        .unwrap();

        assert!(matches!(
            issuer().validate(&token),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn wrong_subject_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: "someone-else".into(),
            iss: TOKEN_ISSUER.into(),
            iat: now,
            exp: now + 600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-signing-key"),
        )
        .unwrap();

        assert!(issuer().validate(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(issuer().validate("not.a.jwt").is_err());
    }

    #[test]
    fn password_check() {
        assert!(verify_admin_password(Some("xenforce123"), "xenforce123"));
        assert!(!verify_admin_password(Some("xenforce123"), "wrongpassword"));
        assert!(!verify_admin_password(None, ""));
        assert!(!verify_admin_password(None, "anything"));
    }
}
