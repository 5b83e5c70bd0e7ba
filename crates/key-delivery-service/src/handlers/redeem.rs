//! Public redemption endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use key_delivery_core::{normalize_code_value, DeliveredCredential, RedemptionOutcome};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Redemption request.
#[derive(Debug, Deserialize)]
pub struct RedeemRequest {
    /// The code value to redeem.
    pub key: String,
}

/// Credential handed out by a successful redemption.
#[derive(Debug, Serialize)]
pub struct DeliveredAccount {
    /// Account username.
    pub username: String,
    /// Account secret.
    pub password: String,
}

impl From<DeliveredCredential> for DeliveredAccount {
    fn from(credential: DeliveredCredential) -> Self {
        Self {
            username: credential.username,
            password: credential.secret,
        }
    }
}

/// Redemption response.
///
/// Invalid codes and an empty inventory are reported here with
/// `success: false`, not as HTTP errors.
#[derive(Debug, Serialize)]
pub struct RedeemResponse {
    /// Whether an account was delivered.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
    /// The delivered account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<DeliveredAccount>,
}

impl From<RedemptionOutcome> for RedeemResponse {
    fn from(outcome: RedemptionOutcome) -> Self {
        Self {
            success: outcome.success,
            message: outcome.message,
            account: outcome.account.map(DeliveredAccount::from),
        }
    }
}

/// Exchange a code for an account.
pub async fn redeem_key(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<RedeemRequest>,
) -> Result<Json<RedeemResponse>, ApiError> {
    let key = normalize_code_value(&body.key)?;

    let outcome = key_delivery_store::redeem(&*state.store, key)?;

    Ok(Json(RedeemResponse::from(outcome)))
}
