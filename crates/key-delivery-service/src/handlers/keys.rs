//! Redemption code handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use key_delivery_core::{CodeId, RedemptionCode};
use key_delivery_store::Store;

use crate::auth::AdminAuth;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::handlers::DeletedResponse;
use crate::state::AppState;

/// Code record as exposed to admins.
#[derive(Debug, Serialize)]
pub struct KeyResponse {
    /// Record ID.
    pub id: String,
    /// The redeemable value.
    pub key_value: String,
    /// Created timestamp.
    pub created_at: String,
}

impl From<&RedemptionCode> for KeyResponse {
    fn from(code: &RedemptionCode) -> Self {
        Self {
            id: code.id.to_string(),
            key_value: code.value.clone(),
            created_at: code.created_at.to_rfc3339(),
        }
    }
}

/// Create code request.
#[derive(Debug, Deserialize)]
pub struct CreateKeyRequest {
    /// The redeemable value.
    pub key_value: String,
}

/// List active codes, newest first.
pub async fn list_keys(
    State(state): State<Arc<AppState>>,
    _admin: AdminAuth,
) -> Result<Json<Vec<KeyResponse>>, ApiError> {
    let codes = state.store.list_codes()?;

    Ok(Json(codes.iter().map(KeyResponse::from).collect()))
}

/// Stock a new redemption code.
pub async fn create_key(
    State(state): State<Arc<AppState>>,
    admin: AdminAuth,
    ApiJson(body): ApiJson<CreateKeyRequest>,
) -> Result<Json<KeyResponse>, ApiError> {
    let code = RedemptionCode::new(&body.key_value)?;

    state.store.insert_code(&code)?;

    tracing::info!(
        code_id = %code.id,
        admin = %admin.claims.sub,
        "Code stocked"
    );

    Ok(Json(KeyResponse::from(&code)))
}

/// Remove a code without redeeming it.
pub async fn delete_key(
    State(state): State<Arc<AppState>>,
    admin: AdminAuth,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let not_found = || ApiError::NotFound("Key not found".into());

    let code_id: CodeId = id.parse().map_err(|_| not_found())?;

    if !state.store.delete_code(&code_id)? {
        return Err(not_found());
    }

    tracing::info!(
        code_id = %code_id,
        admin = %admin.claims.sub,
        "Code deleted"
    );

    Ok(Json(DeletedResponse::new("Key deleted successfully")))
}
