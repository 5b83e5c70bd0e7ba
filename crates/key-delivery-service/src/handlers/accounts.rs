//! Credential inventory handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use key_delivery_core::{Credential, CredentialId};
use key_delivery_store::Store;

use crate::auth::AdminAuth;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::handlers::DeletedResponse;
use crate::state::AppState;

/// Credential record as exposed to admins.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Record ID.
    pub id: String,
    /// Account username.
    pub username: String,
    /// Account secret.
    pub password: String,
    /// Created timestamp.
    pub created_at: String,
}

impl From<&Credential> for AccountResponse {
    fn from(credential: &Credential) -> Self {
        Self {
            id: credential.id.to_string(),
            username: credential.username.clone(),
            password: credential.secret.clone(),
            created_at: credential.created_at.to_rfc3339(),
        }
    }
}

/// Create credential request.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Account username.
    pub username: String,
    /// Account secret.
    pub password: String,
}

/// List the credential inventory, newest first.
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    _admin: AdminAuth,
) -> Result<Json<Vec<AccountResponse>>, ApiError> {
    let credentials = state.store.list_credentials()?;

    Ok(Json(
        credentials.iter().map(AccountResponse::from).collect(),
    ))
}

/// Stock a new credential.
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    admin: AdminAuth,
    ApiJson(body): ApiJson<CreateAccountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let credential = Credential::new(&body.username, &body.password)?;

    state.store.insert_credential(&credential)?;

    tracing::info!(
        credential_id = %credential.id,
        admin = %admin.claims.sub,
        "Credential stocked"
    );

    Ok(Json(AccountResponse::from(&credential)))
}

/// Remove a credential from the inventory.
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    admin: AdminAuth,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let not_found = || ApiError::NotFound("Account not found".into());

    // An unparseable id cannot name any record.
    let credential_id: CredentialId = id.parse().map_err(|_| not_found())?;

    if !state.store.delete_credential(&credential_id)? {
        return Err(not_found());
    }

    tracing::info!(
        credential_id = %credential_id,
        admin = %admin.claims.sub,
        "Credential deleted"
    );

    Ok(Json(DeletedResponse::new("Account deleted successfully")))
}
