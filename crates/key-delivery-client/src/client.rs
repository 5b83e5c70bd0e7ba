//! Key-Delivery HTTP client implementation.

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

use crate::error::ClientError;
use crate::types::{
    Account, ApiErrorResponse, CreateAccountRequest, CreateKeyRequest, DeletedResponse,
    HealthResponse, Key, RedeemRequest, RedeemResponse, VerifyRequest, VerifyResponse,
};

/// Key-Delivery API client.
///
/// Provides the public redemption call and admin login.
#[derive(Debug, Clone)]
pub struct KeyDeliveryClient {
    client: Client,
    base_url: String,
}

impl KeyDeliveryClient {
    /// Create a new key-delivery client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the key-delivery service (e.g., `"http://key-delivery:8080"`)
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new key-delivery client with custom options.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Check service health.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self.client.get(self.url("/health")).send().await?;

        handle_response(response).await
    }

    /// Redeem a code for an account.
    ///
    /// An unknown code or an empty inventory is not an error: the returned
    /// response has `success: false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the input.
    pub async fn redeem(&self, key: &str) -> Result<RedeemResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/api/redeem-key"))
            .json(&RedeemRequest { key })
            .send()
            .await?;

        let redeemed: RedeemResponse = handle_response(response).await?;
        tracing::debug!(success = redeemed.success, "Redemption completed");
        Ok(redeemed)
    }

    /// Log in as admin.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` if the password is wrong.
    pub async fn login(&self, password: &str) -> Result<AdminSession, ClientError> {
        let response = self
            .client
            .post(self.url("/api/admin/verify"))
            .json(&VerifyRequest { password })
            .send()
            .await?;

        let verified: VerifyResponse = handle_response(response).await?;
        tracing::debug!(expires_at = %verified.expires_at, "Admin session opened");

        Ok(AdminSession {
            client: self.clone(),
            token: verified.token,
            expires_at: verified.expires_at,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// An authenticated admin session.
///
/// Holds the bearer token returned by [`KeyDeliveryClient::login`]. Once the
/// token expires every call fails with `ClientError::Unauthorized` and a new
/// session must be opened.
#[derive(Debug, Clone)]
pub struct AdminSession {
    client: KeyDeliveryClient,
    token: String,
    expires_at: DateTime<Utc>,
}

impl AdminSession {
    /// When the session token expires.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// List stocked credentials, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, ClientError> {
        let response = self.get("/api/admin/accounts").send().await?;
        handle_response(response).await
    }

    /// Stock a credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn create_account(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Account, ClientError> {
        let response = self
            .post("/api/admin/accounts")
            .json(&CreateAccountRequest { username, password })
            .send()
            .await?;
        handle_response(response).await
    }

    /// Remove a credential.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if no credential has this ID.
    pub async fn delete_account(&self, id: &str) -> Result<DeletedResponse, ClientError> {
        let response = self
            .delete(&format!("/api/admin/accounts/{id}"))
            .send()
            .await?;
        handle_response(response).await
    }

    /// List active codes, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_keys(&self) -> Result<Vec<Key>, ClientError> {
        let response = self.get("/api/admin/keys").send().await?;
        handle_response(response).await
    }

    /// Stock a redemption code.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Conflict` if the code already exists.
    pub async fn create_key(&self, key_value: &str) -> Result<Key, ClientError> {
        let response = self
            .post("/api/admin/keys")
            .json(&CreateKeyRequest { key_value })
            .send()
            .await?;
        handle_response(response).await
    }

    /// Remove a code without redeeming it.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if no code has this ID.
    pub async fn delete_key(&self, id: &str) -> Result<DeletedResponse, ClientError> {
        let response = self.delete(&format!("/api/admin/keys/{id}")).send().await?;
        handle_response(response).await
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.client.get(self.client.url(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.client.post(self.client.url(path)))
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.client.delete(self.client.url(path)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("authorization", format!("Bearer {}", self.token))
    }
}

/// Handle API response and convert errors.
async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    // Try to parse error response
    let error_body: Result<ApiErrorResponse, _> = response.json().await;

    match error_body {
        Ok(api_error) => {
            let message = api_error.error.message;

            // Map specific error codes to typed errors
            match api_error.error.code.as_str() {
                "unauthorized" => Err(ClientError::Unauthorized),
                "not_found" => Err(ClientError::NotFound(message)),
                "conflict" => Err(ClientError::Conflict(message)),
                code => Err(ClientError::Api {
                    code: code.to_string(),
                    message,
                    status: status.as_u16(),
                }),
            }
        }
        Err(_) => Err(ClientError::Api {
            code: "unknown".to_string(),
            message: format!("HTTP {status}"),
            status: status.as_u16(),
        }),
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = KeyDeliveryClient::new("http://localhost:8080").unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = KeyDeliveryClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.url("/health"), "http://localhost:8080/health");
    }

    #[test]
    fn client_options() {
        let options = ClientOptions { timeout_seconds: 5 };
        let client = KeyDeliveryClient::with_options("http://localhost:8080", options);
        assert!(client.is_ok());
    }
}
