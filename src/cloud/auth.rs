//! Token acquisition against the AAD token endpoint
//!
//! Client-credentials flow: one form POST per run, the bearer token is then
//! attached to every management-API request. Token refresh is not needed at
//! walkthrough timescales.

use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::Credentials;
use crate::error::AuthError;

const TOKEN_SCOPE: &str = "https://management.azure.com/.default";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[allow(dead_code)]
    expires_in: u64,
}

/// Acquire a bearer token for the management API.
pub async fn acquire_token(
    client: &reqwest::Client,
    creds: &Credentials,
) -> Result<String, AuthError> {
    let url = format!(
        "https://login.microsoftonline.com/{}/oauth2/v2.0/token",
        creds.tenant_id
    );

    debug!("Requesting management token for tenant {}", creds.tenant_id);

    let params = [
        ("grant_type", "client_credentials"),
        ("client_id", creds.client_id.as_str()),
        ("client_secret", creds.client_secret.as_str()),
        ("scope", TOKEN_SCOPE),
    ];

    let response = client
        .post(&url)
        .form(&params)
        .timeout(Duration::from_secs(30))
        .send()
        .await
        .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::Rejected {
            status: status.as_u16(),
            message: body,
        });
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

    Ok(token.access_token)
}
