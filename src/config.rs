//! Credential configuration
//!
//! Two sources, tried in order:
//!
//! 1. **Environment variables**: `CLIENT_ID`, `CLIENT_SECRET`, `TENANT_ID`,
//!    `SUBSCRIPTION_ID` (service principal credentials).
//! 2. **Auth file**: `AZURE_AUTH_LOCATION` points at the JSON file produced
//!    by `az ad sp create-for-rbac --sdk-auth`.
//!
//! Either source yields a [`Credentials`] bundle bound to one subscription.
//! Missing or malformed input is fatal; the whole run aborts before any
//! resource is created.

use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;

/// Service principal credentials plus the target subscription.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub tenant_id: String,
    pub subscription_id: String,
}

/// On-disk shape of the `--sdk-auth` file.
#[derive(Debug, Deserialize)]
struct AuthFile {
    #[serde(rename = "clientId")]
    client_id: String,
    #[serde(rename = "clientSecret")]
    client_secret: String,
    #[serde(rename = "tenantId")]
    tenant_id: String,
    #[serde(rename = "subscriptionId")]
    subscription_id: String,
}

impl Credentials {
    /// Load credentials from the environment, falling back to the auth file.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(creds) = Self::from_env_vars() {
            return Ok(creds);
        }
        if let Ok(path) = std::env::var("AZURE_AUTH_LOCATION") {
            return Self::from_auth_file(Path::new(&path));
        }
        Err(ConfigError::MissingCredentials)
    }

    fn from_env_vars() -> Option<Self> {
        let client_id = std::env::var("CLIENT_ID").ok()?;
        let client_secret = std::env::var("CLIENT_SECRET").ok()?;
        let tenant_id = std::env::var("TENANT_ID").ok()?;
        let subscription_id = std::env::var("SUBSCRIPTION_ID").ok()?;
        Some(Self {
            client_id,
            client_secret,
            tenant_id,
            subscription_id,
        })
    }

    /// Read an `--sdk-auth` style JSON file.
    pub fn from_auth_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::AuthFileNotFound {
            path: path.display().to_string(),
        })?;

        let auth: AuthFile =
            serde_json::from_str(&content).map_err(|e| ConfigError::AuthFileMalformed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client_id: auth.client_id,
            client_secret: auth.client_secret,
            tenant_id: auth.tenant_id,
            subscription_id: auth.subscription_id,
        })
    }
}
