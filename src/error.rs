//! Centralized error types for appsvc
//!
//! Uses thiserror for typed errors that can be matched on,
//! while still being compatible with anyhow for propagation.
//!
//! Callers never dispatch on concrete error types; they inspect
//! [`DeployError::kind`] and branch on the [`FailureKind`] discriminant.

use thiserror::Error;

/// Top-level error type for walkthrough operations
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Cloud API error: {0}")]
    Cloud(#[from] CloudApiError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Discriminated failure kind inspected by the orchestrator.
///
/// The caller branches on this tag, not on error subclassing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    AuthFailure,
    ProvisionFailure,
    TransportUnavailable,
    NotFound,
    Unknown,
}

impl DeployError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DeployError::Config(_) => FailureKind::AuthFailure,
            DeployError::Auth(_) => FailureKind::AuthFailure,
            DeployError::Cloud(CloudApiError::NotFound { .. }) => FailureKind::NotFound,
            DeployError::Cloud(_) => FailureKind::ProvisionFailure,
            DeployError::Transport(TransportError::GitNotFound) => {
                FailureKind::TransportUnavailable
            }
            DeployError::Transport(_) => FailureKind::Unknown,
        }
    }
}

/// Credential loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Missing credentials. Set CLIENT_ID, CLIENT_SECRET, TENANT_ID and SUBSCRIPTION_ID, \
         or point AZURE_AUTH_LOCATION at an auth file"
    )]
    MissingCredentials,

    #[error("Auth file not found: {path}")]
    AuthFileNotFound { path: String },

    #[error("Failed to parse auth file {path}: {message}")]
    AuthFileMalformed { path: String, message: String },
}

/// Token acquisition errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token request failed: {0}")]
    RequestFailed(String),

    #[error("Token endpoint returned {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// Management API errors
#[derive(Error, Debug)]
pub enum CloudApiError {
    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Request to {url} failed: {message}")]
    RequestFailed { url: String, message: String },

    #[error("{operation} returned status {status}: {body}")]
    UnexpectedStatus {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("{operation} did not reach a terminal state after {polls} polls")]
    OperationTimedOut { operation: String, polls: u32 },

    #[error("Malformed response from {operation}: {message}")]
    MalformedResponse { operation: String, message: String },
}

/// Content transport errors (FTP upload, local git push)
#[derive(Error, Debug)]
pub enum TransportError {
    #[error(
        "Cannot find the 'git' command line. Make sure Git is installed and the directory \
         of the git executable is included in your PATH environment variable"
    )]
    GitNotFound,

    #[error("Git command failed: {command}: {stderr}")]
    GitCommandFailed { command: String, stderr: String },

    #[error("FTP transfer to {host} failed: {message}")]
    FtpFailed { host: String, message: String },

    #[error("Publish profile is missing a {method} entry")]
    ProfileEntryMissing { method: String },

    #[error("Publish profile could not be parsed: {0}")]
    ProfileMalformed(String),

    #[error("Package not found at path: {path}")]
    PackageNotFound { path: String },
}
