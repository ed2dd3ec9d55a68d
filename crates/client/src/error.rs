//! Client error handling

use reqwest::StatusCode;
use thiserror::Error;

/// Invalid or missing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Errors from talking to the OpenMRS REST API
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Login failed ({status}): {body}")]
    AuthenticationFailed { status: StatusCode, body: String },

    #[error("Login failed: server did not report an authenticated session")]
    NotAuthenticated,

    #[error("Login failed: no JSESSIONID cookie in response")]
    MissingSessionCookie,

    #[error("Error {operation} ({status}): {body}")]
    Rejected {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("No location found matching '{0}'")]
    LocationNotFound(String),
}

impl ClientError {
    /// Build a `Rejected` error, draining the response body for context
    pub(crate) async fn rejected(operation: &'static str, response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ClientError::Rejected {
            operation,
            status,
            body,
        }
    }
}

/// Errors that end the interactive shell
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Login(ClientError),
}
