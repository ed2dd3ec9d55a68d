//! Client configuration

use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://demo.openmrs.org/openmrs/ws/rest/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Source of the Basic credentials sent on login
#[derive(Clone)]
pub enum Credentials {
    /// Plain username and password, encoded on use
    Password { username: String, password: String },
    /// Pre-encoded base64 `username:password` pair
    Encoded(String),
}

impl Credentials {
    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        match self {
            Credentials::Password { username, password } => {
                format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
            }
            Credentials::Encoded(key) => format!("Basic {key}"),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .finish_non_exhaustive(),
            Credentials::Encoded(_) => f.write_str("Encoded(..)"),
        }
    }
}

/// Client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub credentials: Credentials,
    pub timeout: Duration,
    /// Identifier-type reference for new identifiers; when unset the
    /// person reference is sent instead.
    pub identifier_type: Option<String>,
}

impl Config {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            credentials,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            identifier_type: None,
        })
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("OPENMRS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());

        let credentials = match lookup("OPENMRS_API_KEY") {
            Some(key) => {
                let decoded = STANDARD.decode(key.trim()).map_err(|e| ConfigError::Invalid {
                    var: "OPENMRS_API_KEY",
                    reason: e.to_string(),
                })?;
                if !decoded.contains(&b':') {
                    return Err(ConfigError::Invalid {
                        var: "OPENMRS_API_KEY",
                        reason: "expected base64 of 'username:password'".into(),
                    });
                }
                Credentials::Encoded(key.trim().to_string())
            }
            None => Credentials::Password {
                username: lookup("OPENMRS_USERNAME").ok_or(ConfigError::Missing(
                    "OPENMRS_USERNAME (or OPENMRS_API_KEY)",
                ))?,
                password: lookup("OPENMRS_PASSWORD").ok_or(ConfigError::Missing(
                    "OPENMRS_PASSWORD (or OPENMRS_API_KEY)",
                ))?,
            },
        };

        let timeout = match lookup("OPENMRS_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(secs.trim().parse().map_err(|_| {
                ConfigError::Invalid {
                    var: "OPENMRS_TIMEOUT_SECS",
                    reason: format!("'{secs}' is not a whole number of seconds"),
                }
            })?),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            base_url: normalize_base_url(&base_url)?,
            credentials,
            timeout,
            identifier_type: lookup("OPENMRS_IDENTIFIER_TYPE").filter(|s| !s.trim().is_empty()),
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let cleaned = raw.trim().trim_end_matches('/');
    let parsed = reqwest::Url::parse(cleaned).map_err(|e| ConfigError::Invalid {
        var: "OPENMRS_BASE_URL",
        reason: format!("'{cleaned}': {e}"),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            var: "OPENMRS_BASE_URL",
            reason: format!("scheme must be http or https, got {}", parsed.scheme()),
        });
    }

    Ok(cleaned.to_string())
}
