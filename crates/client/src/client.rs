//! HTTP client for the OpenMRS REST API

use reqwest::header::{ACCEPT, AUTHORIZATION, COOKIE};
use reqwest::{Method, RequestBuilder};

use crate::config::Config;
use crate::error::ClientError;
use crate::session::Session;

/// Shared HTTP plumbing: base URL, credentials and the pooled
/// `reqwest::Client`. Cheap to clone.
#[derive(Debug, Clone)]
pub struct OpenMrsClient {
    http: reqwest::Client,
    config: Config,
}

impl OpenMrsClient {
    /// Create a new client from configuration
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()?;

        tracing::debug!(base_url = %config.base_url, "Created OpenMRS client");

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Absolute URL for a resource path such as `/patient`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Request carrying Basic credentials; only used to open a session
    pub(crate) fn credentialed(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header(AUTHORIZATION, self.config.credentials.authorization_header())
            .header(ACCEPT, "application/json")
    }

    /// Request authorized by the session cookie
    pub(crate) fn request(&self, session: &Session, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header(COOKIE, session.cookie_header())
            .header(ACCEPT, "application/json")
    }
}
