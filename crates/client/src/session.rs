//! Session login and logout

use reqwest::{Method, StatusCode};
use serde::Deserialize;

use crate::client::OpenMrsClient;
use crate::error::ClientError;

pub const SESSION_COOKIE: &str = "JSESSIONID";

/// Authenticated session issued by the server
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Value for the `Cookie` header
    pub fn cookie_header(&self) -> String {
        format!("{SESSION_COOKIE}={}", self.token)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    #[serde(default)]
    authenticated: bool,
}

/// Opens and closes sessions against `/session`
#[derive(Debug, Clone)]
pub struct SessionManager {
    client: OpenMrsClient,
}

impl SessionManager {
    pub fn new(client: OpenMrsClient) -> Self {
        Self { client }
    }

    /// Authenticate with Basic credentials and return the session cookie.
    ///
    /// Succeeds only on 200 with `authenticated: true` and a non-empty
    /// `JSESSIONID` cookie.
    pub async fn login(&self) -> Result<Session, ClientError> {
        let response = self
            .client
            .credentialed(Method::GET, "/session")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Login rejected");
            return Err(ClientError::AuthenticationFailed { status, body });
        }

        let token = response
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string());

        let body: SessionResponse = response.json().await?;
        if !body.authenticated {
            tracing::warn!("Server reported unauthenticated session");
            return Err(ClientError::NotAuthenticated);
        }

        match token {
            Some(token) if !token.is_empty() => {
                tracing::info!("Logged in");
                Ok(Session::new(token))
            }
            _ => Err(ClientError::MissingSessionCookie),
        }
    }

    /// End the session. Anything but 204 is reported as `Rejected`; callers
    /// treat this as best-effort cleanup.
    pub async fn logout(&self, session: &Session) -> Result<(), ClientError> {
        let response = self
            .client
            .request(session, Method::DELETE, "/session")
            .send()
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            tracing::info!("Logged out");
            Ok(())
        } else {
            Err(ClientError::rejected("logging out", response).await)
        }
    }
}
