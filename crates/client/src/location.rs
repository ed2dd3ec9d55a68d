use openmrs_core::{LocationSummary, ResultList};
use reqwest::{Method, StatusCode};

use crate::client::OpenMrsClient;
use crate::error::ClientError;
use crate::session::Session;

/// Looks up location references by name
#[derive(Debug, Clone)]
pub struct LocationResolver {
    client: OpenMrsClient,
}

impl LocationResolver {
    pub fn new(client: OpenMrsClient) -> Self {
        Self { client }
    }

    /// Resolve a location name to its uuid.
    ///
    /// Returns `Ok(None)` when the search has no results. When several
    /// locations match, the first one is used.
    pub async fn resolve(&self, session: &Session, name: &str) -> Result<Option<String>, ClientError> {
        let response = self
            .client
            .request(session, Method::GET, "/location")
            .query(&[("q", name)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(ClientError::rejected("resolving location", response).await);
        }

        let locations: ResultList<LocationSummary> = response.json().await?;
        if locations.results.len() > 1 {
            tracing::warn!(
                location = name,
                matches = locations.results.len(),
                "Several locations match, using the first"
            );
        }

        let Some(location) = locations.first() else {
            return Ok(None);
        };
        tracing::debug!(
            location = name,
            matched = location.display.as_deref().unwrap_or(&location.uuid),
            "Resolved location"
        );
        Ok(Some(location.uuid.clone()))
    }
}
