//! Patient search and deceased listing

use openmrs_core::{DeceasedList, DeceasedPerson, Envelope, PersonSummary, ResultList, SearchResults};
use reqwest::{Method, StatusCode};
use serde_json::Value as JsonValue;

use crate::client::OpenMrsClient;
use crate::error::ClientError;
use crate::session::Session;

/// Read-only queries over patients and persons.
///
/// Both operations answer with an [`Envelope`]; only transport failures are
/// returned as `Err`.
#[derive(Debug, Clone)]
pub struct PatientReader {
    client: OpenMrsClient,
}

impl PatientReader {
    pub fn new(client: OpenMrsClient) -> Self {
        Self { client }
    }

    /// Search patients by name, including voided records
    pub async fn fetch_by_name(
        &self,
        session: &Session,
        name: &str,
    ) -> Result<Envelope<SearchResults>, ClientError> {
        let response = self
            .client
            .request(session, Method::GET, "/patient")
            .query(&[("q", name), ("v", "default"), ("includeVoided", "true")])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(status = %status, "Patient search failed");
            return Ok(Envelope::failed());
        }

        match response.json::<ResultList<JsonValue>>().await {
            Ok(list) => {
                tracing::debug!(matches = list.results.len(), "Patient search complete");
                Ok(Envelope::successful(SearchResults {
                    results: list.results,
                }))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not decode patient search response");
                Ok(Envelope::failed())
            }
        }
    }

    /// List persons flagged dead, projected to name, gender and preferred
    /// address. Dead persons without a preferred address are skipped.
    pub async fn list_deceased(
        &self,
        session: &Session,
    ) -> Result<Envelope<DeceasedList>, ClientError> {
        let response = self
            .client
            .request(session, Method::GET, "/person")
            .query(&[("includeVoided", "true"), ("q", "all"), ("v", "default")])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(status = %status, "Person listing failed");
            return Ok(Envelope::failed());
        }

        let persons = match response.json::<ResultList<PersonSummary>>().await {
            Ok(list) => list.results,
            Err(e) => {
                tracing::warn!(error = %e, "Could not decode person listing");
                return Ok(Envelope::failed());
            }
        };

        Ok(Envelope::successful(DeceasedList {
            death: deceased(persons),
        }))
    }
}

fn deceased(persons: Vec<PersonSummary>) -> Vec<DeceasedPerson> {
    persons
        .into_iter()
        .filter(PersonSummary::is_dead)
        .filter_map(|person| {
            let Some(name) = person.display.clone() else {
                tracing::warn!(uuid = ?person.uuid, "Deceased person has no display name, skipping");
                return None;
            };
            let Some(address) = person.address_display().map(str::to_string) else {
                tracing::warn!(person = %name, "Deceased person has no preferred address, skipping");
                return None;
            };
            Some(DeceasedPerson {
                name,
                gender: person.gender,
                address,
            })
        })
        .collect()
}
