//! Patient create, update and delete

use openmrs_core::{IdentifierInput, NewIdentifier, NewPatient, PersonInput};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::client::OpenMrsClient;
use crate::error::ClientError;
use crate::location::LocationResolver;
use crate::session::Session;

#[derive(Debug, Deserialize)]
struct CreatedPerson {
    uuid: String,
}

/// Writes patient records.
///
/// Takes fully-formed input; nothing here prompts.
#[derive(Debug, Clone)]
pub struct PatientWriter {
    client: OpenMrsClient,
    locations: LocationResolver,
}

impl PatientWriter {
    pub fn new(client: OpenMrsClient) -> Self {
        let locations = LocationResolver::new(client.clone());
        Self { client, locations }
    }

    /// Create a person, then a patient referencing it with one identifier.
    ///
    /// If the location cannot be resolved or the patient is rejected, the
    /// person created in the first step is deleted again before the error
    /// is returned.
    pub async fn create_patient(
        &self,
        session: &Session,
        person: &PersonInput,
        identifier: &IdentifierInput,
    ) -> Result<JsonValue, ClientError> {
        let response = self
            .client
            .request(session, Method::POST, "/person")
            .json(&person.to_payload())
            .send()
            .await?;

        if response.status() != StatusCode::CREATED {
            return Err(ClientError::rejected("creating person", response).await);
        }

        let person_uuid = response.json::<CreatedPerson>().await?.uuid;
        tracing::info!(person = %person_uuid, "Person created");

        match self.attach_patient(session, &person_uuid, identifier).await {
            Ok(patient) => {
                tracing::info!(identifier = %identifier.identifier, "Patient created");
                Ok(patient)
            }
            Err(e) => {
                self.discard_person(session, &person_uuid).await;
                Err(e)
            }
        }
    }

    async fn attach_patient(
        &self,
        session: &Session,
        person_uuid: &str,
        identifier: &IdentifierInput,
    ) -> Result<JsonValue, ClientError> {
        let location_uuid = self
            .locations
            .resolve(session, &identifier.location)
            .await?
            .ok_or_else(|| ClientError::LocationNotFound(identifier.location.clone()))?;

        // Falls back to the person reference when no identifier type is configured.
        let identifier_type = self
            .client
            .config()
            .identifier_type
            .as_deref()
            .unwrap_or(person_uuid);

        let patient = NewPatient {
            person: person_uuid.to_string(),
            identifiers: vec![NewIdentifier::new(identifier, identifier_type, &location_uuid)],
        };

        let response = self
            .client
            .request(session, Method::POST, "/patient")
            .json(&patient)
            .send()
            .await?;

        if response.status() != StatusCode::CREATED {
            return Err(ClientError::rejected("creating patient", response).await);
        }

        Ok(response.json().await?)
    }

    /// Compensating delete for a person whose patient could not be created
    async fn discard_person(&self, session: &Session, person_uuid: &str) {
        let result = self
            .client
            .request(session, Method::DELETE, &format!("/person/{person_uuid}"))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::info!(person = %person_uuid, "Removed orphaned person");
            }
            Ok(response) => {
                tracing::warn!(
                    person = %person_uuid,
                    status = %response.status(),
                    "Could not remove orphaned person"
                );
            }
            Err(e) => {
                tracing::warn!(person = %person_uuid, error = %e, "Could not remove orphaned person");
            }
        }
    }

    /// Replace a patient record; succeeds only on 200. An empty response
    /// body yields `JsonValue::Null`.
    pub async fn update_patient(
        &self,
        session: &Session,
        id: &str,
        patient: &JsonValue,
    ) -> Result<JsonValue, ClientError> {
        let response = self
            .client
            .request(session, Method::PUT, &format!("/patient/{id}"))
            .json(patient)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(ClientError::rejected("updating patient", response).await);
        }

        tracing::info!(patient = %id, "Patient updated");
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(JsonValue::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Delete a patient; succeeds only on 204
    pub async fn delete_patient(&self, session: &Session, id: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .request(session, Method::DELETE, &format!("/patient/{id}"))
            .send()
            .await?;

        if response.status() != StatusCode::NO_CONTENT {
            return Err(ClientError::rejected("deleting patient", response).await);
        }

        tracing::info!(patient = %id, "Patient deleted");
        Ok(())
    }
}
