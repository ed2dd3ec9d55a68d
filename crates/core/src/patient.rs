//! Patient and identifier payloads for `POST /patient`

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier details collected at the prompt.
///
/// `location` is a location *name*; it is resolved to a reference before
/// the identifier is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierInput {
    pub identifier: String,
    pub location: String,
    pub preferred: bool,
}

impl IdentifierInput {
    /// Build from raw text. Only a literal `true` (any case) marks the
    /// identifier as preferred.
    pub fn parse(identifier: &str, location: &str, preferred: &str) -> Result<Self, ValidationError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ValidationError::Required("identifier"));
        }
        let location = location.trim();
        if location.is_empty() {
            return Err(ValidationError::Required("location"));
        }

        Ok(Self {
            identifier: identifier.to_string(),
            location: location.to_string(),
            preferred: preferred.trim().eq_ignore_ascii_case("true"),
        })
    }
}

/// A patient identifier as sent to the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewIdentifier {
    pub identifier: String,
    pub identifier_type: String,
    pub location: String,
    pub preferred: bool,
}

impl NewIdentifier {
    pub fn new(input: &IdentifierInput, identifier_type: &str, location_uuid: &str) -> Self {
        Self {
            identifier: input.identifier.clone(),
            identifier_type: identifier_type.to_string(),
            location: location_uuid.to_string(),
            preferred: input.preferred,
        }
    }
}

/// Request body for `POST /patient`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPatient {
    pub person: String,
    pub identifiers: Vec<NewIdentifier>,
}
