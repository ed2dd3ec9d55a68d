//! Uniform `{status, message, ...}` result envelope
//!
//! Read operations report their outcome through an envelope instead of an
//! error: status 200 with "Successful" and the decoded data, or status 400
//! with "Failed" and an empty payload.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value as JsonValue;

pub const STATUS_SUCCESSFUL: u16 = 200;
pub const STATUS_FAILED: u16 = 400;

/// Result envelope; the payload's fields are flattened next to
/// `status` and `message`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Envelope<P> {
    pub status: u16,
    pub message: String,
    #[serde(flatten)]
    pub payload: P,
}

impl<P> Envelope<P> {
    pub fn successful(payload: P) -> Self {
        Self {
            status: STATUS_SUCCESSFUL,
            message: "Successful".to_string(),
            payload,
        }
    }

    pub fn is_successful(&self) -> bool {
        self.status == STATUS_SUCCESSFUL
    }
}

impl<P: Default> Envelope<P> {
    pub fn failed() -> Self {
        Self {
            status: STATUS_FAILED,
            message: "Failed".to_string(),
            payload: P::default(),
        }
    }
}

/// Payload of a patient search
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    pub results: Vec<JsonValue>,
}

/// Payload of the deceased listing
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DeceasedList {
    pub death: Vec<DeceasedPerson>,
}

/// A deceased person, serialized as `{"<name>": {"gender", "address"}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeceasedPerson {
    pub name: String,
    pub gender: Option<String>,
    pub address: String,
}

#[derive(Serialize)]
struct DeceasedDetails<'a> {
    gender: &'a Option<String>,
    address: &'a str,
}

impl Serialize for DeceasedPerson {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(
            &self.name,
            &DeceasedDetails {
                gender: &self.gender,
                address: &self.address,
            },
        )?;
        map.end()
    }
}
