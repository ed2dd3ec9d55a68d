//! openmrs-core: Shared OpenMRS REST types
//!
//! This crate provides the request payloads and result shapes used by the
//! OpenMRS client, including Person, Patient identifiers, list responses
//! and the result Envelope. It performs no I/O.

pub mod envelope;
pub mod error;
pub mod patient;
pub mod person;
pub mod results;

pub use envelope::{DeceasedList, DeceasedPerson, Envelope, SearchResults};
pub use error::ValidationError;
pub use patient::{IdentifierInput, NewIdentifier, NewPatient};
pub use person::{AddressInput, Gender, NewPerson, PersonAddress, PersonInput, PersonName};
pub use results::{LocationSummary, PersonSummary, PreferredAddress, ResultList};
