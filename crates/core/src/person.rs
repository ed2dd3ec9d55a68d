//! Person payloads for `POST /person`

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Administrative gender as OpenMRS encodes it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "M" | "MALE" => Ok(Gender::Male),
            "F" | "FEMALE" => Ok(Gender::Female),
            _ => Err(ValidationError::Gender(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.write_str("M"),
            Gender::Female => f.write_str("F"),
        }
    }
}

/// Address fields collected at the prompt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressInput {
    pub address1: String,
    pub city_village: String,
    pub country: String,
    pub postal_code: String,
}

/// Everything needed to create a Person, already parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonInput {
    pub given_name: String,
    pub family_name: String,
    pub gender: Gender,
    pub birthdate: NaiveDate,
    pub address: AddressInput,
}

impl PersonInput {
    /// Build a person from raw text fields.
    ///
    /// Names must be non-empty; gender accepts `M`/`F` (case-insensitive)
    /// and the birthdate must be an ISO calendar date.
    pub fn parse(
        given_name: &str,
        family_name: &str,
        gender: &str,
        birthdate: &str,
        address: AddressInput,
    ) -> Result<Self, ValidationError> {
        let given_name = given_name.trim();
        if given_name.is_empty() {
            return Err(ValidationError::Required("given name"));
        }
        let family_name = family_name.trim();
        if family_name.is_empty() {
            return Err(ValidationError::Required("family name"));
        }

        let gender: Gender = gender.parse()?;
        let birthdate = NaiveDate::parse_from_str(birthdate.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::Birthdate(birthdate.trim().to_string()))?;

        Ok(Self {
            given_name: given_name.to_string(),
            family_name: family_name.to_string(),
            gender,
            birthdate,
            address,
        })
    }

    /// Convert to the wire payload
    pub fn to_payload(&self) -> NewPerson {
        NewPerson {
            names: vec![PersonName {
                given_name: self.given_name.clone(),
                family_name: self.family_name.clone(),
            }],
            gender: self.gender,
            birthdate: self.birthdate,
            addresses: vec![PersonAddress {
                address1: self.address.address1.clone(),
                city_village: self.address.city_village.clone(),
                country: self.address.country.clone(),
                postal_code: self.address.postal_code.clone(),
            }],
        }
    }
}

/// Request body for `POST /person`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPerson {
    pub names: Vec<PersonName>,
    pub gender: Gender,
    pub birthdate: NaiveDate,
    pub addresses: Vec<PersonAddress>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    pub given_name: String,
    pub family_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonAddress {
    pub address1: String,
    pub city_village: String,
    pub country: String,
    pub postal_code: String,
}
