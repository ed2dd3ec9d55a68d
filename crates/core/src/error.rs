use thiserror::Error;

/// Errors raised while turning typed-in values into request payloads
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid gender '{0}': expected M or F")]
    Gender(String),

    #[error("Invalid birthdate '{0}': expected YYYY-MM-DD")]
    Birthdate(String),

    #[error("Missing required field: {0}")]
    Required(&'static str),
}
