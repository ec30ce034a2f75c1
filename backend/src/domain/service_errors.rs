//! Mapping from value-object and port failures to domain [`Error`]s.

use std::fmt;

use serde_json::json;
use tracing::debug;

use super::Error;
use super::PetIdentifierGenerationError;
use super::ports::RepositoryError;
use super::value_object::ValueObjectError;

/// Unwrap a required input or report it as absent.
pub(super) fn required<T>(field: &'static str, value: Option<T>) -> Result<T, Error> {
    value.ok_or_else(|| missing_field(field))
}

fn missing_field(field: &'static str) -> Error {
    Error::invalid_request(format!("{field} must not be absent")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

/// Report a value object that rejected the input for `field`.
pub(super) fn invalid_field(field: &'static str, error: ValueObjectError) -> Error {
    match error {
        ValueObjectError::NullArgument { .. } => missing_field(field),
        ValueObjectError::Configuration { kind, message } => {
            Error::internal(format!("{kind} is misconfigured: {message}"))
        }
        ValueObjectError::Validation(validation) => {
            Error::invalid_request(validation.message().to_owned()).with_details(json!({
                "field": field,
                "kind": validation.kind(),
                "stage": validation.stage().as_str(),
            }))
        }
    }
}

/// Report an input that does not name a known enumeration member.
pub(super) fn invalid_choice(field: &'static str, error: impl fmt::Display) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field,
        "code": "invalid_choice",
    }))
}

/// Report a pet identifier that could not be generated.
pub(super) fn map_generation_error(error: PetIdentifierGenerationError) -> Error {
    match error {
        PetIdentifierGenerationError::InvalidDate { .. }
        | PetIdentifierGenerationError::YearOutOfRange { .. } => {
            Error::invalid_request(error.to_string()).with_details(json!({
                "field": "birthDate",
                "code": "unencodable_birth_date",
            }))
        }
        PetIdentifierGenerationError::UniqueNumberOutOfRange { .. }
        | PetIdentifierGenerationError::Rejected(_) => {
            Error::internal(format!("pet identifier generation failed: {error}"))
        }
    }
}

/// Map a repository failure for the named entity kind.
pub(super) fn map_repository_error(entity: &'static str, error: RepositoryError) -> Error {
    debug!(entity, error = %error, "repository call failed");
    match error {
        RepositoryError::Connection { message } => {
            Error::service_unavailable(format!("{entity} repository unavailable: {message}"))
        }
        RepositoryError::Conflict { message } => {
            Error::conflict(format!("{entity} already exists")).with_details(json!({
                "code": "duplicate_key",
                "reason": message,
            }))
        }
        RepositoryError::Query { message } => {
            Error::internal(format!("{entity} repository error: {message}"))
        }
        RepositoryError::CorruptRecord { message } => {
            Error::internal(format!("stored {entity} is invalid: {message}"))
        }
    }
}

/// Standard not-found failure naming the missing identifier.
pub(super) fn entity_not_found(id: impl fmt::Display) -> Error {
    Error::not_found(format!("Entity not found: {id}"))
}
