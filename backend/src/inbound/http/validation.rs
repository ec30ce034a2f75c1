//! Shared parsing helpers for inbound HTTP adapters.
//!
//! These cover the transport-level formats (UUID path segments, flexible
//! dates and instants). Value-object validation happens in the domain.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use crate::domain::Error;
use crate::inbound::http::flexible_time::{parse_date, parse_instant};

/// Machine-readable codes for transport-level failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureCode {
    InvalidUuid,
    InvalidDate,
    InvalidTimestamp,
}

impl FailureCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidDate => "invalid_date",
            Self::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

/// Field name as clients spell it in requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }
}

fn failure(field: FieldName, code: FailureCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.0,
        "value": value,
        "code": code.as_str(),
    }))
}

/// Parse a UUID-backed identifier such as [`crate::domain::OwnerId`].
pub(crate) fn parse_id<T>(value: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr,
{
    value.trim().parse::<T>().map_err(|_| {
        failure(
            field,
            FailureCode::InvalidUuid,
            format!("{} must be a valid UUID", field.0),
            value,
        )
    })
}

/// Parse an optional identifier, keeping absence for the domain to report.
pub(crate) fn parse_optional_id<T>(value: Option<String>, field: FieldName) -> Result<Option<T>, Error>
where
    T: FromStr,
{
    value.map(|raw| parse_id(&raw, field)).transpose()
}

/// Parse an optional date in any layout accepted by
/// [`crate::inbound::http::flexible_time::parse_date`].
pub(crate) fn parse_optional_date(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    value
        .map(|raw| {
            parse_date(&raw).map_err(|err| failure(field, FailureCode::InvalidDate, err.to_string(), &raw))
        })
        .transpose()
}

/// Parse an optional instant in any layout accepted by
/// [`crate::inbound::http::flexible_time::parse_instant`].
pub(crate) fn parse_optional_instant(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| {
            parse_instant(&raw)
                .map_err(|err| failure(field, FailureCode::InvalidTimestamp, err.to_string(), &raw))
        })
        .transpose()
}
