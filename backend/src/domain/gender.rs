//! Biological sex of a pet, encoded as one digit inside a pet identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Two-valued gender with a stable numeric code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    /// Code `1`.
    Male,
    /// Code `2`.
    Female,
}

/// Raised when a numeric code or a name does not map to a [`Gender`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenderError {
    /// Unknown numeric code.
    #[error("Invalid gender code: {code}")]
    InvalidCode { code: u8 },
    /// Unknown name.
    #[error("Invalid gender: {value}")]
    InvalidName { value: String },
}

impl Gender {
    /// Numeric code embedded in pet identifiers.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Male => 1,
            Self::Female => 2,
        }
    }

    /// Look up a gender by numeric code.
    ///
    /// # Errors
    /// Returns [`GenderError::InvalidCode`] for anything but `1` or `2`.
    ///
    /// # Examples
    /// ```
    /// use petclinic::domain::Gender;
    ///
    /// assert_eq!(Gender::from_code(2), Ok(Gender::Female));
    /// assert!(Gender::from_code(3).is_err());
    /// ```
    pub const fn from_code(code: u8) -> Result<Self, GenderError> {
        match code {
            1 => Ok(Self::Male),
            2 => Ok(Self::Female),
            _ => Err(GenderError::InvalidCode { code }),
        }
    }

    /// Upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = GenderError;

    /// Case-insensitive parse of `MALE` or `FEMALE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Male, Self::Female]
            .into_iter()
            .find(|gender| gender.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GenderError::InvalidName {
                value: s.to_owned(),
            })
    }
}
