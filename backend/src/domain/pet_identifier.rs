//! Checksummed 16-digit pet identifier.
//!
//! Layout `YYYYMMDDGNNNNNNC`:
//!
//! | Digits     | Meaning                                        |
//! |------------|------------------------------------------------|
//! | `YYYYMMDD` | birth date, a real calendar date               |
//! | `G`        | gender code, `1` male or `2` female            |
//! | `NNNNNN`   | zero-padded unique number in `1..=100000`      |
//! | `C`        | weighted mod-11 control digit over the first 15 |
//!
//! The control digit weights digits right to left with 2, 3, 4, 5, 6, 7 and
//! then 2 again. A remainder of 10 is written as 0.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use super::Gender;
use super::value_object::{
    RegexRule, StringRules, ValidationError, ValidationStage, ValueObject, ValueObjectError,
    ValueRules, truncate, validate_string,
};

/// Total identifier length.
pub const FIXED_LENGTH: usize = 16;
/// Smallest unique number.
pub const MIN_UNIQUE_NUMBER: u32 = 1;
/// Largest unique number.
pub const MAX_UNIQUE_NUMBER: u32 = 100_000;

const BASE_LENGTH: usize = FIXED_LENGTH - 1;
const FORMAT: &str = "YYYYmmddGNNNNNNC";
const MAX_ENCODABLE_YEAR: i32 = 9999;

static PET_IDENTIFIER_SYNTAX: RegexRule =
    RegexRule::new(r"^([0-9]{4})([0-9]{2})([0-9]{2})([12])([0-9]{6})([0-9])$");

/// Range rules for the disambiguating sequence number.
pub struct UniqueNumberRules;

impl ValueRules for UniqueNumberRules {
    type Primitive = u32;
    const KIND: &'static str = "unique number";

    fn inclusive_min() -> Option<u32> {
        Some(MIN_UNIQUE_NUMBER)
    }

    fn inclusive_max() -> Option<u32> {
        Some(MAX_UNIQUE_NUMBER)
    }
}

/// Sequence number distinguishing pets sharing a birth date and gender.
pub type UniqueNumber = ValueObject<UniqueNumberRules>;

/// Pipeline rules for [`PetIdentifier`].
pub struct PetIdentifierRules;

impl ValueRules for PetIdentifierRules {
    type Primitive = String;
    const KIND: &'static str = "pet identifier";

    fn validate(value: &String) -> Result<(), ValueObjectError> {
        validate_string::<Self>(value)
    }
}

impl StringRules for PetIdentifierRules {
    const MIN_LENGTH: usize = FIXED_LENGTH;
    const MAX_LENGTH: usize = FIXED_LENGTH;

    fn validate_syntax(value: &str) -> Result<(), ValidationError> {
        if PET_IDENTIFIER_SYNTAX.is_match(value) {
            Ok(())
        } else {
            Err(syntax_error(value))
        }
    }

    fn validate_semantics(value: &str) -> Result<(), ValidationError> {
        decode(value).map(|_| ())
    }
}

/// Failures while generating an identifier from its parts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PetIdentifierGenerationError {
    /// Unique number outside `1..=100000`.
    #[error("Unique number must be between 1 and 100000, but was {value}")]
    UniqueNumberOutOfRange { value: u32 },
    /// The year, month and day do not form a calendar date.
    #[error("Invalid date provided: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    /// The year cannot be written with four digits.
    #[error("Year {year} cannot be encoded in a pet identifier")]
    YearOutOfRange { year: i32 },
    /// The assembled identifier failed validation.
    #[error(transparent)]
    Rejected(#[from] ValueObjectError),
}

/// Validated pet identifier.
///
/// ## Invariants
/// - The wrapped string is exactly 16 ASCII digits.
/// - It encodes a real birth date, a known gender and a correct control
///   digit.
///
/// # Examples
/// ```
/// use petclinic::domain::{Gender, PetIdentifier};
///
/// let id = PetIdentifier::generate(2024, 3, 12, Gender::Male, 12345).expect("valid parts");
/// assert_eq!(id.as_str(), "2024031210123457");
/// assert_eq!(PetIdentifier::of(id.as_str()), Ok(id));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PetIdentifier {
    value: ValueObject<PetIdentifierRules>,
    birth_date: NaiveDate,
    gender: Gender,
    unique_number: u32,
    control_digit: u32,
}

impl PetIdentifier {
    /// Validate an externally supplied identifier.
    ///
    /// # Errors
    /// Returns a validation error from the length, syntax or semantic stage.
    pub fn of(raw: impl Into<String>) -> Result<Self, ValueObjectError> {
        let value = ValueObject::<PetIdentifierRules>::new(raw.into())?;
        let parts = decode(value.as_str())?;
        Ok(Self {
            value,
            birth_date: parts.birth_date,
            gender: parts.gender,
            unique_number: parts.unique_number,
            control_digit: parts.control_digit,
        })
    }

    /// Build an identifier from its constituent fields.
    ///
    /// # Errors
    /// Returns [`PetIdentifierGenerationError`] when the unique number is out
    /// of range or the date is not a real, four-digit-year calendar date.
    pub fn generate(
        year: i32,
        month: u32,
        day: u32,
        gender: Gender,
        unique_number: u32,
    ) -> Result<Self, PetIdentifierGenerationError> {
        let unique_number = UniqueNumber::new(unique_number).map_err(|_| {
            PetIdentifierGenerationError::UniqueNumberOutOfRange {
                value: unique_number,
            }
        })?;
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(PetIdentifierGenerationError::InvalidDate { year, month, day });
        }
        if !(0..=MAX_ENCODABLE_YEAR).contains(&year) {
            return Err(PetIdentifierGenerationError::YearOutOfRange { year });
        }

        let base = format!(
            "{year:04}{month:02}{day:02}{}{:06}",
            gender.code(),
            unique_number.primitive()
        );
        let control = checksum(&base);
        Ok(Self::of(format!("{base}{control}"))?)
    }

    /// Build an identifier with a unique number drawn from the operating
    /// system's cryptographically secure generator.
    ///
    /// No uniqueness check happens here; persistence enforces it.
    ///
    /// # Errors
    /// See [`PetIdentifier::generate`].
    pub fn generate_random(
        year: i32,
        month: u32,
        day: u32,
        gender: Gender,
    ) -> Result<Self, PetIdentifierGenerationError> {
        let unique_number = OsRng.gen_range(MIN_UNIQUE_NUMBER..=MAX_UNIQUE_NUMBER);
        Self::generate(year, month, day, gender, unique_number)
    }

    /// Random identifier for a pet born on `birth_date`.
    ///
    /// # Errors
    /// See [`PetIdentifier::generate`].
    pub fn generate_for_birth(
        birth_date: NaiveDate,
        gender: Gender,
    ) -> Result<Self, PetIdentifierGenerationError> {
        Self::generate_random(
            birth_date.year(),
            birth_date.month(),
            birth_date.day(),
            gender,
        )
    }

    /// The 16-character code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.value.as_str()
    }

    /// Encoded birth date.
    #[must_use]
    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Encoded gender.
    #[must_use]
    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Encoded unique number.
    #[must_use]
    pub fn unique_number(&self) -> u32 {
        self.unique_number
    }

    /// Trailing control digit.
    #[must_use]
    pub fn control_digit(&self) -> u32 {
        self.control_digit
    }
}

/// Weighted mod-11 control digit for a base of decimal digits.
///
/// Characters that are not decimal digits contribute nothing; callers pass a
/// syntactically valid base.
///
/// # Examples
/// ```
/// use petclinic::domain::pet_identifier::checksum;
///
/// assert_eq!(checksum("202403121012345"), 7);
/// // A remainder of 10 is written as 0.
/// assert_eq!(checksum("202403121000013"), 0);
/// ```
#[must_use]
pub fn checksum(base: &str) -> u32 {
    let mut weight = 2;
    let mut sum = 0;
    for digit in base.chars().rev().map(|c| c.to_digit(10).unwrap_or(0)) {
        sum += digit * weight;
        weight = if weight == 7 { 2 } else { weight + 1 };
    }
    match sum % 11 {
        10 => 0,
        remainder => remainder,
    }
}

struct DecodedParts {
    birth_date: NaiveDate,
    gender: Gender,
    unique_number: u32,
    control_digit: u32,
}

fn decode(value: &str) -> Result<DecodedParts, ValidationError> {
    let captures = PET_IDENTIFIER_SYNTAX
        .captures(value)
        .ok_or_else(|| syntax_error(value))?;
    let group = |index: usize| captures.get(index).map_or("", |m| m.as_str());

    let birth_date = parse_date(group(1), group(2), group(3))
        .ok_or_else(|| date_or_gender_error(value))?;
    let gender = group(4)
        .parse::<u8>()
        .ok()
        .and_then(|code| Gender::from_code(code).ok())
        .ok_or_else(|| date_or_gender_error(value))?;
    let unique_number = group(5)
        .parse::<u32>()
        .map_err(|_| syntax_error(value))?;
    let found = group(6).parse::<u32>().map_err(|_| syntax_error(value))?;

    let expected = value.get(..BASE_LENGTH).map(checksum);
    if expected != Some(found) {
        return Err(ValidationError::new(
            PetIdentifierRules::KIND,
            ValidationStage::Semantics,
            format!(
                "Invalid control digit in PetIdentifier '{value}'. Expected: {}, Found: {found}",
                expected.unwrap_or_default()
            ),
        ));
    }

    Ok(DecodedParts {
        birth_date,
        gender,
        unique_number,
        control_digit: found,
    })
}

fn parse_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn syntax_error(value: &str) -> ValidationError {
    ValidationError::new(
        PetIdentifierRules::KIND,
        ValidationStage::Syntax,
        format!(
            "PetIdentifier '{}' does not match the required format: {FORMAT}",
            truncate(value, FIXED_LENGTH + 5, false)
        ),
    )
}

fn date_or_gender_error(value: &str) -> ValidationError {
    ValidationError::new(
        PetIdentifierRules::KIND,
        ValidationStage::Semantics,
        format!("Invalid date or gender in PetIdentifier: {value}"),
    )
}

impl fmt::Display for PetIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for PetIdentifier {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<PetIdentifier> for String {
    fn from(value: PetIdentifier) -> Self {
        value.value.into_primitive()
    }
}

impl TryFrom<String> for PetIdentifier {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::of(value)
    }
}
