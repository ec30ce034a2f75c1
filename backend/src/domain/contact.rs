//! Owner contact details: telephone number and email address.

use super::value_object::{
    RegexRule, StringRules, ValidationError, ValueObject, ValueObjectError, ValueRules,
    validate_string,
};

/// Local (`123-456-7890`) and international (`+47 1234 5678`) numbers.
static TELEPHONE_SYNTAX: RegexRule = RegexRule::new(
    r"^(\+?[0-9]{1,4})?([ .-]?\(?[0-9]{2,4}\)?)?[ .-]?[0-9]{3,4}[ .-]?[0-9]{3,4}$",
);

/// The local part may neither start nor end with a dot.
static EMAIL_SYNTAX: RegexRule = RegexRule::new(
    r"(?i)^[a-z0-9_%+-](?:[a-z0-9._%+-]*[a-z0-9_%+-])?@[a-z0-9.-]+\.[a-z]{2,}$",
);

/// Rules for [`TelephoneNumber`].
pub struct TelephoneNumberRules;

impl ValueRules for TelephoneNumberRules {
    type Primitive = String;
    const KIND: &'static str = "telephone number";

    fn validate(value: &String) -> Result<(), ValueObjectError> {
        validate_string::<Self>(value)
    }
}

impl StringRules for TelephoneNumberRules {
    const MIN_LENGTH: usize = 7;
    const MAX_LENGTH: usize = 15;

    fn validate_syntax(value: &str) -> Result<(), ValidationError> {
        TELEPHONE_SYNTAX.check(Self::KIND, value)
    }
}

/// Telephone number between 7 and 15 characters.
///
/// # Examples
/// ```
/// use petclinic::domain::TelephoneNumber;
///
/// assert!(TelephoneNumber::new("123-456-7890".to_owned()).is_ok());
/// assert!(TelephoneNumber::new("call me".to_owned()).is_err());
/// ```
pub type TelephoneNumber = ValueObject<TelephoneNumberRules>;

/// Rules for [`EmailAddress`].
pub struct EmailAddressRules;

impl ValueRules for EmailAddressRules {
    type Primitive = String;
    const KIND: &'static str = "email address";

    fn validate(value: &String) -> Result<(), ValueObjectError> {
        validate_string::<Self>(value)
    }
}

impl StringRules for EmailAddressRules {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 254;

    fn validate_syntax(value: &str) -> Result<(), ValidationError> {
        EMAIL_SYNTAX.check(Self::KIND, value)
    }
}

/// Case-insensitive email address of at most 254 characters.
pub type EmailAddress = ValueObject<EmailAddressRules>;
