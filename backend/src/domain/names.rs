//! Free-text names: people, addresses, pets and breeds.
//!
//! These share one rule set. Control characters are rejected at the lexical
//! stage, and blank or whitespace-padded values at the syntax stage.

use super::value_object::{ValidationError, ValidationStage};

fn reject_control_characters(kind: &'static str, value: &str) -> Result<(), ValidationError> {
    match value.chars().find(|c| c.is_control()) {
        None => Ok(()),
        Some(c) => Err(ValidationError::new(
            kind,
            ValidationStage::Lexical,
            format!("{kind} must not contain control characters, found {c:?}"),
        )),
    }
}

fn reject_blank_or_padded(kind: &'static str, value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(
            kind,
            ValidationStage::Syntax,
            format!("{kind} must not be blank"),
        ));
    }
    if trimmed.len() != value.len() {
        return Err(ValidationError::new(
            kind,
            ValidationStage::Syntax,
            format!("{kind} must not start or end with whitespace"),
        ));
    }
    Ok(())
}

macro_rules! define_text_value {
    (
        $(#[$meta:meta])*
        $name:ident, $rules:ident, $kind:literal, $min:literal ..= $max:literal
    ) => {
        #[doc = concat!("Rules for [`", stringify!($name), "`].")]
        pub struct $rules;

        impl $crate::domain::value_object::ValueRules for $rules {
            type Primitive = String;
            const KIND: &'static str = $kind;

            fn validate(
                value: &String,
            ) -> Result<(), $crate::domain::value_object::ValueObjectError> {
                $crate::domain::value_object::validate_string::<Self>(value)
            }
        }

        impl $crate::domain::value_object::StringRules for $rules {
            const MIN_LENGTH: usize = $min;
            const MAX_LENGTH: usize = $max;

            fn validate_lexical_content(value: &str) -> Result<(), ValidationError> {
                reject_control_characters($kind, value)
            }

            fn validate_syntax(value: &str) -> Result<(), ValidationError> {
                reject_blank_or_padded($kind, value)
            }
        }

        $(#[$meta])*
        pub type $name = $crate::domain::value_object::ValueObject<$rules>;
    };
}

define_text_value! {
    /// An owner's first or last name.
    ///
    /// # Examples
    /// ```
    /// use petclinic::domain::PersonName;
    ///
    /// assert!(PersonName::new("Ada".to_owned()).is_ok());
    /// assert!(PersonName::new(" Ada".to_owned()).is_err());
    /// ```
    PersonName, PersonNameRules, "person name", 1..=64
}

define_text_value! {
    /// Street address or city line.
    AddressLine, AddressLineRules, "address line", 1..=128
}

define_text_value! {
    /// A pet's given name.
    PetName, PetNameRules, "pet name", 1..=64
}

define_text_value! {
    /// Breed within a pet type, e.g. `Labrador`.
    Breed, BreedRules, "breed", 1..=64
}
