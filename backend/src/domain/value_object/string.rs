//! String specialisation: length, lexical, syntax and semantic stages.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::{ValidationError, ValidationStage, ValueObjectError, ValueRules, truncate};

/// Preview width used in length failures.
pub const TRUNCATE_LENGTH: usize = 64;

const REGEX_PREVIEW_LENGTH: usize = 16;

/// Stage hooks for string value objects. Every stage defaults to a no-op so
/// a concrete type overrides only what it needs.
///
/// Implementors route [`ValueRules::validate`] through [`validate_string`].
pub trait StringRules: ValueRules<Primitive = String> {
    /// Inclusive minimum character count.
    const MIN_LENGTH: usize = 0;
    /// Inclusive maximum character count.
    const MAX_LENGTH: usize = usize::MAX;

    /// Reject disallowed character classes.
    ///
    /// # Errors
    /// Returns a [`ValidationStage::Lexical`] failure.
    fn validate_lexical_content(_value: &str) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Enforce a pattern or structural grammar.
    ///
    /// # Errors
    /// Returns a [`ValidationStage::Syntax`] failure.
    fn validate_syntax(_value: &str) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Enforce rules relating several parts of an already well-formed value.
    ///
    /// # Errors
    /// Returns a [`ValidationStage::Semantics`] failure.
    fn validate_semantics(_value: &str) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Run length, lexical, syntax and semantic checks in that order, stopping
/// at the first failure.
///
/// # Errors
/// Propagates the failure of the first stage that rejects `value`.
pub fn validate_string<R: StringRules>(value: &str) -> Result<(), ValueObjectError> {
    validate_length::<R>(value)?;
    R::validate_lexical_content(value)?;
    R::validate_syntax(value)?;
    R::validate_semantics(value)?;
    Ok(())
}

fn validate_length<R: StringRules>(value: &str) -> Result<(), ValidationError> {
    let length = value.chars().count();
    if (R::MIN_LENGTH..=R::MAX_LENGTH).contains(&length) {
        return Ok(());
    }
    Err(ValidationError::new(
        R::KIND,
        ValidationStage::Length,
        format!(
            "Length of [{}] must be between [{}] and [{}], but was [{length}]",
            truncate(value, TRUNCATE_LENGTH, true),
            R::MIN_LENGTH,
            R::MAX_LENGTH,
        ),
    ))
}

/// A regular expression compiled on first use, suitable for `static` items.
///
/// # Examples
/// ```
/// use petclinic::domain::value_object::RegexRule;
///
/// static DIGITS: RegexRule = RegexRule::new(r"^\d+$");
/// assert!(DIGITS.is_match("0042"));
/// assert!(DIGITS.check("counter", "4x2").is_err());
/// ```
pub struct RegexRule {
    pattern: &'static str,
    compiled: OnceLock<Regex>,
}

impl RegexRule {
    /// Declare a rule; the pattern is compiled lazily.
    #[must_use]
    pub const fn new(pattern: &'static str) -> Self {
        Self {
            pattern,
            compiled: OnceLock::new(),
        }
    }

    /// Source pattern.
    #[must_use]
    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    fn regex(&self) -> &Regex {
        self.compiled.get_or_init(|| {
            Regex::new(self.pattern).unwrap_or_else(|error| {
                panic!("regex {:?} failed to compile: {error}", self.pattern)
            })
        })
    }

    /// Whether `value` matches the pattern.
    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        self.regex().is_match(value)
    }

    /// Capture groups for `value`, if it matches.
    #[must_use]
    pub fn captures<'h>(&self, value: &'h str) -> Option<Captures<'h>> {
        self.regex().captures(value)
    }

    /// Syntax-stage check with the standard failure message.
    ///
    /// # Errors
    /// Returns a [`ValidationStage::Syntax`] failure when `value` does not
    /// match.
    pub fn check(&self, kind: &'static str, value: &str) -> Result<(), ValidationError> {
        if self.is_match(value) {
            return Ok(());
        }
        Err(ValidationError::new(
            kind,
            ValidationStage::Syntax,
            format!(
                "String '{}' does not match the required regex pattern: {}",
                truncate(value, REGEX_PREVIEW_LENGTH, true),
                self.pattern
            ),
        ))
    }
}
