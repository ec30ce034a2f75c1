//! Self-validating value objects.
//!
//! A value object wraps exactly one immutable primitive. Construction runs a
//! fixed pipeline and either yields a fully valid instance or fails:
//!
//! 1. bound declaration check (contradictory bounds are a configuration
//!    error);
//! 2. range check against the declared inclusive or exclusive bounds;
//! 3. the type's [`ValueRules::validate`] hook. String types route this hook
//!    through [`validate_string`], which adds length, lexical, syntax and
//!    semantic stages.
//!
//! Rules live on a zero-sized marker type implementing [`ValueRules`], so two
//! value types over the same primitive are distinct, incomparable Rust types.

mod error;
mod range;
mod string;
mod text;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use error::{ValidationError, ValidationStage, ValueObjectError};
pub use range::RangeBounds;
pub use string::{RegexRule, StringRules, TRUNCATE_LENGTH, validate_string};
pub use text::truncate;

/// Capability implemented by value-object marker types.
///
/// Every hook has a permissive default.
pub trait ValueRules {
    /// Wrapped primitive with a natural ordering.
    type Primitive: Ord + Clone + fmt::Debug + fmt::Display;

    /// Human readable name used in error messages.
    const KIND: &'static str;

    /// Smallest accepted value.
    fn inclusive_min() -> Option<Self::Primitive> {
        None
    }

    /// Values must be strictly greater than this.
    fn exclusive_min() -> Option<Self::Primitive> {
        None
    }

    /// Largest accepted value.
    fn inclusive_max() -> Option<Self::Primitive> {
        None
    }

    /// Values must be strictly smaller than this.
    fn exclusive_max() -> Option<Self::Primitive> {
        None
    }

    /// Type-specific validation run after the range check.
    ///
    /// # Errors
    /// Returns the first failing rule.
    fn validate(_value: &Self::Primitive) -> Result<(), ValueObjectError> {
        Ok(())
    }
}

/// Immutable, validated wrapper around one primitive.
///
/// Equality, hashing and ordering are those of the primitive.
///
/// # Examples
/// ```
/// use petclinic::domain::value_object::{ValueObject, ValueRules};
///
/// struct Percentage;
///
/// impl ValueRules for Percentage {
///     type Primitive = u8;
///     const KIND: &'static str = "percentage";
///
///     fn inclusive_max() -> Option<u8> {
///         Some(100)
///     }
/// }
///
/// let half = ValueObject::<Percentage>::new(50).expect("in range");
/// assert_eq!(*half.primitive(), 50);
/// assert!(ValueObject::<Percentage>::new(101).is_err());
/// ```
pub struct ValueObject<R: ValueRules> {
    primitive: R::Primitive,
    rules: PhantomData<fn() -> R>,
}

impl<R: ValueRules> ValueObject<R> {
    /// Validate and wrap `primitive`.
    ///
    /// # Errors
    /// Returns [`ValueObjectError::Configuration`] for contradictory bounds,
    /// or [`ValueObjectError::Validation`] naming the failing stage.
    pub fn new(primitive: R::Primitive) -> Result<Self, ValueObjectError> {
        RangeBounds::from_rules::<R>()?.check(R::KIND, &primitive)?;
        R::validate(&primitive)?;
        Ok(Self {
            primitive,
            rules: PhantomData,
        })
    }

    /// Validate an optional input, treating `None` as a null argument.
    ///
    /// # Errors
    /// Returns [`ValueObjectError::NullArgument`] for `None`, otherwise see
    /// [`ValueObject::new`].
    pub fn from_option(primitive: Option<R::Primitive>) -> Result<Self, ValueObjectError> {
        let primitive = primitive.ok_or(ValueObjectError::NullArgument { kind: R::KIND })?;
        Self::new(primitive)
    }

    /// Borrow the wrapped primitive.
    #[must_use]
    pub fn primitive(&self) -> &R::Primitive {
        &self.primitive
    }

    /// Consume the wrapper, returning the primitive.
    #[must_use]
    pub fn into_primitive(self) -> R::Primitive {
        self.primitive
    }
}

impl<R: StringRules> ValueObject<R> {
    /// Borrow the wrapped string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.primitive.as_str()
    }
}

impl<R: StringRules> AsRef<str> for ValueObject<R> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<R: ValueRules> Clone for ValueObject<R> {
    fn clone(&self) -> Self {
        Self {
            primitive: self.primitive.clone(),
            rules: PhantomData,
        }
    }
}

impl<R: ValueRules> fmt::Debug for ValueObject<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(R::KIND).field(&self.primitive).finish()
    }
}

impl<R: ValueRules> fmt::Display for ValueObject<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.primitive, f)
    }
}

impl<R: ValueRules> PartialEq for ValueObject<R> {
    fn eq(&self, other: &Self) -> bool {
        self.primitive == other.primitive
    }
}

impl<R: ValueRules> Eq for ValueObject<R> {}

impl<R: ValueRules> PartialOrd for ValueObject<R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R: ValueRules> Ord for ValueObject<R> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primitive.cmp(&other.primitive)
    }
}

impl<R> Hash for ValueObject<R>
where
    R: ValueRules,
    R::Primitive: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.primitive.hash(state);
    }
}

impl<R> Serialize for ValueObject<R>
where
    R: ValueRules,
    R::Primitive: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.primitive.serialize(serializer)
    }
}

impl<'de, R> Deserialize<'de> for ValueObject<R>
where
    R: ValueRules,
    R::Primitive: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let primitive = R::Primitive::deserialize(deserializer)?;
        Self::new(primitive).map_err(serde::de::Error::custom)
    }
}
