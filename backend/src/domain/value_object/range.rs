//! Inclusive and exclusive bounds over a naturally ordered primitive.

use std::fmt::Display;

use super::{ValidationError, ValidationStage, ValueObjectError, ValueRules};

/// Resolved bounds for one value type.
///
/// ## Invariants
/// - At most one of `inclusive_min` and `exclusive_min` is set.
/// - At most one of `inclusive_max` and `exclusive_max` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeBounds<P> {
    inclusive_min: Option<P>,
    exclusive_min: Option<P>,
    inclusive_max: Option<P>,
    exclusive_max: Option<P>,
}

impl<P> RangeBounds<P>
where
    P: Ord + Display,
{
    /// Validate a bound declaration.
    ///
    /// # Errors
    /// Returns [`ValueObjectError::Configuration`] when both an inclusive and
    /// an exclusive bound are declared on the same side.
    pub fn new(
        kind: &'static str,
        inclusive_min: Option<P>,
        exclusive_min: Option<P>,
        inclusive_max: Option<P>,
        exclusive_max: Option<P>,
    ) -> Result<Self, ValueObjectError> {
        if let (Some(inclusive), Some(exclusive)) = (&inclusive_min, &exclusive_min) {
            return Err(mutually_exclusive(kind, "Min", inclusive, exclusive));
        }
        if let (Some(inclusive), Some(exclusive)) = (&inclusive_max, &exclusive_max) {
            return Err(mutually_exclusive(kind, "Max", inclusive, exclusive));
        }
        Ok(Self {
            inclusive_min,
            exclusive_min,
            inclusive_max,
            exclusive_max,
        })
    }

    /// Read the bounds declared by a value type.
    ///
    /// # Errors
    /// See [`RangeBounds::new`].
    pub fn from_rules<R>() -> Result<Self, ValueObjectError>
    where
        R: ValueRules<Primitive = P>,
    {
        Self::new(
            R::KIND,
            R::inclusive_min(),
            R::exclusive_min(),
            R::inclusive_max(),
            R::exclusive_max(),
        )
    }

    /// Check `value` against every declared bound.
    ///
    /// # Errors
    /// Returns a [`ValidationStage::Range`] failure for the first violated
    /// bound.
    pub fn check(&self, kind: &'static str, value: &P) -> Result<(), ValidationError> {
        if let Some(min) = &self.inclusive_min {
            if value < min {
                return Err(below(kind, value, min));
            }
        }
        if let Some(min) = &self.exclusive_min {
            if value <= min {
                return Err(below(kind, value, min));
            }
        }
        if let Some(max) = &self.inclusive_max {
            if value > max {
                return Err(above(kind, value, max));
            }
        }
        if let Some(max) = &self.exclusive_max {
            if value >= max {
                return Err(above(kind, value, max));
            }
        }
        Ok(())
    }
}

fn mutually_exclusive<P: Display>(
    kind: &'static str,
    side: &str,
    inclusive: &P,
    exclusive: &P,
) -> ValueObjectError {
    ValueObjectError::Configuration {
        kind,
        message: format!(
            "Both inclusive{side} '{inclusive}' and exclusive{side} '{exclusive}' are set. \
             They are mutually exclusive."
        ),
    }
}

fn below<P: Display>(kind: &'static str, value: &P, min: &P) -> ValidationError {
    ValidationError::new(
        kind,
        ValidationStage::Range,
        format!("Value '{value}' is below the allowed minimum '{min}'"),
    )
}

fn above<P: Display>(kind: &'static str, value: &P, max: &P) -> ValidationError {
    ValidationError::new(
        kind,
        ValidationStage::Range,
        format!("Value '{value}' is above the allowed maximum '{max}'"),
    )
}
