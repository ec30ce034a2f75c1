//! Errors raised while constructing value objects.

use std::fmt;

/// Pipeline stage that rejected a candidate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationStage {
    /// Declared inclusive or exclusive bounds.
    Range,
    /// Minimum and maximum character count.
    Length,
    /// Character-set rules.
    Lexical,
    /// Pattern or structural grammar.
    Syntax,
    /// Business rules spanning several parts of the value.
    Semantics,
}

impl ValidationStage {
    /// Stable snake-case label used in error details.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Range => "range",
            Self::Length => "length",
            Self::Lexical => "lexical",
            Self::Syntax => "syntax",
            Self::Semantics => "semantics",
        }
    }
}

impl fmt::Display for ValidationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate value rejected by one stage of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    kind: &'static str,
    stage: ValidationStage,
    message: String,
}

impl ValidationError {
    /// Create a validation failure for the named value kind.
    pub fn new(kind: &'static str, stage: ValidationStage, message: impl Into<String>) -> Self {
        Self {
            kind,
            stage,
            message: message.into(),
        }
    }

    /// Human readable value kind, e.g. `"pet identifier"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Stage that produced the failure.
    #[must_use]
    pub fn stage(&self) -> ValidationStage {
        self.stage
    }

    /// Failure description. Long inputs only ever appear truncated.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Construction failures for any [`ValueObject`](super::ValueObject).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
    /// The raw value was absent.
    #[error("{kind} must not be absent")]
    NullArgument { kind: &'static str },
    /// The value type declares contradictory bounds. This is a programming
    /// defect rather than bad input.
    #[error("{kind} is misconfigured: {message}")]
    Configuration { kind: &'static str, message: String },
    /// The raw value failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ValueObjectError {
    /// Value kind the error relates to.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NullArgument { kind } | Self::Configuration { kind, .. } => kind,
            Self::Validation(error) => error.kind(),
        }
    }

    /// Failing stage when the error is a validation failure.
    #[must_use]
    pub fn stage(&self) -> Option<ValidationStage> {
        match self {
            Self::Validation(error) => Some(error.stage()),
            Self::NullArgument { .. } | Self::Configuration { .. } => None,
        }
    }
}
