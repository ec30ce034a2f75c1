//! Species kept by the clinic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Species of a registered pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PetType {
    Dog,
    Cat,
    Bird,
    Fish,
    Rabbit,
    Hamster,
    Turtle,
    Snake,
    Lizard,
    Horse,
    Other,
}

/// Raised when a name does not map to a [`PetType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid pet type: {value}")]
pub struct PetTypeError {
    value: String,
}

impl PetType {
    /// Every variant in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Dog,
        Self::Cat,
        Self::Bird,
        Self::Fish,
        Self::Rabbit,
        Self::Hamster,
        Self::Turtle,
        Self::Snake,
        Self::Lizard,
        Self::Horse,
        Self::Other,
    ];

    /// Upper-case name used on the wire and in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dog => "DOG",
            Self::Cat => "CAT",
            Self::Bird => "BIRD",
            Self::Fish => "FISH",
            Self::Rabbit => "RABBIT",
            Self::Hamster => "HAMSTER",
            Self::Turtle => "TURTLE",
            Self::Snake => "SNAKE",
            Self::Lizard => "LIZARD",
            Self::Horse => "HORSE",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for PetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PetType {
    type Err = PetTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pet_type| pet_type.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PetTypeError {
                value: s.to_owned(),
            })
    }
}
