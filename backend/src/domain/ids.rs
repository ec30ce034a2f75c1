//! Surrogate identifiers for clinic entities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

define_entity_id! {
    /// Identifier of a registered owner.
    OwnerId
}

define_entity_id! {
    /// Surrogate key of a registered pet. The business key is the
    /// [`PetIdentifier`](super::PetIdentifier).
    PetId
}

define_entity_id! {
    /// Identifier of a recorded visit.
    VisitId
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn ids_parse_and_display_as_uuids() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let id: OwnerId = raw.parse().expect("valid uuid");
        assert_eq!(id.to_string(), raw);
        assert!("not-a-uuid".parse::<PetId>().is_err());
    }

    #[rstest]
    fn ids_serialise_transparently() {
        let id = VisitId::from_uuid(Uuid::nil());
        let json = serde_json::to_string(&id).expect("serialise");
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }
}
