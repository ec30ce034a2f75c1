//! Clinic visits.

use chrono::{DateTime, Utc};

use super::{PetIdentifier, VisitId};

/// A visit recorded against a pet, keyed by the pet's business identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    id: VisitId,
    pet_identifier: PetIdentifier,
    time: DateTime<Utc>,
    description: String,
}

impl Visit {
    /// Rebuild a visit from stored fields.
    pub fn new(
        id: VisitId,
        pet_identifier: PetIdentifier,
        time: DateTime<Utc>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            pet_identifier,
            time,
            description: description.into(),
        }
    }

    /// Record a new visit under a fresh identifier.
    pub fn record(
        pet_identifier: PetIdentifier,
        time: DateTime<Utc>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(VisitId::random(), pet_identifier, time, description)
    }

    pub fn id(&self) -> VisitId {
        self.id
    }

    pub fn pet_identifier(&self) -> &PetIdentifier {
        &self.pet_identifier
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}
