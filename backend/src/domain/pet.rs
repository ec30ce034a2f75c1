//! Registered pets.

use chrono::NaiveDate;

use super::{
    Breed, Gender, OwnerId, PetId, PetIdentifier, PetIdentifierGenerationError, PetName, PetType,
};

/// Validated details for a pet about to be registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetDraft {
    pub name: PetName,
    pub pet_type: PetType,
    pub breed: Breed,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub description: String,
    pub owner_id: OwnerId,
}

/// A pet registered with the clinic.
///
/// ## Invariants
/// - Birth date and gender are read from the [`PetIdentifier`], so they can
///   never disagree with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    id: PetId,
    identifier: PetIdentifier,
    name: PetName,
    pet_type: PetType,
    breed: Breed,
    description: String,
    owner_id: OwnerId,
}

/// Stored fields of a pet other than its keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetProfile {
    pub name: PetName,
    pub pet_type: PetType,
    pub breed: Breed,
    pub description: String,
    pub owner_id: OwnerId,
}

impl Pet {
    /// Rebuild a pet from its keys and profile.
    pub fn new(id: PetId, identifier: PetIdentifier, profile: PetProfile) -> Self {
        let PetProfile {
            name,
            pet_type,
            breed,
            description,
            owner_id,
        } = profile;
        Self {
            id,
            identifier,
            name,
            pet_type,
            breed,
            description,
            owner_id,
        }
    }

    /// Register a new pet, generating a random identifier from its birth
    /// date and gender.
    ///
    /// # Errors
    /// Returns [`PetIdentifierGenerationError`] when the birth date cannot be
    /// encoded.
    pub fn register(draft: PetDraft) -> Result<Self, PetIdentifierGenerationError> {
        let identifier = PetIdentifier::generate_for_birth(draft.birth_date, draft.gender)?;
        Ok(Self::new(
            PetId::random(),
            identifier,
            PetProfile {
                name: draft.name,
                pet_type: draft.pet_type,
                breed: draft.breed,
                description: draft.description,
                owner_id: draft.owner_id,
            },
        ))
    }

    pub fn id(&self) -> PetId {
        self.id
    }

    pub fn identifier(&self) -> &PetIdentifier {
        &self.identifier
    }

    pub fn name(&self) -> &PetName {
        &self.name
    }

    pub fn pet_type(&self) -> PetType {
        self.pet_type
    }

    pub fn breed(&self) -> &Breed {
        &self.breed
    }

    pub fn gender(&self) -> Gender {
        self.identifier.gender()
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.identifier.birth_date()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn owner_id(&self) -> OwnerId {
        self.owner_id
    }
}
