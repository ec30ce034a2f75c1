//! Port for pet persistence.

use async_trait::async_trait;

use crate::domain::{OwnerId, Pet, PetId, PetIdentifier};

use super::RepositoryError;

/// Storage for [`Pet`] aggregates.
///
/// Adapters enforce that pet identifiers are unique. Saving a different pet
/// under an identifier that is already taken fails with
/// [`RepositoryError::Conflict`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Insert or replace a pet.
    async fn save(&self, pet: &Pet) -> Result<(), RepositoryError>;

    /// Fetch a pet by surrogate key.
    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, RepositoryError>;

    /// Fetch a pet by its business identifier.
    async fn find_by_identifier(
        &self,
        identifier: &PetIdentifier,
    ) -> Result<Option<Pet>, RepositoryError>;

    /// Pets whose name matches exactly.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Pet>, RepositoryError>;

    /// Pets belonging to an owner.
    async fn find_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<Pet>, RepositoryError>;

    /// Every stored pet.
    async fn find_all(&self) -> Result<Vec<Pet>, RepositoryError>;
}
