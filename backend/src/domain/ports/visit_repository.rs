//! Port for visit persistence.

use async_trait::async_trait;

use crate::domain::{PetIdentifier, Visit, VisitId};

use super::RepositoryError;

/// Storage for [`Visit`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Insert or replace a visit.
    async fn save(&self, visit: &Visit) -> Result<(), RepositoryError>;

    /// Fetch a visit by identifier.
    async fn find_by_id(&self, id: &VisitId) -> Result<Option<Visit>, RepositoryError>;

    /// Visits recorded against a pet, oldest first.
    async fn find_by_pet_identifier(
        &self,
        identifier: &PetIdentifier,
    ) -> Result<Vec<Visit>, RepositoryError>;

    /// Every stored visit, oldest first.
    async fn find_all(&self) -> Result<Vec<Visit>, RepositoryError>;
}
