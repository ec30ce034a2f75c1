//! Port for owner persistence.

use async_trait::async_trait;

use crate::domain::{Owner, OwnerId};

use super::RepositoryError;

/// Storage for [`Owner`] aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Insert or replace an owner.
    async fn save(&self, owner: &Owner) -> Result<(), RepositoryError>;

    /// Fetch an owner by identifier.
    async fn find_by_id(&self, id: &OwnerId) -> Result<Option<Owner>, RepositoryError>;

    /// Every stored owner.
    async fn find_all(&self) -> Result<Vec<Owner>, RepositoryError>;

    /// Owners whose last name matches exactly.
    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, RepositoryError>;
}
