//! Driving port for read-only clinic queries.

use async_trait::async_trait;

use crate::domain::{Error, Owner, OwnerId, Pet, PetId, Visit, VisitId};

/// Optional filters for [`ClinicQuery::pets`]. Set filters are combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetFilter {
    pub owner_id: Option<OwnerId>,
    pub name: Option<String>,
}

/// Use-case port for reading owners, pets and visits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClinicQuery: Send + Sync {
    /// Fetch one owner, failing with `NotFound` when absent.
    async fn owner(&self, id: OwnerId) -> Result<Owner, Error>;

    /// List owners, optionally restricted to one last name.
    async fn owners(&self, last_name: Option<String>) -> Result<Vec<Owner>, Error>;

    /// Fetch one pet, failing with `NotFound` when absent.
    async fn pet(&self, id: PetId) -> Result<Pet, Error>;

    /// Fetch one pet by its identifier text. Malformed identifiers are
    /// invalid requests.
    async fn pet_by_identifier(&self, identifier: String) -> Result<Pet, Error>;

    /// List pets matching `filter`.
    async fn pets(&self, filter: PetFilter) -> Result<Vec<Pet>, Error>;

    /// Fetch one visit, failing with `NotFound` when absent.
    async fn visit(&self, id: VisitId) -> Result<Visit, Error>;

    /// List visits, optionally restricted to one pet identifier.
    async fn visits(&self, pet_identifier: Option<String>) -> Result<Vec<Visit>, Error>;
}
