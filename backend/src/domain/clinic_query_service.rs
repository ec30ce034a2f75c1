//! Read-side use cases over the clinic repositories.

use std::sync::Arc;

use async_trait::async_trait;

use super::ports::{ClinicQuery, OwnerRepository, PetFilter, PetRepository, VisitRepository};
use super::service_errors::{entity_not_found, invalid_field, map_repository_error};
use super::{Error, Owner, OwnerId, Pet, PetId, PetIdentifier, Visit, VisitId};

/// Query service implementing [`ClinicQuery`].
pub struct ClinicQueryService<O: ?Sized, P: ?Sized, V: ?Sized> {
    owners: Arc<O>,
    pets: Arc<P>,
    visits: Arc<V>,
}

impl<O: ?Sized, P: ?Sized, V: ?Sized> Clone for ClinicQueryService<O, P, V> {
    fn clone(&self) -> Self {
        Self {
            owners: Arc::clone(&self.owners),
            pets: Arc::clone(&self.pets),
            visits: Arc::clone(&self.visits),
        }
    }
}

impl<O: ?Sized, P: ?Sized, V: ?Sized> ClinicQueryService<O, P, V> {
    /// Create a service over the given repositories.
    pub fn new(owners: Arc<O>, pets: Arc<P>, visits: Arc<V>) -> Self {
        Self {
            owners,
            pets,
            visits,
        }
    }
}

/// Trim a text filter, treating blank input as no filter.
fn normalise_filter(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn parse_identifier(field: &'static str, raw: String) -> Result<PetIdentifier, Error> {
    PetIdentifier::of(raw).map_err(|e| invalid_field(field, e))
}

#[async_trait]
impl<O, P, V> ClinicQuery for ClinicQueryService<O, P, V>
where
    O: OwnerRepository + ?Sized,
    P: PetRepository + ?Sized,
    V: VisitRepository + ?Sized,
{
    async fn owner(&self, id: OwnerId) -> Result<Owner, Error> {
        self.owners
            .find_by_id(&id)
            .await
            .map_err(|e| map_repository_error("owner", e))?
            .ok_or_else(|| entity_not_found(id))
    }

    async fn owners(&self, last_name: Option<String>) -> Result<Vec<Owner>, Error> {
        let result = match normalise_filter(last_name) {
            Some(last_name) => self.owners.find_by_last_name(&last_name).await,
            None => self.owners.find_all().await,
        };
        result.map_err(|e| map_repository_error("owner", e))
    }

    async fn pet(&self, id: PetId) -> Result<Pet, Error> {
        self.pets
            .find_by_id(&id)
            .await
            .map_err(|e| map_repository_error("pet", e))?
            .ok_or_else(|| entity_not_found(id))
    }

    async fn pet_by_identifier(&self, identifier: String) -> Result<Pet, Error> {
        let identifier = parse_identifier("identifier", identifier)?;
        self.pets
            .find_by_identifier(&identifier)
            .await
            .map_err(|e| map_repository_error("pet", e))?
            .ok_or_else(|| entity_not_found(&identifier))
    }

    async fn pets(&self, filter: PetFilter) -> Result<Vec<Pet>, Error> {
        let name = normalise_filter(filter.name);
        let result = match (filter.owner_id, name) {
            (Some(owner_id), name) => self.pets.find_by_owner(&owner_id).await.map(|pets| {
                pets.into_iter()
                    .filter(|pet| name.as_deref().is_none_or(|n| pet.name().as_str() == n))
                    .collect()
            }),
            (None, Some(name)) => self.pets.find_by_name(&name).await,
            (None, None) => self.pets.find_all().await,
        };
        result.map_err(|e| map_repository_error("pet", e))
    }

    async fn visit(&self, id: VisitId) -> Result<Visit, Error> {
        self.visits
            .find_by_id(&id)
            .await
            .map_err(|e| map_repository_error("visit", e))?
            .ok_or_else(|| entity_not_found(id))
    }

    async fn visits(&self, pet_identifier: Option<String>) -> Result<Vec<Visit>, Error> {
        let result = match normalise_filter(pet_identifier) {
            Some(raw) => {
                let identifier = parse_identifier("petIdentifier", raw)?;
                self.visits.find_by_pet_identifier(&identifier).await
            }
            None => self.visits.find_all().await,
        };
        result.map_err(|e| map_repository_error("visit", e))
    }
}

#[cfg(test)]
#[path = "clinic_query_service_tests.rs"]
mod tests;
