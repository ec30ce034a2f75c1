//! Process-local clinic store.
//!
//! Backs all three repository ports with maps guarded by a single
//! `tokio::sync::RwLock`, so one store instance can be shared as every
//! repository of a running server. Data is lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{OwnerRepository, PetRepository, RepositoryError, VisitRepository};
use crate::domain::{Owner, OwnerId, Pet, PetId, PetIdentifier, Visit, VisitId};

#[derive(Default)]
struct Tables {
    owners: HashMap<OwnerId, Owner>,
    pets: HashMap<PetId, Pet>,
    visits: HashMap<VisitId, Visit>,
}

/// In-memory implementation of the owner, pet and visit repositories.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use petclinic::domain::ports::{OwnerRepository, PetRepository};
/// use petclinic::outbound::persistence::InMemoryClinicStore;
///
/// let store = Arc::new(InMemoryClinicStore::default());
/// let owners: Arc<dyn OwnerRepository> = store.clone();
/// let pets: Arc<dyn PetRepository> = store;
/// ```
#[derive(Default)]
pub struct InMemoryClinicStore {
    tables: RwLock<Tables>,
}

impl InMemoryClinicStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_time(mut visits: Vec<Visit>) -> Vec<Visit> {
    visits.sort_by_key(|visit| (visit.time(), visit.id()));
    visits
}

fn sorted_owners(mut owners: Vec<Owner>) -> Vec<Owner> {
    owners.sort_by(|a, b| {
        (a.last_name().as_str(), a.first_name().as_str(), a.id())
            .cmp(&(b.last_name().as_str(), b.first_name().as_str(), b.id()))
    });
    owners
}

fn sorted_pets(mut pets: Vec<Pet>) -> Vec<Pet> {
    pets.sort_by(|a, b| a.identifier().as_str().cmp(b.identifier().as_str()));
    pets
}

#[async_trait]
impl OwnerRepository for InMemoryClinicStore {
    async fn save(&self, owner: &Owner) -> Result<(), RepositoryError> {
        self.tables
            .write()
            .await
            .owners
            .insert(owner.id(), owner.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &OwnerId) -> Result<Option<Owner>, RepositoryError> {
        Ok(self.tables.read().await.owners.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Owner>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(sorted_owners(tables.owners.values().cloned().collect()))
    }

    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(sorted_owners(
            tables
                .owners
                .values()
                .filter(|owner| owner.last_name().as_str() == last_name)
                .cloned()
                .collect(),
        ))
    }
}

#[async_trait]
impl PetRepository for InMemoryClinicStore {
    async fn save(&self, pet: &Pet) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        let taken = tables
            .pets
            .values()
            .any(|other| other.identifier() == pet.identifier() && other.id() != pet.id());
        if taken {
            return Err(RepositoryError::conflict(format!(
                "pet identifier {} is already registered",
                pet.identifier()
            )));
        }
        tables.pets.insert(pet.id(), pet.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, RepositoryError> {
        Ok(self.tables.read().await.pets.get(id).cloned())
    }

    async fn find_by_identifier(
        &self,
        identifier: &PetIdentifier,
    ) -> Result<Option<Pet>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .pets
            .values()
            .find(|pet| pet.identifier() == identifier)
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Pet>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(sorted_pets(
            tables
                .pets
                .values()
                .filter(|pet| pet.name().as_str() == name)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<Pet>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(sorted_pets(
            tables
                .pets
                .values()
                .filter(|pet| pet.owner_id() == *owner_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_all(&self) -> Result<Vec<Pet>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(sorted_pets(tables.pets.values().cloned().collect()))
    }
}

#[async_trait]
impl VisitRepository for InMemoryClinicStore {
    async fn save(&self, visit: &Visit) -> Result<(), RepositoryError> {
        self.tables
            .write()
            .await
            .visits
            .insert(visit.id(), visit.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &VisitId) -> Result<Option<Visit>, RepositoryError> {
        Ok(self.tables.read().await.visits.get(id).cloned())
    }

    async fn find_by_pet_identifier(
        &self,
        identifier: &PetIdentifier,
    ) -> Result<Vec<Visit>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(sorted_by_time(
            tables
                .visits
                .values()
                .filter(|visit| visit.pet_identifier() == identifier)
                .cloned()
                .collect(),
        ))
    }

    async fn find_all(&self) -> Result<Vec<Visit>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(sorted_by_time(tables.visits.values().cloned().collect()))
    }
}
