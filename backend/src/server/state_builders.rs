//! Builders wiring repositories and services into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use petclinic::domain::ports::{
    ClinicQuery, OwnerRepository, PetDescriptionEnhancer, PetRepository, RegistrationCommand,
    VisitRepository,
};
use petclinic::domain::{ClinicQueryService, RegistrationService};
use petclinic::inbound::http::state::HttpState;
use petclinic::outbound::persistence::{
    DbPool, DieselOwnerRepository, DieselPetRepository, DieselVisitRepository,
    InMemoryClinicStore,
};

use super::ServerConfig;

/// The three repository ports backed by one store.
pub(crate) struct Repositories {
    pub(crate) owners: Arc<dyn OwnerRepository>,
    pub(crate) pets: Arc<dyn PetRepository>,
    pub(crate) visits: Arc<dyn VisitRepository>,
}

/// Select Diesel repositories when a pool is available, otherwise a fresh
/// in-memory store.
pub(crate) fn build_repositories(pool: Option<&DbPool>) -> Repositories {
    match pool {
        Some(pool) => {
            info!(store = "postgres", "clinic repositories ready");
            Repositories {
                owners: Arc::new(DieselOwnerRepository::new(pool.clone())),
                pets: Arc::new(DieselPetRepository::new(pool.clone())),
                visits: Arc::new(DieselVisitRepository::new(pool.clone())),
            }
        }
        None => {
            info!(store = "memory", "clinic repositories ready");
            let store = Arc::new(InMemoryClinicStore::new());
            Repositories {
                owners: store.clone(),
                pets: store.clone(),
                visits: store,
            }
        }
    }
}

/// Build the registration and query services over shared repositories.
pub(crate) fn build_services(
    repositories: Repositories,
    enhancer: Arc<dyn PetDescriptionEnhancer>,
) -> (Arc<dyn RegistrationCommand>, Arc<dyn ClinicQuery>) {
    let Repositories {
        owners,
        pets,
        visits,
    } = repositories;
    let query = ClinicQueryService::new(owners.clone(), pets.clone(), visits.clone());
    let registration = RegistrationService::new(owners, pets, visits, enhancer);
    (Arc::new(registration), Arc::new(query))
}

pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let repositories = build_repositories(config.db_pool.as_ref());
    let (registration, query) = build_services(repositories, config.enhancer.clone());
    web::Data::new(HttpState::new(registration, query))
}
