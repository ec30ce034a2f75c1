//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (repositories, the description enhancer) return typed errors
//! generated by `define_port_error!`. Driving ports (use cases) return the
//! domain [`Error`](crate::domain::Error).

mod macros;
pub(crate) use macros::define_port_error;

mod clinic_query;
mod description_enhancer;
mod owner_repository;
mod pet_repository;
mod registration_command;
mod repository_error;
mod visit_repository;

#[cfg(test)]
pub use clinic_query::MockClinicQuery;
pub use clinic_query::{ClinicQuery, PetFilter};
#[cfg(test)]
pub use description_enhancer::MockPetDescriptionEnhancer;
pub use description_enhancer::{
    DescriptionEnhancerError, PassthroughDescriptionEnhancer, PetDescriptionEnhancer,
};
#[cfg(test)]
pub use owner_repository::MockOwnerRepository;
pub use owner_repository::OwnerRepository;
#[cfg(test)]
pub use pet_repository::MockPetRepository;
pub use pet_repository::PetRepository;
#[cfg(test)]
pub use registration_command::MockRegistrationCommand;
pub use registration_command::{
    RegisterOwnerRequest, RegisterPetRequest, RegisterVisitRequest, RegistrationCommand,
};
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use visit_repository::MockVisitRepository;
pub use visit_repository::VisitRepository;
