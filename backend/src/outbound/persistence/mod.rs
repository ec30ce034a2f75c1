//! Repository adapters for owners, pets and visits.
//!
//! Two backends implement the same ports:
//!
//! - [`InMemoryClinicStore`]: process-local maps, used for development and
//!   tests.
//! - `Diesel*Repository`: PostgreSQL through `diesel-async` and a `bb8`
//!   pool. Row structs and table definitions stay private to this module, and
//!   rows are re-validated into value objects on every read.
//!
//! # Example
//!
//! ```no_run
//! use petclinic::outbound::persistence::{DbPool, DieselPetRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), petclinic::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/petclinic")).await?;
//! let pets = DieselPetRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_owner_repository;
mod diesel_pet_repository;
mod diesel_visit_repository;
mod memory;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_owner_repository::DieselOwnerRepository;
pub use diesel_pet_repository::DieselPetRepository;
pub use diesel_visit_repository::DieselVisitRepository;
pub use memory::InMemoryClinicStore;
pub use migrations::run_pending_migrations;
pub use pool::{DbPool, PoolConfig, PoolError};
