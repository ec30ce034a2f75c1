//! Driving port for registering owners, pets and visits.
//!
//! Requests carry raw, possibly absent inputs. The implementing service
//! validates each field into its value object and reports the first failure
//! as an invalid request naming the field.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{Error, Owner, OwnerId, Pet, Visit};

/// Raw input for [`RegistrationCommand::register_owner`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterOwnerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
}

/// Raw input for [`RegistrationCommand::register_pet`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterPetRequest {
    pub name: Option<String>,
    pub pet_type: Option<String>,
    pub breed: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub owner_id: Option<OwnerId>,
}

/// Raw input for [`RegistrationCommand::register_visit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterVisitRequest {
    pub pet_identifier: Option<String>,
    pub time: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

/// Use-case port for clinic registrations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Validate and store a new owner.
    async fn register_owner(&self, request: RegisterOwnerRequest) -> Result<Owner, Error>;

    /// Validate and store a new pet for an existing owner, generating its
    /// identifier.
    async fn register_pet(&self, request: RegisterPetRequest) -> Result<Pet, Error>;

    /// Record a visit for an existing pet.
    async fn register_visit(&self, request: RegisterVisitRequest) -> Result<Visit, Error>;
}
