//! Registration use cases: owners, pets and visits.
//!
//! Raw inputs are validated field by field into value objects before any
//! repository is touched. Pet descriptions pass through the configured
//! enhancer; enhancer failures never fail a registration.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::ports::{
    OwnerRepository, PetDescriptionEnhancer, PetRepository, RegisterOwnerRequest,
    RegisterPetRequest, RegisterVisitRequest, RegistrationCommand, VisitRepository,
};
use super::service_errors::{
    entity_not_found, invalid_choice, invalid_field, map_generation_error, map_repository_error,
    required,
};
use super::{
    AddressLine, Breed, EmailAddress, Error, Gender, Owner, OwnerDraft, PersonName, Pet, PetDraft,
    PetIdentifier, PetName, PetType, TelephoneNumber, Visit,
};

/// Registration service implementing [`RegistrationCommand`].
pub struct RegistrationService<O: ?Sized, P: ?Sized, V: ?Sized, E: ?Sized> {
    owners: Arc<O>,
    pets: Arc<P>,
    visits: Arc<V>,
    enhancer: Arc<E>,
}

impl<O: ?Sized, P: ?Sized, V: ?Sized, E: ?Sized> Clone for RegistrationService<O, P, V, E> {
    fn clone(&self) -> Self {
        Self {
            owners: Arc::clone(&self.owners),
            pets: Arc::clone(&self.pets),
            visits: Arc::clone(&self.visits),
            enhancer: Arc::clone(&self.enhancer),
        }
    }
}

impl<O: ?Sized, P: ?Sized, V: ?Sized, E: ?Sized> RegistrationService<O, P, V, E> {
    /// Create a service over the given repositories and enhancer.
    pub fn new(owners: Arc<O>, pets: Arc<P>, visits: Arc<V>, enhancer: Arc<E>) -> Self {
        Self {
            owners,
            pets,
            visits,
            enhancer,
        }
    }
}

impl<O, P, V, E> RegistrationService<O, P, V, E>
where
    O: OwnerRepository + ?Sized,
    P: PetRepository + ?Sized,
    V: VisitRepository + ?Sized,
    E: PetDescriptionEnhancer + ?Sized,
{
    fn owner_draft(request: RegisterOwnerRequest) -> Result<OwnerDraft, Error> {
        Ok(OwnerDraft {
            first_name: PersonName::from_option(request.first_name)
                .map_err(|e| invalid_field("firstName", e))?,
            last_name: PersonName::from_option(request.last_name)
                .map_err(|e| invalid_field("lastName", e))?,
            address: AddressLine::from_option(request.address)
                .map_err(|e| invalid_field("address", e))?,
            city: AddressLine::from_option(request.city).map_err(|e| invalid_field("city", e))?,
            telephone: TelephoneNumber::from_option(request.telephone)
                .map_err(|e| invalid_field("telephone", e))?,
            email: EmailAddress::from_option(request.email)
                .map_err(|e| invalid_field("email", e))?,
        })
    }

    fn pet_draft(request: RegisterPetRequest) -> Result<PetDraft, Error> {
        let name = PetName::from_option(request.name).map_err(|e| invalid_field("name", e))?;
        let pet_type = required("type", request.pet_type)?
            .parse::<PetType>()
            .map_err(|e| invalid_choice("type", e))?;
        let breed = Breed::from_option(request.breed).map_err(|e| invalid_field("breed", e))?;
        let gender = required("gender", request.gender)?
            .parse::<Gender>()
            .map_err(|e| invalid_choice("gender", e))?;
        let birth_date = required("birthDate", request.birth_date)?;
        let description = required("description", request.description)?;
        let owner_id = required("ownerId", request.owner_id)?;
        Ok(PetDraft {
            name,
            pet_type,
            breed,
            gender,
            birth_date,
            description,
            owner_id,
        })
    }

    async fn enhance_description(&self, draft: &PetDraft) -> String {
        match self
            .enhancer
            .enhance(draft.pet_type, draft.breed.as_str(), &draft.description)
            .await
        {
            Ok(enhanced) => enhanced,
            Err(error) => {
                warn!(
                    error = %error,
                    pet_type = %draft.pet_type,
                    "description enhancement failed; keeping original description"
                );
                draft.description.clone()
            }
        }
    }
}

#[async_trait]
impl<O, P, V, E> RegistrationCommand for RegistrationService<O, P, V, E>
where
    O: OwnerRepository + ?Sized,
    P: PetRepository + ?Sized,
    V: VisitRepository + ?Sized,
    E: PetDescriptionEnhancer + ?Sized,
{
    async fn register_owner(&self, request: RegisterOwnerRequest) -> Result<Owner, Error> {
        let owner = Owner::register(Self::owner_draft(request)?);
        self.owners
            .save(&owner)
            .await
            .map_err(|e| map_repository_error("owner", e))?;
        debug!(owner_id = %owner.id(), "registered owner");
        Ok(owner)
    }

    async fn register_pet(&self, request: RegisterPetRequest) -> Result<Pet, Error> {
        let mut draft = Self::pet_draft(request)?;
        if self
            .owners
            .find_by_id(&draft.owner_id)
            .await
            .map_err(|e| map_repository_error("owner", e))?
            .is_none()
        {
            return Err(entity_not_found(draft.owner_id));
        }

        draft.description = self.enhance_description(&draft).await;
        let pet = Pet::register(draft).map_err(map_generation_error)?;
        self.pets
            .save(&pet)
            .await
            .map_err(|e| map_repository_error("pet", e))?;
        debug!(
            pet_id = %pet.id(),
            identifier = %pet.identifier(),
            owner_id = %pet.owner_id(),
            "registered pet"
        );
        Ok(pet)
    }

    async fn register_visit(&self, request: RegisterVisitRequest) -> Result<Visit, Error> {
        let identifier = PetIdentifier::of(required("petIdentifier", request.pet_identifier)?)
            .map_err(|e| invalid_field("petIdentifier", e))?;
        let time = required("time", request.time)?;
        let description = required("description", request.description)?;

        if self
            .pets
            .find_by_identifier(&identifier)
            .await
            .map_err(|e| map_repository_error("pet", e))?
            .is_none()
        {
            return Err(entity_not_found(&identifier));
        }

        let visit = Visit::record(identifier, time, description);
        self.visits
            .save(&visit)
            .await
            .map_err(|e| map_repository_error("visit", e))?;
        debug!(
            visit_id = %visit.id(),
            identifier = %visit.pet_identifier(),
            "registered visit"
        );
        Ok(visit)
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
