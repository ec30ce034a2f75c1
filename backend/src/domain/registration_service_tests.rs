//! Tests for the registration service.

use std::sync::Arc;

use super::*;
use crate::domain::owner::fixtures::owner_draft;
use crate::domain::ports::{
    DescriptionEnhancerError, MockOwnerRepository, MockPetDescriptionEnhancer, MockPetRepository,
    MockVisitRepository, RepositoryError,
};
use crate::domain::{ErrorCode, OwnerId};
use chrono::{NaiveDate, TimeZone, Utc};
use mockall::predicate::eq;
use rstest::{fixture, rstest};
use serde_json::json;

type Service = RegistrationService<
    MockOwnerRepository,
    MockPetRepository,
    MockVisitRepository,
    MockPetDescriptionEnhancer,
>;

struct Mocks {
    owners: MockOwnerRepository,
    pets: MockPetRepository,
    visits: MockVisitRepository,
    enhancer: MockPetDescriptionEnhancer,
}

impl Mocks {
    fn into_service(self) -> Service {
        RegistrationService::new(
            Arc::new(self.owners),
            Arc::new(self.pets),
            Arc::new(self.visits),
            Arc::new(self.enhancer),
        )
    }
}

#[fixture]
fn mocks() -> Mocks {
    Mocks {
        owners: MockOwnerRepository::new(),
        pets: MockPetRepository::new(),
        visits: MockVisitRepository::new(),
        enhancer: MockPetDescriptionEnhancer::new(),
    }
}

fn owner_request() -> RegisterOwnerRequest {
    RegisterOwnerRequest {
        first_name: Some("Ada".to_owned()),
        last_name: Some("Lovelace".to_owned()),
        address: Some("1 Analytical Row".to_owned()),
        city: Some("London".to_owned()),
        telephone: Some("+4412345678".to_owned()),
        email: Some("ada@example.com".to_owned()),
    }
}

fn pet_request(owner_id: OwnerId) -> RegisterPetRequest {
    RegisterPetRequest {
        name: Some("Rex".to_owned()),
        pet_type: Some("dog".to_owned()),
        breed: Some("Labrador".to_owned()),
        gender: Some("male".to_owned()),
        birth_date: NaiveDate::from_ymd_opt(2020, 5, 17),
        description: Some("Loves fetch".to_owned()),
        owner_id: Some(owner_id),
    }
}

fn visit_request(identifier: &str) -> RegisterVisitRequest {
    RegisterVisitRequest {
        pet_identifier: Some(identifier.to_owned()),
        time: Utc.with_ymd_and_hms(2024, 3, 12, 9, 30, 0).single(),
        description: Some("Annual check-up".to_owned()),
    }
}

#[rstest]
#[tokio::test]
async fn register_owner_saves_a_validated_owner(mut mocks: Mocks) {
    mocks
        .owners
        .expect_save()
        .withf(|owner| owner.last_name().as_str() == "Lovelace")
        .times(1)
        .return_once(|_| Ok(()));

    let owner = mocks
        .into_service()
        .register_owner(owner_request())
        .await
        .expect("registration succeeds");
    assert_eq!(owner.email().as_str(), "ada@example.com");
}

#[rstest]
#[tokio::test]
async fn register_owner_reports_the_invalid_field(mocks: Mocks) {
    let mut request = owner_request();
    request.email = Some("not-an-email".to_owned());

    let error = mocks
        .into_service()
        .register_owner(request)
        .await
        .expect_err("invalid email");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details");
    assert_eq!(details["field"], json!("email"));
    assert_eq!(details["stage"], json!("syntax"));
}

#[rstest]
#[tokio::test]
async fn register_owner_reports_absent_fields(mocks: Mocks) {
    let mut request = owner_request();
    request.first_name = None;

    let error = mocks
        .into_service()
        .register_owner(request)
        .await
        .expect_err("missing first name");
    assert_eq!(error.message(), "firstName must not be absent");
}

#[rstest]
#[tokio::test]
async fn register_owner_maps_connection_failures(mut mocks: Mocks) {
    mocks
        .owners
        .expect_save()
        .return_once(|_| Err(RepositoryError::connection("refused")));

    let error = mocks
        .into_service()
        .register_owner(owner_request())
        .await
        .expect_err("store down");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn register_pet_enhances_and_saves(mut mocks: Mocks) {
    let owner = Owner::register(owner_draft("Lovelace"));
    let owner_id = owner.id();
    mocks
        .owners
        .expect_find_by_id()
        .with(eq(owner_id))
        .return_once(move |_| Ok(Some(owner)));
    mocks
        .enhancer
        .expect_enhance()
        .withf(|pet_type, breed, description| {
            *pet_type == PetType::Dog && breed == "Labrador" && description == "Loves fetch"
        })
        .return_once(|_, _, _| Ok("An enthusiastic retriever.".to_owned()));
    mocks.pets.expect_save().times(1).return_once(|_| Ok(()));

    let pet = mocks
        .into_service()
        .register_pet(pet_request(owner_id))
        .await
        .expect("registration succeeds");

    assert_eq!(pet.description(), "An enthusiastic retriever.");
    assert_eq!(pet.gender(), Gender::Male);
    assert!(pet.identifier().as_str().starts_with("202005171"));
    assert_eq!(pet.owner_id(), owner_id);
}

#[rstest]
#[tokio::test]
async fn register_pet_keeps_the_description_when_enhancement_fails(mut mocks: Mocks) {
    let owner = Owner::register(owner_draft("Lovelace"));
    let owner_id = owner.id();
    mocks
        .owners
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(owner)));
    mocks
        .enhancer
        .expect_enhance()
        .return_once(|_, _, _| Err(DescriptionEnhancerError::timeout("10s elapsed")));
    mocks.pets.expect_save().return_once(|_| Ok(()));

    let pet = mocks
        .into_service()
        .register_pet(pet_request(owner_id))
        .await
        .expect("registration succeeds despite enhancer failure");
    assert_eq!(pet.description(), "Loves fetch");
}

#[rstest]
#[tokio::test]
async fn register_pet_requires_an_existing_owner(mut mocks: Mocks) {
    let owner_id = OwnerId::random();
    mocks.owners.expect_find_by_id().return_once(|_| Ok(None));
    mocks.enhancer.expect_enhance().never();
    mocks.pets.expect_save().never();

    let error = mocks
        .into_service()
        .register_pet(pet_request(owner_id))
        .await
        .expect_err("unknown owner");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), format!("Entity not found: {owner_id}"));
}

#[rstest]
#[case::unknown_type(|r: &mut RegisterPetRequest| r.pet_type = Some("dragon".to_owned()), "type")]
#[case::unknown_gender(|r: &mut RegisterPetRequest| r.gender = Some("other".to_owned()), "gender")]
#[case::blank_name(|r: &mut RegisterPetRequest| r.name = Some("  ".to_owned()), "name")]
#[case::missing_birth_date(|r: &mut RegisterPetRequest| r.birth_date = None, "birthDate")]
#[case::missing_owner(|r: &mut RegisterPetRequest| r.owner_id = None, "ownerId")]
#[tokio::test]
async fn register_pet_validates_before_touching_storage(
    mocks: Mocks,
    #[case] corrupt: fn(&mut RegisterPetRequest),
    #[case] field: &str,
) {
    let mut request = pet_request(OwnerId::random());
    corrupt(&mut request);

    let error = mocks
        .into_service()
        .register_pet(request)
        .await
        .expect_err("invalid request");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.details().expect("details")["field"], json!(field));
}

#[rstest]
#[tokio::test]
async fn register_pet_surfaces_identifier_conflicts(mut mocks: Mocks) {
    let owner = Owner::register(owner_draft("Lovelace"));
    let owner_id = owner.id();
    mocks
        .owners
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(owner)));
    mocks
        .enhancer
        .expect_enhance()
        .return_once(|_, _, description| Ok(description.to_owned()));
    mocks
        .pets
        .expect_save()
        .return_once(|_| Err(RepositoryError::conflict("identifier taken")));

    let error = mocks
        .into_service()
        .register_pet(pet_request(owner_id))
        .await
        .expect_err("duplicate identifier");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn register_visit_records_against_an_existing_pet(mut mocks: Mocks) {
    let owner_id = OwnerId::random();
    let pet = Pet::register(crate::domain::pet::fixtures::pet_draft(owner_id, "Rex"))
        .expect("valid pet");
    let identifier = pet.identifier().clone();
    mocks
        .pets
        .expect_find_by_identifier()
        .with(eq(identifier.clone()))
        .return_once(move |_| Ok(Some(pet)));
    mocks.visits.expect_save().times(1).return_once(|_| Ok(()));

    let visit = mocks
        .into_service()
        .register_visit(visit_request(identifier.as_str()))
        .await
        .expect("visit recorded");
    assert_eq!(visit.pet_identifier(), &identifier);
    assert_eq!(visit.description(), "Annual check-up");
}

#[rstest]
#[tokio::test]
async fn register_visit_rejects_malformed_identifiers(mocks: Mocks) {
    let error = mocks
        .into_service()
        .register_visit(visit_request("2024031210123458"))
        .await
        .expect_err("bad control digit");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details");
    assert_eq!(details["field"], json!("petIdentifier"));
    assert_eq!(details["stage"], json!("semantics"));
}

#[rstest]
#[tokio::test]
async fn register_visit_requires_a_known_pet(mut mocks: Mocks) {
    mocks
        .pets
        .expect_find_by_identifier()
        .return_once(|_| Ok(None));
    mocks.visits.expect_save().never();

    let error = mocks
        .into_service()
        .register_visit(visit_request("2024031210123457"))
        .await
        .expect_err("unknown pet");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Entity not found: 2024031210123457");
}
