//! Tests for the clinic query service.

use std::sync::Arc;

use super::*;
use crate::domain::owner::fixtures::owner_draft;
use crate::domain::pet::fixtures::pet_draft;
use crate::domain::ports::{
    MockOwnerRepository, MockPetRepository, MockVisitRepository, RepositoryError,
};
use crate::domain::ErrorCode;
use chrono::{TimeZone, Utc};
use mockall::predicate::eq;
use rstest::{fixture, rstest};
use serde_json::json;

type Service = ClinicQueryService<MockOwnerRepository, MockPetRepository, MockVisitRepository>;

struct Mocks {
    owners: MockOwnerRepository,
    pets: MockPetRepository,
    visits: MockVisitRepository,
}

impl Mocks {
    fn into_service(self) -> Service {
        ClinicQueryService::new(
            Arc::new(self.owners),
            Arc::new(self.pets),
            Arc::new(self.visits),
        )
    }
}

#[fixture]
fn mocks() -> Mocks {
    Mocks {
        owners: MockOwnerRepository::new(),
        pets: MockPetRepository::new(),
        visits: MockVisitRepository::new(),
    }
}

fn pet_named(owner_id: OwnerId, name: &str) -> Pet {
    Pet::register(pet_draft(owner_id, name)).expect("valid pet")
}

#[rstest]
#[tokio::test]
async fn owner_returns_the_stored_owner(mut mocks: Mocks) {
    let owner = Owner::register(owner_draft("Lovelace"));
    let id = owner.id();
    let stored = owner.clone();
    mocks
        .owners
        .expect_find_by_id()
        .with(eq(id))
        .times(1)
        .return_once(move |_| Ok(Some(stored)));

    let found = mocks.into_service().owner(id).await.expect("owner found");
    assert_eq!(found, owner);
}

#[rstest]
#[tokio::test]
async fn owner_reports_missing_entities(mut mocks: Mocks) {
    let id = OwnerId::random();
    mocks.owners.expect_find_by_id().return_once(|_| Ok(None));

    let error = mocks.into_service().owner(id).await.expect_err("absent");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), format!("Entity not found: {id}"));
}

#[rstest]
#[case::absent(None)]
#[case::blank(Some("   ".to_owned()))]
#[tokio::test]
async fn owners_without_a_filter_list_everyone(mut mocks: Mocks, #[case] filter: Option<String>) {
    mocks
        .owners
        .expect_find_all()
        .times(1)
        .return_once(|| Ok(vec![Owner::register(owner_draft("Lovelace"))]));
    mocks.owners.expect_find_by_last_name().never();

    let owners = mocks.into_service().owners(filter).await.expect("listed");
    assert_eq!(owners.len(), 1);
}

#[rstest]
#[tokio::test]
async fn owners_filter_by_trimmed_last_name(mut mocks: Mocks) {
    mocks
        .owners
        .expect_find_by_last_name()
        .withf(|last_name| last_name == "Hopper")
        .times(1)
        .return_once(|_| Ok(vec![Owner::register(owner_draft("Hopper"))]));

    let owners = mocks
        .into_service()
        .owners(Some("  Hopper ".to_owned()))
        .await
        .expect("listed");
    assert_eq!(owners[0].last_name().as_str(), "Hopper");
}

#[rstest]
#[tokio::test]
async fn owners_map_repository_failures(mut mocks: Mocks) {
    mocks
        .owners
        .expect_find_all()
        .return_once(|| Err(RepositoryError::connection("pool exhausted")));

    let error = mocks.into_service().owners(None).await.expect_err("failed");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn pet_by_identifier_looks_up_the_parsed_identifier(mut mocks: Mocks) {
    let pet = pet_named(OwnerId::random(), "Rex");
    let identifier = pet.identifier().clone();
    let raw = identifier.as_str().to_owned();
    let stored = pet.clone();
    mocks
        .pets
        .expect_find_by_identifier()
        .with(eq(identifier))
        .return_once(move |_| Ok(Some(stored)));

    let found = mocks
        .into_service()
        .pet_by_identifier(raw)
        .await
        .expect("pet found");
    assert_eq!(found.id(), pet.id());
}

#[rstest]
#[case::wrong_length("123", "length")]
#[case::not_digits("2024031210123A57", "syntax")]
#[case::bad_control_digit("2024031210123458", "semantics")]
#[tokio::test]
async fn pet_by_identifier_rejects_malformed_input(
    mocks: Mocks,
    #[case] raw: &str,
    #[case] stage: &str,
) {
    let error = mocks
        .into_service()
        .pet_by_identifier(raw.to_owned())
        .await
        .expect_err("malformed");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details");
    assert_eq!(details["field"], json!("identifier"));
    assert_eq!(details["stage"], json!(stage));
}

#[rstest]
#[tokio::test]
async fn pet_by_identifier_reports_unknown_pets(mut mocks: Mocks) {
    mocks
        .pets
        .expect_find_by_identifier()
        .return_once(|_| Ok(None));

    let error = mocks
        .into_service()
        .pet_by_identifier("2024031210123457".to_owned())
        .await
        .expect_err("unknown");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Entity not found: 2024031210123457");
}

#[rstest]
#[tokio::test]
async fn pets_by_owner_and_name_are_combined(mut mocks: Mocks) {
    let owner_id = OwnerId::random();
    let rex = pet_named(owner_id, "Rex");
    let bella = pet_named(owner_id, "Bella");
    mocks
        .pets
        .expect_find_by_owner()
        .with(eq(owner_id))
        .return_once(move |_| Ok(vec![rex, bella]));
    mocks.pets.expect_find_by_name().never();

    let pets = mocks
        .into_service()
        .pets(PetFilter {
            owner_id: Some(owner_id),
            name: Some("Bella".to_owned()),
        })
        .await
        .expect("listed");
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].name().as_str(), "Bella");
}

#[rstest]
#[tokio::test]
async fn pets_by_name_only_use_the_name_lookup(mut mocks: Mocks) {
    let owner_id = OwnerId::random();
    mocks
        .pets
        .expect_find_by_name()
        .withf(|name| name == "Rex")
        .return_once(move |_| Ok(vec![pet_named(owner_id, "Rex")]));

    let pets = mocks
        .into_service()
        .pets(PetFilter {
            owner_id: None,
            name: Some(" Rex ".to_owned()),
        })
        .await
        .expect("listed");
    assert_eq!(pets.len(), 1);
}

#[rstest]
#[tokio::test]
async fn pets_without_filters_list_everything(mut mocks: Mocks) {
    mocks.pets.expect_find_all().times(1).return_once(|| Ok(Vec::new()));

    let pets = mocks
        .into_service()
        .pets(PetFilter::default())
        .await
        .expect("listed");
    assert!(pets.is_empty());
}

#[rstest]
#[tokio::test]
async fn visit_reports_missing_entities(mut mocks: Mocks) {
    let id = VisitId::random();
    mocks.visits.expect_find_by_id().return_once(|_| Ok(None));

    let error = mocks.into_service().visit(id).await.expect_err("absent");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn visits_reject_malformed_pet_identifiers(mut mocks: Mocks) {
    mocks.visits.expect_find_by_pet_identifier().never();

    let error = mocks
        .into_service()
        .visits(Some("not-an-identifier".to_owned()))
        .await
        .expect_err("malformed");
    assert_eq!(
        error.details().expect("details")["field"],
        json!("petIdentifier")
    );
}

#[rstest]
#[tokio::test]
async fn visits_for_a_pet_use_the_parsed_identifier(mut mocks: Mocks) {
    let identifier = pet_named(OwnerId::random(), "Rex").identifier().clone();
    let time = Utc
        .with_ymd_and_hms(2024, 3, 12, 9, 30, 0)
        .single()
        .expect("valid instant");
    let visit = Visit::record(identifier.clone(), time, "Vaccination".to_owned());
    mocks
        .visits
        .expect_find_by_pet_identifier()
        .with(eq(identifier.clone()))
        .return_once(move |_| Ok(vec![visit]));
    mocks.visits.expect_find_all().never();

    let visits = mocks
        .into_service()
        .visits(Some(identifier.as_str().to_owned()))
        .await
        .expect("listed");
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].pet_identifier(), &identifier);
    assert_eq!(visits[0].description(), "Vaccination");
}
