//! PostgreSQL-backed [`PetRepository`].
//!
//! `pets.identifier` carries a unique index. Saving a second pet under a
//! taken identifier surfaces as [`RepositoryError::Conflict`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PetRepository, RepositoryError};
use crate::domain::{Breed, OwnerId, Pet, PetId, PetIdentifier, PetName, PetProfile, PetType};

use super::diesel_error_mapping::{corrupt, corrupt_value, map_diesel_error, map_pool_error};
use super::models::{NewPetRow, PetRow};
use super::pool::DbPool;
use super::schema::pets;

/// Diesel implementation of [`PetRepository`].
#[derive(Clone)]
pub struct DieselPetRepository {
    pool: DbPool,
}

impl DieselPetRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load(
        &self,
        query: pets::BoxedQuery<'_, diesel::pg::Pg>,
    ) -> Result<Vec<Pet>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PetRow> = query
            .order((pets::identifier, pets::id))
            .select(PetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_pet).collect()
    }

    async fn first(
        &self,
        query: pets::BoxedQuery<'_, diesel::pg::Pg>,
    ) -> Result<Option<Pet>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PetRow> = query
            .select(PetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_pet).transpose()
    }
}

pub(crate) fn row_to_pet(row: PetRow) -> Result<Pet, RepositoryError> {
    let identifier = PetIdentifier::of(&row.identifier).map_err(corrupt_value("identifier"))?;
    let profile = PetProfile {
        name: PetName::new(row.name).map_err(corrupt_value("name"))?,
        pet_type: row
            .pet_type
            .parse::<PetType>()
            .map_err(|err| corrupt("pet_type", err))?,
        breed: Breed::new(row.breed).map_err(corrupt_value("breed"))?,
        description: row.description,
        owner_id: OwnerId::from_uuid(row.owner_id),
    };
    Ok(Pet::new(PetId::from_uuid(row.id), identifier, profile))
}

fn pet_to_row(pet: &Pet) -> NewPetRow<'_> {
    NewPetRow {
        id: *pet.id().as_uuid(),
        identifier: pet.identifier().as_str(),
        name: pet.name().as_str(),
        pet_type: pet.pet_type().as_str(),
        breed: pet.breed().as_str(),
        description: pet.description(),
        owner_id: *pet.owner_id().as_uuid(),
    }
}

#[async_trait]
impl PetRepository for DieselPetRepository {
    async fn save(&self, pet: &Pet) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = pet_to_row(pet);
        diesel::insert_into(pets::table)
            .values(&row)
            .on_conflict(pets::id)
            .do_update()
            .set((
                pets::identifier.eq(excluded(pets::identifier)),
                pets::name.eq(excluded(pets::name)),
                pets::pet_type.eq(excluded(pets::pet_type)),
                pets::breed.eq(excluded(pets::breed)),
                pets::description.eq(excluded(pets::description)),
                pets::owner_id.eq(excluded(pets::owner_id)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &PetId) -> Result<Option<Pet>, RepositoryError> {
        self.first(pets::table.filter(pets::id.eq(*id.as_uuid())).into_boxed())
            .await
    }

    async fn find_by_identifier(
        &self,
        identifier: &PetIdentifier,
    ) -> Result<Option<Pet>, RepositoryError> {
        self.first(
            pets::table
                .filter(pets::identifier.eq(identifier.as_str().to_owned()))
                .into_boxed(),
        )
        .await
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Pet>, RepositoryError> {
        self.load(pets::table.filter(pets::name.eq(name.to_owned())).into_boxed())
            .await
    }

    async fn find_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<Pet>, RepositoryError> {
        self.load(
            pets::table
                .filter(pets::owner_id.eq(*owner_id.as_uuid()))
                .into_boxed(),
        )
        .await
    }

    async fn find_all(&self) -> Result<Vec<Pet>, RepositoryError> {
        self.load(pets::table.into_boxed()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pet::fixtures::pet_draft;
    use rstest::rstest;

    fn row(pet: &Pet) -> PetRow {
        let new = pet_to_row(pet);
        PetRow {
            id: new.id,
            identifier: new.identifier.to_owned(),
            name: new.name.to_owned(),
            pet_type: new.pet_type.to_owned(),
            breed: new.breed.to_owned(),
            description: new.description.to_owned(),
            owner_id: new.owner_id,
        }
    }

    #[rstest]
    fn stored_rows_rebuild_the_same_pet() {
        let pet = Pet::register(pet_draft(OwnerId::random(), "Rex")).expect("valid pet");
        assert_eq!(row_to_pet(row(&pet)), Ok(pet));
    }

    #[rstest]
    #[case::bad_checksum("identifier", |row: &mut PetRow| row.identifier = "2024031210123458".to_owned())]
    #[case::unknown_type("pet_type", |row: &mut PetRow| row.pet_type = "DRAGON".to_owned())]
    #[case::blank_name("name", |row: &mut PetRow| row.name = "  ".to_owned())]
    fn rows_failing_validation_are_corrupt(
        #[case] column: &str,
        #[case] corrupt_row: fn(&mut PetRow),
    ) {
        let pet = Pet::register(pet_draft(OwnerId::random(), "Rex")).expect("valid pet");
        let mut stored = row(&pet);
        corrupt_row(&mut stored);

        match row_to_pet(stored) {
            Err(RepositoryError::CorruptRecord { message }) => {
                assert!(message.starts_with(column), "{message}");
            }
            other => panic!("expected corrupt record, got {other:?}"),
        }
    }
}
