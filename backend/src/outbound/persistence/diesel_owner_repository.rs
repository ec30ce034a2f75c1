//! PostgreSQL-backed [`OwnerRepository`].
//!
//! Rows are re-validated into value objects on read. A row that no longer
//! validates is reported as [`RepositoryError::CorruptRecord`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{OwnerRepository, RepositoryError};
use crate::domain::{
    AddressLine, EmailAddress, Owner, OwnerDraft, OwnerId, PersonName, TelephoneNumber,
};

use super::diesel_error_mapping::{corrupt_value, map_diesel_error, map_pool_error};
use super::models::{NewOwnerRow, OwnerRow};
use super::pool::DbPool;
use super::schema::owners;

/// Diesel implementation of [`OwnerRepository`].
#[derive(Clone)]
pub struct DieselOwnerRepository {
    pool: DbPool,
}

impl DieselOwnerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn row_to_owner(row: OwnerRow) -> Result<Owner, RepositoryError> {
    let draft = OwnerDraft {
        first_name: PersonName::new(row.first_name).map_err(corrupt_value("first_name"))?,
        last_name: PersonName::new(row.last_name).map_err(corrupt_value("last_name"))?,
        address: AddressLine::new(row.address).map_err(corrupt_value("address"))?,
        city: AddressLine::new(row.city).map_err(corrupt_value("city"))?,
        telephone: TelephoneNumber::new(row.telephone).map_err(corrupt_value("telephone"))?,
        email: EmailAddress::new(row.email).map_err(corrupt_value("email"))?,
    };
    Ok(Owner::new(OwnerId::from_uuid(row.id), draft))
}

fn owner_to_row(owner: &Owner) -> NewOwnerRow<'_> {
    NewOwnerRow {
        id: *owner.id().as_uuid(),
        first_name: owner.first_name().as_str(),
        last_name: owner.last_name().as_str(),
        address: owner.address().as_str(),
        city: owner.city().as_str(),
        telephone: owner.telephone().as_str(),
        email: owner.email().as_str(),
    }
}

fn rows_to_owners(rows: Vec<OwnerRow>) -> Result<Vec<Owner>, RepositoryError> {
    rows.into_iter().map(row_to_owner).collect()
}

#[async_trait]
impl OwnerRepository for DieselOwnerRepository {
    async fn save(&self, owner: &Owner) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = owner_to_row(owner);
        diesel::insert_into(owners::table)
            .values(&row)
            .on_conflict(owners::id)
            .do_update()
            .set((
                owners::first_name.eq(excluded(owners::first_name)),
                owners::last_name.eq(excluded(owners::last_name)),
                owners::address.eq(excluded(owners::address)),
                owners::city.eq(excluded(owners::city)),
                owners::telephone.eq(excluded(owners::telephone)),
                owners::email.eq(excluded(owners::email)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &OwnerId) -> Result<Option<Owner>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<OwnerRow> = owners::table
            .filter(owners::id.eq(id.as_uuid()))
            .select(OwnerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_owner).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Owner>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<OwnerRow> = owners::table
            .order((owners::last_name, owners::first_name, owners::id))
            .select(OwnerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_owners(rows)
    }

    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<OwnerRow> = owners::table
            .filter(owners::last_name.eq(last_name))
            .order((owners::first_name, owners::id))
            .select(OwnerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_owners(rows)
    }
}
