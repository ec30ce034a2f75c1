//! PostgreSQL-backed [`VisitRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, VisitRepository};
use crate::domain::{PetIdentifier, Visit, VisitId};

use super::diesel_error_mapping::{corrupt_value, map_diesel_error, map_pool_error};
use super::models::{NewVisitRow, VisitRow};
use super::pool::DbPool;
use super::schema::visits;

/// Diesel implementation of [`VisitRepository`]. Listings are ordered by
/// visit time, oldest first.
#[derive(Clone)]
pub struct DieselVisitRepository {
    pool: DbPool,
}

impl DieselVisitRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn row_to_visit(row: VisitRow) -> Result<Visit, RepositoryError> {
    let identifier =
        PetIdentifier::of(row.pet_identifier).map_err(corrupt_value("pet_identifier"))?;
    Ok(Visit::new(
        VisitId::from_uuid(row.id),
        identifier,
        row.visit_time,
        row.description,
    ))
}

fn rows_to_visits(rows: Vec<VisitRow>) -> Result<Vec<Visit>, RepositoryError> {
    rows.into_iter().map(row_to_visit).collect()
}

#[async_trait]
impl VisitRepository for DieselVisitRepository {
    async fn save(&self, visit: &Visit) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewVisitRow {
            id: *visit.id().as_uuid(),
            pet_identifier: visit.pet_identifier().as_str(),
            visit_time: visit.time(),
            description: visit.description(),
        };
        diesel::insert_into(visits::table)
            .values(&row)
            .on_conflict(visits::id)
            .do_update()
            .set((
                visits::pet_identifier.eq(excluded(visits::pet_identifier)),
                visits::visit_time.eq(excluded(visits::visit_time)),
                visits::description.eq(excluded(visits::description)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &VisitId) -> Result<Option<Visit>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<VisitRow> = visits::table
            .filter(visits::id.eq(id.as_uuid()))
            .select(VisitRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_visit).transpose()
    }

    async fn find_by_pet_identifier(
        &self,
        identifier: &PetIdentifier,
    ) -> Result<Vec<Visit>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<VisitRow> = visits::table
            .filter(visits::pet_identifier.eq(identifier.as_str()))
            .order((visits::visit_time, visits::id))
            .select(VisitRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_visits(rows)
    }

    async fn find_all(&self) -> Result<Vec<Visit>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<VisitRow> = visits::table
            .order((visits::visit_time, visits::id))
            .select(VisitRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_visits(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use uuid::Uuid;

    fn stored(pet_identifier: &str) -> VisitRow {
        VisitRow {
            id: Uuid::new_v4(),
            pet_identifier: pet_identifier.to_owned(),
            visit_time: Utc
                .with_ymd_and_hms(2024, 3, 12, 9, 30, 0)
                .single()
                .expect("valid instant"),
            description: "Annual check-up".to_owned(),
        }
    }

    #[rstest]
    fn rows_rebuild_visits() {
        let row = stored("2024031210123457");
        let id = row.id;
        let visit = row_to_visit(row).expect("valid row");
        assert_eq!(visit.id(), VisitId::from_uuid(id));
        assert_eq!(visit.pet_identifier().as_str(), "2024031210123457");
        assert_eq!(visit.description(), "Annual check-up");
    }

    #[rstest]
    fn rows_with_broken_identifiers_are_corrupt() {
        let error = row_to_visit(stored("2024031210123458")).expect_err("checksum fails");
        assert!(matches!(error, RepositoryError::CorruptRecord { .. }));
    }
}
