//! Diesel row structs. Internal to the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{owners, pets, visits};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = owners)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OwnerRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    pub email: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = owners)]
pub(crate) struct NewOwnerRow<'a> {
    pub id: Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub address: &'a str,
    pub city: &'a str,
    pub telephone: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PetRow {
    pub id: Uuid,
    pub identifier: String,
    pub name: String,
    pub pet_type: String,
    pub breed: String,
    pub description: String,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pets)]
pub(crate) struct NewPetRow<'a> {
    pub id: Uuid,
    pub identifier: &'a str,
    pub name: &'a str,
    pub pet_type: &'a str,
    pub breed: &'a str,
    pub description: &'a str,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = visits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VisitRow {
    pub id: Uuid,
    pub pet_identifier: String,
    pub visit_time: DateTime<Utc>,
    pub description: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = visits)]
pub(crate) struct NewVisitRow<'a> {
    pub id: Uuid,
    pub pet_identifier: &'a str,
    pub visit_time: DateTime<Utc>,
    pub description: &'a str,
}
