//! Owner HTTP handlers.
//!
//! ```text
//! POST /api/v1/owners
//! GET /api/v1/owners?lastName=Lovelace
//! GET /api/v1/owners/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::RegisterOwnerRequest;
use crate::domain::{Error, Owner, OwnerId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Request body for `POST /api/v1/owners`.
///
/// Absent fields are reported by the domain as missing.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRequest {
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    #[schema(example = "1 Analytical Row")]
    pub address: Option<String>,
    #[schema(example = "London")]
    pub city: Option<String>,
    #[schema(example = "+4412345678")]
    pub telephone: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
}

impl From<OwnerRequest> for RegisterOwnerRequest {
    fn from(value: OwnerRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            address: value.address,
            city: value.city,
            telephone: value.telephone,
            email: value.email,
        }
    }
}

/// Owner representation returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    pub email: String,
}

impl From<Owner> for OwnerResponse {
    fn from(owner: Owner) -> Self {
        Self {
            id: owner.id().to_string(),
            first_name: owner.first_name().as_str().to_owned(),
            last_name: owner.last_name().as_str().to_owned(),
            address: owner.address().as_str().to_owned(),
            city: owner.city().as_str().to_owned(),
            telephone: owner.telephone().as_str().to_owned(),
            email: owner.email().as_str().to_owned(),
        }
    }
}

/// Query parameters for `GET /api/v1/owners`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OwnersQuery {
    /// Exact last name to filter by.
    pub last_name: Option<String>,
}

/// Register a new owner.
#[utoipa::path(
    post,
    path = "/api/v1/owners",
    request_body = OwnerRequest,
    responses(
        (status = 201, description = "Owner registered", body = OwnerResponse,
            headers(("Location" = String, description = "URL of the new owner"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["owners"],
    operation_id = "registerOwner"
)]
#[post("/owners")]
pub async fn register_owner(
    state: web::Data<HttpState>,
    payload: web::Json<OwnerRequest>,
) -> ApiResult<HttpResponse> {
    let owner = state
        .registration
        .register_owner(payload.into_inner().into())
        .await?;
    let location = format!("/api/v1/owners/{}", owner.id());
    Ok(envelope::created(location, OwnerResponse::from(owner)))
}

/// List owners, optionally by last name.
#[utoipa::path(
    get,
    path = "/api/v1/owners",
    params(OwnersQuery),
    responses(
        (status = 200, description = "Owners", body = [OwnerResponse]),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["owners"],
    operation_id = "listOwners"
)]
#[get("/owners")]
pub async fn list_owners(
    state: web::Data<HttpState>,
    query: web::Query<OwnersQuery>,
) -> ApiResult<HttpResponse> {
    let owners = state.query.owners(query.into_inner().last_name).await?;
    let body: Vec<OwnerResponse> = owners.into_iter().map(OwnerResponse::from).collect();
    Ok(envelope::ok(body))
}

/// Fetch one owner.
#[utoipa::path(
    get,
    path = "/api/v1/owners/{id}",
    params(("id" = String, Path, description = "Owner UUID")),
    responses(
        (status = 200, description = "Owner", body = OwnerResponse),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 404, description = "Unknown owner", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["owners"],
    operation_id = "getOwner"
)]
#[get("/owners/{id}")]
pub async fn get_owner(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: OwnerId = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let owner = state.query.owner(id).await?;
    Ok(envelope::ok(OwnerResponse::from(owner)))
}

#[cfg(test)]
#[path = "owners_tests.rs"]
mod tests;
