//! Pet HTTP handlers.
//!
//! ```text
//! POST /api/v1/pets
//! GET /api/v1/pets?ownerId=...&name=Rex
//! GET /api/v1/pets/{id}
//! GET /api/v1/pets/identifier/{identifier}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{PetFilter, RegisterPetRequest};
use crate::domain::{Error, Gender, Pet, PetId, PetType};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_id, parse_optional_date, parse_optional_id,
};

const BIRTH_DATE: FieldName = FieldName::new("birthDate");
const OWNER_ID: FieldName = FieldName::new("ownerId");

/// Request body for `POST /api/v1/pets`.
///
/// `type` and `gender` are matched case-insensitively. `birthDate` accepts
/// `YYYY-MM-DD`, `DD.MM.YYYY` and the other layouts listed in
/// [`crate::inbound::http::flexible_time`].
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetRequest {
    #[schema(example = "Rex")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "DOG")]
    pub pet_type: Option<String>,
    #[schema(example = "Labrador")]
    pub breed: Option<String>,
    #[schema(example = "MALE")]
    pub gender: Option<String>,
    #[schema(example = "2020-05-17")]
    pub birth_date: Option<String>,
    #[schema(example = "Loves fetch")]
    pub description: Option<String>,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub owner_id: Option<String>,
}

impl TryFrom<PetRequest> for RegisterPetRequest {
    type Error = Error;

    fn try_from(value: PetRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            birth_date: parse_optional_date(value.birth_date, BIRTH_DATE)?,
            owner_id: parse_optional_id(value.owner_id, OWNER_ID)?,
            name: value.name,
            pet_type: value.pet_type,
            breed: value.breed,
            gender: value.gender,
            description: value.description,
        })
    }
}

/// Pet representation returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    pub id: String,
    #[schema(example = "2020051710123457")]
    pub identifier: String,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub breed: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub description: String,
    pub owner_id: String,
}

impl From<Pet> for PetResponse {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id().to_string(),
            identifier: pet.identifier().to_string(),
            name: pet.name().as_str().to_owned(),
            pet_type: pet.pet_type(),
            breed: pet.breed().as_str().to_owned(),
            gender: pet.gender(),
            birth_date: pet.birth_date(),
            description: pet.description().to_owned(),
            owner_id: pet.owner_id().to_string(),
        }
    }
}

/// Query parameters for `GET /api/v1/pets`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PetsQuery {
    /// Owner UUID to filter by.
    pub owner_id: Option<String>,
    /// Exact pet name to filter by.
    pub name: Option<String>,
}

fn pet_list(pets: Vec<Pet>) -> Vec<PetResponse> {
    pets.into_iter().map(PetResponse::from).collect()
}

/// Register a pet for an existing owner and assign its identifier.
#[utoipa::path(
    post,
    path = "/api/v1/pets",
    request_body = PetRequest,
    responses(
        (status = 201, description = "Pet registered", body = PetResponse,
            headers(("Location" = String, description = "URL of the new pet"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown owner", body = Error),
        (status = 409, description = "Identifier already taken", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["pets"],
    operation_id = "registerPet"
)]
#[post("/pets")]
pub async fn register_pet(
    state: web::Data<HttpState>,
    payload: web::Json<PetRequest>,
) -> ApiResult<HttpResponse> {
    let request = RegisterPetRequest::try_from(payload.into_inner())?;
    let pet = state.registration.register_pet(request).await?;
    let location = format!("/api/v1/pets/{}", pet.id());
    Ok(envelope::created(location, PetResponse::from(pet)))
}

/// List pets, optionally by owner and name.
#[utoipa::path(
    get,
    path = "/api/v1/pets",
    params(PetsQuery),
    responses(
        (status = 200, description = "Pets", body = [PetResponse]),
        (status = 400, description = "Malformed owner identifier", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["pets"],
    operation_id = "listPets"
)]
#[get("/pets")]
pub async fn list_pets(
    state: web::Data<HttpState>,
    query: web::Query<PetsQuery>,
) -> ApiResult<HttpResponse> {
    let PetsQuery { owner_id, name } = query.into_inner();
    let filter = PetFilter {
        owner_id: parse_optional_id(owner_id, OWNER_ID)?,
        name,
    };
    let pets = state.query.pets(filter).await?;
    Ok(envelope::ok(pet_list(pets)))
}

/// Fetch one pet by surrogate key.
#[utoipa::path(
    get,
    path = "/api/v1/pets/{id}",
    params(("id" = String, Path, description = "Pet UUID")),
    responses(
        (status = 200, description = "Pet", body = PetResponse),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 404, description = "Unknown pet", body = Error)
    ),
    tags = ["pets"],
    operation_id = "getPet"
)]
#[get("/pets/{id}")]
pub async fn get_pet(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: PetId = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let pet = state.query.pet(id).await?;
    Ok(envelope::ok(PetResponse::from(pet)))
}

/// Fetch one pet by its 16-digit identifier.
#[utoipa::path(
    get,
    path = "/api/v1/pets/identifier/{identifier}",
    params(("identifier" = String, Path, description = "Pet identifier, YYYYmmddGNNNNNNC")),
    responses(
        (status = 200, description = "Pet", body = PetResponse),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 404, description = "Unknown pet", body = Error)
    ),
    tags = ["pets"],
    operation_id = "getPetByIdentifier"
)]
#[get("/pets/identifier/{identifier}")]
pub async fn get_pet_by_identifier(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let pet = state.query.pet_by_identifier(path.into_inner()).await?;
    Ok(envelope::ok(PetResponse::from(pet)))
}

#[cfg(test)]
#[path = "pets_tests.rs"]
mod tests;
