//! Visit HTTP handlers.
//!
//! ```text
//! POST /api/v1/visits
//! GET /api/v1/visits?petIdentifier=2024031210123457
//! GET /api/v1/visits/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::RegisterVisitRequest;
use crate::domain::{Error, Visit, VisitId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, parse_optional_instant};

/// Request body for `POST /api/v1/visits`.
///
/// `time` accepts RFC 3339 as well as date-only and offset-less layouts,
/// which are read as UTC.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitRequest {
    #[schema(example = "2024031210123457")]
    pub pet_identifier: Option<String>,
    #[schema(example = "2024-03-12T09:30:00Z")]
    pub time: Option<String>,
    #[schema(example = "Annual check-up")]
    pub description: Option<String>,
}

impl TryFrom<VisitRequest> for RegisterVisitRequest {
    type Error = Error;

    fn try_from(value: VisitRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            time: parse_optional_instant(value.time, FieldName::new("time"))?,
            pet_identifier: value.pet_identifier,
            description: value.description,
        })
    }
}

/// Visit representation returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitResponse {
    pub id: String,
    pub pet_identifier: String,
    pub time: DateTime<Utc>,
    pub description: String,
}

impl From<Visit> for VisitResponse {
    fn from(visit: Visit) -> Self {
        Self {
            id: visit.id().to_string(),
            pet_identifier: visit.pet_identifier().to_string(),
            time: visit.time(),
            description: visit.description().to_owned(),
        }
    }
}

/// Query parameters for `GET /api/v1/visits`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VisitsQuery {
    /// Pet identifier to filter by.
    pub pet_identifier: Option<String>,
}

/// Record a visit for an existing pet.
#[utoipa::path(
    post,
    path = "/api/v1/visits",
    request_body = VisitRequest,
    responses(
        (status = 201, description = "Visit recorded", body = VisitResponse,
            headers(("Location" = String, description = "URL of the new visit"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown pet", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["visits"],
    operation_id = "registerVisit"
)]
#[post("/visits")]
pub async fn register_visit(
    state: web::Data<HttpState>,
    payload: web::Json<VisitRequest>,
) -> ApiResult<HttpResponse> {
    let request = RegisterVisitRequest::try_from(payload.into_inner())?;
    let visit = state.registration.register_visit(request).await?;
    let location = format!("/api/v1/visits/{}", visit.id());
    Ok(envelope::created(location, VisitResponse::from(visit)))
}

/// List visits, optionally for one pet.
#[utoipa::path(
    get,
    path = "/api/v1/visits",
    params(VisitsQuery),
    responses(
        (status = 200, description = "Visits, oldest first", body = [VisitResponse]),
        (status = 400, description = "Malformed pet identifier", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["visits"],
    operation_id = "listVisits"
)]
#[get("/visits")]
pub async fn list_visits(
    state: web::Data<HttpState>,
    query: web::Query<VisitsQuery>,
) -> ApiResult<HttpResponse> {
    let visits = state.query.visits(query.into_inner().pet_identifier).await?;
    let body: Vec<VisitResponse> = visits.into_iter().map(VisitResponse::from).collect();
    Ok(envelope::ok(body))
}

/// Fetch one visit.
#[utoipa::path(
    get,
    path = "/api/v1/visits/{id}",
    params(("id" = String, Path, description = "Visit UUID")),
    responses(
        (status = 200, description = "Visit", body = VisitResponse),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 404, description = "Unknown visit", body = Error)
    ),
    tags = ["visits"],
    operation_id = "getVisit"
)]
#[get("/visits/{id}")]
pub async fn get_visit(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: VisitId = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let visit = state.query.visit(id).await?;
    Ok(envelope::ok(VisitResponse::from(visit)))
}
