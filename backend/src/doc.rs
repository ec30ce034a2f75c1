//! OpenAPI documentation for the clinic REST API.
//!
//! The generated document backs Swagger UI in debug builds and is exported by
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, Gender, PetType};
use crate::inbound::http::envelope::Meta;
use crate::inbound::http::owners::{OwnerRequest, OwnerResponse};
use crate::inbound::http::pets::{PetRequest, PetResponse};
use crate::inbound::http::visits::{VisitRequest, VisitResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pet clinic API",
        description = "Register owners, pets and visits. Pets are keyed by a checksummed 16-digit identifier."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::owners::register_owner,
        crate::inbound::http::owners::list_owners,
        crate::inbound::http::owners::get_owner,
        crate::inbound::http::pets::register_pet,
        crate::inbound::http::pets::list_pets,
        crate::inbound::http::pets::get_pet,
        crate::inbound::http::pets::get_pet_by_identifier,
        crate::inbound::http::visits::register_visit,
        crate::inbound::http::visits::list_visits,
        crate::inbound::http::visits::get_visit,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Gender,
        PetType,
        Meta,
        OwnerRequest,
        OwnerResponse,
        PetRequest,
        PetResponse,
        VisitRequest,
        VisitResponse,
    )),
    tags(
        (name = "owners", description = "Pet owners"),
        (name = "pets", description = "Pets and their identifiers"),
        (name = "visits", description = "Clinic visits"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    #[case("PetResponse", &["identifier", "type", "birthDate", "ownerId"])]
    #[case("OwnerRequest", &["firstName", "lastName", "telephone", "email"])]
    #[case("VisitRequest", &["petIdentifier", "time", "description"])]
    fn schemas_use_camel_case_fields(#[case] schema: &str, #[case] fields: &[&str]) {
        let present = object_fields(schema);
        for field in fields {
            assert!(present.iter().any(|p| p == field), "{schema} lacks {field}");
        }
    }

    #[rstest]
    fn every_clinic_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/owners",
            "/api/v1/owners/{id}",
            "/api/v1/pets",
            "/api/v1/pets/{id}",
            "/api/v1/pets/identifier/{identifier}",
            "/api/v1/visits",
            "/api/v1/visits/{id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
