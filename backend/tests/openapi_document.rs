//! Checks the exported OpenAPI document lists every clinic route.

use petclinic::ApiDoc;
use rstest::{fixture, rstest};
use serde_json::Value;
use utoipa::OpenApi;

#[fixture]
fn document() -> Value {
    let json = ApiDoc::openapi().to_json().expect("valid JSON");
    serde_json::from_str(&json).expect("document parses")
}

#[rstest]
#[case("/api/v1/owners", "post")]
#[case("/api/v1/owners", "get")]
#[case("/api/v1/owners/{id}", "get")]
#[case("/api/v1/pets", "post")]
#[case("/api/v1/pets", "get")]
#[case("/api/v1/pets/{id}", "get")]
#[case("/api/v1/pets/identifier/{identifier}", "get")]
#[case("/api/v1/visits", "post")]
#[case("/api/v1/visits", "get")]
#[case("/api/v1/visits/{id}", "get")]
fn every_route_is_documented(document: Value, #[case] path: &str, #[case] method: &str) {
    let operation = document
        .get("paths")
        .and_then(|paths| paths.get(path))
        .and_then(|item| item.get(method));
    assert!(operation.is_some(), "{method} {path} missing from document");
}

#[rstest]
fn error_schema_is_shared(document: Value) {
    let schemas = document
        .pointer("/components/schemas")
        .and_then(Value::as_object)
        .expect("component schemas");
    assert!(
        schemas.keys().any(|name| name.ends_with("Error")),
        "error schema registered: {:?}",
        schemas.keys().collect::<Vec<_>>()
    );
}
