//! Success response envelope: `{ "data": ..., "meta": { "timestamp": ... } }`.

use actix_web::{HttpResponse, http::header};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Response metadata attached to every success body.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// Server time when the response was produced.
    pub timestamp: DateTime<Utc>,
}

/// Wrapper for successful payloads.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Envelope<T> {
    pub data: T,
    pub meta: Meta,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Meta {
                timestamp: Utc::now(),
            },
        }
    }
}

/// `200 OK` with `data` wrapped in the envelope.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(Envelope::new(data))
}

/// `201 Created` pointing at `location`, with `data` wrapped in the envelope.
pub fn created<T: Serialize>(location: String, data: T) -> HttpResponse {
    HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(Envelope::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[actix_web::test]
    async fn created_sets_location_and_wraps_data() {
        let response = created("/api/v1/owners/1".to_owned(), json!({"id": 1}));
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/api/v1/owners/1")
        );
        let body = to_bytes(response.into_body()).await.expect("body");
        let value: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(value["data"], json!({"id": 1}));
        assert!(value["meta"]["timestamp"].is_string());
    }
}
